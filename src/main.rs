/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::fx::rate_table::RateTable;
use crate::fx::session::Session;
use crate::reports::rate_reporter::RateReporter;
use crate::reports::state_reporter::StateReporter;
use crate::store::field_store::FieldStore;
use crate::util::quant::Quant;
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};

mod config;
mod fx;
mod reports;
mod store;
mod util;

#[derive(Parser)]
#[command(
	name = "convr",
	version = "1.0",
	about = "Sticky currency conversion tool"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The currency code or amount for commands that take one
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Custom config file location (default: ~/.config/convr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Custom state file location (default: ~/.config/convr/state.json)
	#[arg(long)]
	state: Option<String>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		let takes_term = matches!(
			self.command,
			Directive::From
				| Directive::To | Directive::Amt
				| Directive::Out
		);

		if takes_term && self.term.is_none() {
			bail!("This command requires a value");
		}
		if !takes_term && self.term.is_some() {
			bail!("This command does not take a value");
		}

		Ok(())
	}

	fn term(&self) -> &str {
		// validate() has already run by the time this is called
		self.term.as_deref().unwrap()
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	From, // set the source currency
	To,   // set the target currency
	Amt,  // set the source amount
	Out,  // edit the target amount directly

	Swap, // exchange the two sides of the conversion

	Show, // print the current conversion state
	Er,   // exchange rates

	Reset, // restore the default state
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let config = config::locator::load_config(args.config.as_ref())?;
	let rates = RateTable::from_config(&config)?;

	let store = FieldStore::open(config::locator::state_path(
		args.state.as_ref(),
		&config,
	));
	let mut session = Session::new(store, rates);

	match args.command {
		Directive::From => {
			let code = parse_currency(args.term());
			session.set_source_currency(&code)?;
			print_state(&session)?;
		},
		Directive::To => {
			let code = parse_currency(args.term());
			session.set_target_currency(&code)?;
			print_state(&session)?;
		},
		Directive::Amt => {
			let amount = parse_amount(args.term())?;
			session.set_source_amount(amount)?;
			print_state(&session)?;
		},
		Directive::Out => {
			let amount = parse_amount(args.term())?;
			session.set_target_amount(amount);
			print_state(&session)?;
		},
		Directive::Swap => {
			session.swap();
			print_state(&session)?;
		},
		Directive::Show => {
			print_state(&session)?;
		},
		Directive::Er => {
			let reporter = RateReporter::new(session.take_rates());
			reporter.print_all_rates();
		},
		Directive::Reset => {
			session.reset();
			print_state(&session)?;
		},
	}

	Ok(())
}

/// Currency terms are uppercased before they reach the session, so
/// `convr from eur` works the way the selection dropdown did.
fn parse_currency(term: &str) -> String {
	term.trim().to_uppercase()
}

/// Screens amount text at the input boundary: it must be a well-formed
/// non-negative decimal before the session sees it.
fn parse_amount(term: &str) -> Result<Quant, Error> {
	let Ok(amount) = Quant::from_str(term.trim()) else {
		bail!("Not a valid amount: {}", term);
	};

	if amount.is_negative() {
		bail!("Amount must be non-negative: {}", term);
	}

	Ok(amount)
}

fn print_state(session: &Session) -> Result<(), Error> {
	let reporter =
		StateReporter::new(session.state(), session.unit_rate()?);
	reporter.print();
	Ok(())
}
