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
use crate::fx::convert::convert;
use crate::fx::rate_table::RateTable;
use crate::store::field_store::FieldStore;
use crate::util::quant::Quant;
use anyhow::{bail, Error};

// Storage keys, kept verbatim for drop-in compatibility with state
// files written by earlier builds.
const KEY_SOURCE_CURRENCY: &str = "inputCurrency";
const KEY_TARGET_CURRENCY: &str = "outputCurrency";
const KEY_SOURCE_AMOUNT: &str = "inputAmount";
const KEY_TARGET_AMOUNT: &str = "outputAmount";

const DEFAULT_SOURCE_CURRENCY: &str = "USD";
const DEFAULT_TARGET_CURRENCY: &str = "KES";

/// The four fields that drive the converter, as read from the store.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionState {
	pub source_currency: String,
	pub target_currency: String,
	pub source_amount: Quant,
	pub target_amount: Quant,
}

/// The conversion session: the four persisted fields plus one mutation
/// entry point per user event. Each entry point owns the whole of its
/// contract, storing the new value and recomputing the derived output
/// where the event calls for it, so there is no change-detection
/// machinery to fall out of sync with what the fields actually depend
/// on.
///
/// The derived invariant (output == convert of the other three) holds
/// after every source-side mutation, is deliberately broken by swap()
/// and by direct output edits, and is restored by the next source-side
/// mutation.
pub struct Session {
	store: FieldStore,
	rates: RateTable,
}

impl Session {
	pub fn new(store: FieldStore, rates: RateTable) -> Self {
		Self { store, rates }
	}

	/// Returns the final rate table. Consumes this.
	pub fn take_rates(self) -> RateTable {
		self.rates
	}

	/// Reads the current state, falling back to the documented
	/// defaults field by field. Pure read; never recomputes.
	pub fn state(&self) -> ConversionState {
		ConversionState {
			source_currency: self.store.get(
				KEY_SOURCE_CURRENCY,
				DEFAULT_SOURCE_CURRENCY.to_string(),
			),
			target_currency: self.store.get(
				KEY_TARGET_CURRENCY,
				DEFAULT_TARGET_CURRENCY.to_string(),
			),
			source_amount: self
				.store
				.get(KEY_SOURCE_AMOUNT, Quant::from_int(1)),
			target_amount: self
				.store
				.get(KEY_TARGET_AMOUNT, Quant::zero()),
		}
	}

	pub fn set_source_currency(
		&mut self,
		code: &str,
	) -> Result<(), Error> {
		self.require_known(code)?;
		self.store.set(KEY_SOURCE_CURRENCY, code);
		self.reconvert()
	}

	pub fn set_target_currency(
		&mut self,
		code: &str,
	) -> Result<(), Error> {
		self.require_known(code)?;
		self.store.set(KEY_TARGET_CURRENCY, code);
		self.reconvert()
	}

	pub fn set_source_amount(
		&mut self,
		amount: Quant,
	) -> Result<(), Error> {
		self.store.set(KEY_SOURCE_AMOUNT, amount);
		self.reconvert()
	}

	/// A direct edit of the output field is stored as-is. It must not
	/// trigger a recomputation of itself; that would be a feedback
	/// loop, and the user asked for this exact number besides.
	pub fn set_target_amount(&mut self, amount: Quant) {
		self.store.set(KEY_TARGET_AMOUNT, amount);
	}

	/// Exchanges the two currencies and the two amounts in one step.
	/// This is a relabeling, not a re-conversion: the output shown
	/// after a swap is exactly the old input, and the derived
	/// invariant stays broken until the next source-side change.
	pub fn swap(&mut self) {
		let state = self.state();

		self.store
			.set(KEY_SOURCE_CURRENCY, state.target_currency);
		self.store
			.set(KEY_TARGET_CURRENCY, state.source_currency);
		self.store.set(KEY_SOURCE_AMOUNT, state.target_amount);
		self.store.set(KEY_TARGET_AMOUNT, state.source_amount);
	}

	/// Restores the documented defaults verbatim, including the
	/// default output of 0. As after a swap, the next source-side
	/// change reconciles the output.
	pub fn reset(&mut self) {
		self.store
			.set(KEY_SOURCE_CURRENCY, DEFAULT_SOURCE_CURRENCY);
		self.store
			.set(KEY_TARGET_CURRENCY, DEFAULT_TARGET_CURRENCY);
		self.store.set(KEY_SOURCE_AMOUNT, Quant::from_int(1));
		self.store.set(KEY_TARGET_AMOUNT, Quant::zero());
	}

	/// The unit rate for the currently selected pair, for display.
	pub fn unit_rate(&self) -> Result<Quant, Error> {
		let state = self.state();
		convert(
			Quant::from_int(1),
			&state.source_currency,
			&state.target_currency,
			&self.rates,
		)
	}

	/// Recomputes the derived output from the other three fields and
	/// stores it. Called by every mutation the output depends on.
	fn reconvert(&mut self) -> Result<(), Error> {
		let state = self.state();

		let output = convert(
			state.source_amount,
			&state.source_currency,
			&state.target_currency,
			&self.rates,
		)?;

		self.store.set(KEY_TARGET_AMOUNT, output);
		Ok(())
	}

	fn require_known(&self, code: &str) -> Result<(), Error> {
		if !self.rates.contains(code) {
			bail!(
				"Unknown currency {} (run the er command to list rates)",
				code
			);
		}
		Ok(())
	}
}
