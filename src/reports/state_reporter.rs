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
use crate::fx::session::ConversionState;
use crate::reports::table::Table;
use crate::util::quant::Quant;

/// Prints the four conversion fields the way the widget laid them out,
/// source side first, plus the unit rate for the selected pair.
pub struct StateReporter {
	state: ConversionState,
	unit_rate: Quant,
}

impl StateReporter {
	pub fn new(state: ConversionState, unit_rate: Quant) -> Self {
		Self { state, unit_rate }
	}

	pub fn print(&self) {
		let source_amount = self.state.source_amount.to_string();
		let target_amount = self.state.target_amount.to_string();

		let mut table = Table::new(2);

		table.add_header(vec!["Field", "Value"]);
		table.add_separator();
		table.add_row(vec!["From", &self.state.source_currency]);
		table.add_row(vec!["Amount", &source_amount]);
		table.add_row(vec!["To", &self.state.target_currency]);
		table.add_row(vec!["Amount", &target_amount]);

		table.print();

		println!();
		println!(
			"1 {} = {} {}",
			self.state.source_currency,
			self.unit_rate,
			self.state.target_currency
		);
	}
}
