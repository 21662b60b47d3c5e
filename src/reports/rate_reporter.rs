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
use crate::reports::table::Table;

pub struct RateReporter {
	rates: RateTable,
}

impl RateReporter {
	pub fn new(rates: RateTable) -> RateReporter {
		Self { rates }
	}

	pub fn print_all_rates(self) {
		let base = self.rates.base().map(str::to_string);
		let as_of = self.rates.as_of();

		let mut table = Table::new(2);
		table.right_align(vec![1]);

		table.add_header(vec!["Currency", "Rate"]);
		table.add_separator();

		let rates = self.rates.take_rates();
		for (code, rate) in &rates {
			table.add_row(vec![code, &rate.to_string()]);
		}

		table.print();
		println!();

		if let Some(base) = base {
			println!("Rates are per 1 {}", base);
		}
		if let Some(date) = as_of {
			println!("As of {}", date.format("%Y-%m-%d"));
		}
	}
}
