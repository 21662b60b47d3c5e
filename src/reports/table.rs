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

/// Standard table printer for the small reports this tool produces.
/// Columns are sized to their widest cell; headers are centered, data
/// cells left-aligned unless a column is marked right-aligned.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Header(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<&str>) {
		self.rows.push(Row::Data(
			row.into_iter().map(|s| s.to_string()).collect(),
		));
	}

	/// Adds a separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn print(&self) {
		println!();
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate() {
					max_widths[i] = max_widths[i].max(value.len());
				}
			}
		}

		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => {
					Self::render_header(&max_widths, cells)
				},
				Row::Data(cells) => {
					self.render_data(&max_widths, cells)
				},
				Row::Separator => {
					let total: usize = max_widths.iter().sum::<usize>()
						+ 3 * (self.column_count - 1);
					"-".repeat(total)
				},
			};
			println!("{}", line.trim_end());
		}
	}

	fn render_header(max_widths: &[usize], cells: &[String]) -> String {
		let centered: Vec<String> = cells
			.iter()
			.enumerate()
			.map(|(i, value)| Self::center_align(value, max_widths[i]))
			.collect();
		centered.join(" | ")
	}

	fn render_data(&self, max_widths: &[usize], cells: &[String]) -> String {
		let aligned: Vec<String> = cells
			.iter()
			.enumerate()
			.map(|(i, value)| {
				if self.right_align[i] {
					format!("{:>width$}", value, width = max_widths[i])
				} else {
					format!("{:<width$}", value, width = max_widths[i])
				}
			})
			.collect();
		aligned.join("   ")
	}

	fn center_align(value: &str, width: usize) -> String {
		if value.len() >= width {
			return value.to_string();
		}
		let total_padding = width - value.len();
		let left_padding = total_padding / 2;

		format!(
			"{}{}{}",
			" ".repeat(left_padding),
			value,
			" ".repeat(total_padding - left_padding)
		)
	}
}
