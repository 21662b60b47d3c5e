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
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	/// Replaces the builtin rate table entirely when present. Rates
	/// are decimal strings so they stay exact through parsing.
	pub rates: Option<BTreeMap<String, String>>,

	/// Provenance date for the rates (YYYY-MM-DD), shown in the rates
	/// report. Purely informational.
	pub as_of: Option<String>,

	/// Overrides the default state file location.
	pub state_path: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_config_parses() {
		let config: Config = toml::from_str("").unwrap();
		assert!(config.rates.is_none());
		assert!(config.as_of.is_none());
		assert!(config.state_path.is_none());
	}

	#[test]
	fn test_full_config_parses() {
		let config: Config = toml::from_str(
			r#"
			as_of = "2024-11-01"
			state_path = "/tmp/convr-state.json"

			[rates]
			USD = "1"
			EUR = "0.92"
			"#,
		)
		.unwrap();

		assert_eq!(config.as_of.as_deref(), Some("2024-11-01"));
		assert_eq!(
			config.rates.unwrap().get("EUR").map(String::as_str),
			Some("0.92")
		);
	}

	#[test]
	fn test_numeric_rate_is_a_type_error() {
		// rates must be quoted; a bare number would go through float
		let result = toml::from_str::<Config>("[rates]\nUSD = 1\n");
		assert!(result.is_err());
	}
}
