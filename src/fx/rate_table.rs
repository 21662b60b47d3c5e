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
use crate::config::config_file::Config;
use crate::util::quant::Quant;
use anyhow::{bail, Error};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;

/// Rates shipped with the binary, per 1 USD. Used whenever the config
/// file declares no rates of its own.
const BUILTIN_RATES: [(&str, &str); 6] = [
	("USD", "1"),
	("EUR", "0.85"),
	("GBP", "0.73"),
	("KES", "109.57"),
	("JPY", "109.93"),
	("CNY", "6.46"),
];

const CURRENCY_CODE_PATTERN: &str = "^[A-Z][A-Z0-9]{1,7}$";

/// Immutable map of currency code to its rate relative to a fixed base
/// currency (the code whose rate is exactly 1, if declared). Assembled
/// once at startup and never mutated afterward; every component that
/// needs rates receives a reference rather than reaching for a global.
#[derive(Debug)]
pub struct RateTable {
	rates: BTreeMap<String, Quant>,

	/// Optional provenance date for the rates, shown in reports only.
	as_of: Option<NaiveDate>,
}

impl RateTable {
	pub fn builtin() -> Self {
		let entries = BUILTIN_RATES
			.iter()
			.map(|(code, rate)| (code.to_string(), rate.to_string()))
			.collect();

		// the builtin table must pass its own validation
		Self::from_entries(&entries, None).unwrap()
	}

	/// Builds the table the program will run with: the config's rates
	/// verbatim if it declares any, else the builtin table.
	pub fn from_config(config: &Config) -> Result<Self, Error> {
		let as_of = match &config.as_of {
			None => None,
			Some(text) => {
				match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
					Ok(date) => Some(date),
					Err(_) => {
						bail!("Config as_of must be YYYY-MM-DD: {}", text)
					},
				}
			},
		};

		match &config.rates {
			Some(rates) if !rates.is_empty() => {
				Self::from_entries(rates, as_of)
			},
			_ => Ok(Self {
				as_of,
				..Self::builtin()
			}),
		}
	}

	/// Validates and parses a code -> decimal-text mapping. Every code
	/// must look like a currency code and every rate must be strictly
	/// positive; rates of zero would make conversion divide by zero,
	/// and the graph of pairs would be meaningless besides.
	pub fn from_entries(
		entries: &BTreeMap<String, String>,
		as_of: Option<NaiveDate>,
	) -> Result<Self, Error> {
		let code_shape = Regex::new(CURRENCY_CODE_PATTERN)?;

		let mut rates = BTreeMap::new();
		for (code, text) in entries {
			if !code_shape.is_match(code) {
				bail!("Invalid currency code: {}", code);
			}

			let rate = Quant::from_str(text)?;
			if rate.is_zero() || rate.is_negative() {
				bail!("Rate for {} must be positive: {}", code, text);
			}

			rates.insert(code.clone(), rate);
		}

		Ok(Self { rates, as_of })
	}

	/// Retrieves the rate for a code. The selection surfaces only ever
	/// offer codes from this table, so a miss here is an integration
	/// bug and fails loudly rather than converting against nothing.
	pub fn rate(&self, code: &str) -> Result<Quant, Error> {
		match self.rates.get(code) {
			Some(rate) => Ok(*rate),
			None => bail!("No rate for currency {}", code),
		}
	}

	pub fn contains(&self, code: &str) -> bool {
		self.rates.contains_key(code)
	}

	/// The base currency is the one whose rate is exactly 1.
	pub fn base(&self) -> Option<&str> {
		let one = Quant::from_int(1);
		self.rates
			.iter()
			.find(|(_, rate)| **rate == one)
			.map(|(code, _)| code.as_str())
	}

	pub fn as_of(&self) -> Option<NaiveDate> {
		self.as_of
	}

	/// Returns the final map of rates. Consumes this.
	pub fn take_rates(self) -> BTreeMap<String, Quant> {
		self.rates
	}
}
