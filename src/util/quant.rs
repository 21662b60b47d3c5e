/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use anyhow::{bail, Error};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Div, Mul, Neg, Sub};

/// An exact decimal quantity backed by a fraction of u128s. Amounts and
/// exchange rates are never floats anywhere in this program; a rate read
/// as "109.57" multiplies and divides as exactly 10957/100, so the only
/// rounding that ever happens is the single deliberate one applied to a
/// conversion result.
///
/// Keeps its fraction reduced after every operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Quant {
	numerator: u128,
	denominator: u128,

	/// Always false when the numerator is zero.
	is_negative: bool,

	/// Number of decimal places to render when printed. Printing does
	/// not alter the underlying fraction.
	render_precision: u32,
}

impl Quant {
	pub fn zero() -> Self {
		Self {
			numerator: 0,
			denominator: 1,
			is_negative: false,
			render_precision: 0,
		}
	}

	pub fn from_int(value: i128) -> Self {
		Self {
			numerator: value.unsigned_abs(),
			denominator: 1,
			is_negative: value < 0,
			render_precision: 0,
		}
	}

	/// Parses plain decimal text, e.g. "10", "0.85", "-3.2". The number
	/// of digits after the point becomes the render precision, so a
	/// value round-trips through text unchanged.
	pub fn from_str(input: &str) -> Result<Self, Error> {
		let is_negative = input.starts_with('-');
		let digits = input.trim_start_matches('-');

		let (whole, frac) = match digits.split_once('.') {
			None => (digits, ""),
			Some((_, f)) if f.is_empty() || f.contains('.') => {
				bail!("Invalid decimal format: {}", input)
			},
			Some((w, f)) => (w, f),
		};

		let precision = frac.len() as u32;
		let scale = 10u128.pow(precision);

		let whole: u128 = whole.parse()?;
		let fractional: u128 =
			if frac.is_empty() { 0 } else { frac.parse()? };

		let mut out = Self {
			numerator: whole * scale + fractional,
			denominator: scale,
			is_negative,
			render_precision: precision,
		};
		out.normalize();
		Ok(out)
	}

	pub fn is_zero(&self) -> bool {
		self.numerator == 0
	}

	pub fn is_negative(&self) -> bool {
		self.is_negative
	}

	/// Rounds to the given number of decimal places, half away from
	/// zero, and renders at exactly that many places afterward.
	pub fn round_half_up(&self, decimal_places: u32) -> Self {
		let scale = 10u128.pow(decimal_places);
		let scaled = self.numerator * scale;

		let mut quotient = scaled / self.denominator;
		let remainder = scaled % self.denominator;
		if remainder * 2 >= self.denominator {
			quotient += 1;
		}

		let mut out = Self {
			numerator: quotient,
			denominator: scale,
			is_negative: self.is_negative,
			render_precision: decimal_places,
		};
		out.normalize();
		out
	}

	/// Reduces the fraction and clears the sign on zero. Called after
	/// every operation that touches the fraction, to limit overflow
	/// with high-precision values.
	fn normalize(&mut self) {
		let gcd = Self::gcd(self.numerator, self.denominator);
		self.numerator /= gcd;
		self.denominator /= gcd;
		if self.numerator == 0 {
			self.is_negative = false;
			self.denominator = 1;
		}
	}

	/// Euclid's algorithm
	fn gcd(mut a: u128, mut b: u128) -> u128 {
		while b != 0 {
			(a, b) = (b, a % b);
		}
		a
	}

	fn recip(&self) -> Self {
		if self.numerator == 0 {
			panic!("Attempt to divide by zero");
		}
		Self {
			numerator: self.denominator,
			denominator: self.numerator,
			..*self
		}
	}
}

impl fmt::Display for Quant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		// Render the value rounded to the render precision; anything we
		// print has already been rounded, so this is exact for those.
		let scale = 10u128.pow(self.render_precision);
		let scaled = self.numerator * scale;
		let mut quotient = scaled / self.denominator;
		if (scaled % self.denominator) * 2 >= self.denominator {
			quotient += 1;
		}

		let sign =
			if self.is_negative && quotient > 0 { "-" } else { "" };
		let integer_part = quotient / scale;

		if self.render_precision == 0 {
			write!(f, "{}{}", sign, integer_part)
		} else {
			write!(
				f,
				"{}{}.{:0>width$}",
				sign,
				integer_part,
				quotient % scale,
				width = self.render_precision as usize
			)
		}
	}
}

impl Serialize for Quant {
	fn serialize<S: Serializer>(
		&self,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

struct QuantVisitor;

impl Visitor<'_> for QuantVisitor {
	type Value = Quant;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("a decimal string or number")
	}

	fn visit_str<E: de::Error>(self, v: &str) -> Result<Quant, E> {
		Quant::from_str(v).map_err(de::Error::custom)
	}

	fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quant, E> {
		Ok(Quant::from_int(v as i128))
	}

	fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quant, E> {
		Ok(Quant::from_int(v as i128))
	}

	fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quant, E> {
		Quant::from_str(&v.to_string()).map_err(de::Error::custom)
	}
}

impl<'de> Deserialize<'de> for Quant {
	fn deserialize<D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Quant, D::Error> {
		deserializer.deserialize_any(QuantVisitor)
	}
}

// -----------------
// -- BOILERPLATE --
// -----------------

impl Mul for Quant {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self::Output {
		// cross-reduce first to limit overflow
		let gcd_a = Self::gcd(self.numerator, rhs.denominator);
		let gcd_b = Self::gcd(rhs.numerator, self.denominator);

		let numerator =
			(self.numerator / gcd_a) * (rhs.numerator / gcd_b);
		let denominator =
			(self.denominator / gcd_b) * (rhs.denominator / gcd_a);

		let mut out = Self {
			numerator,
			denominator,
			is_negative: self.is_negative ^ rhs.is_negative,
			render_precision: self
				.render_precision
				.max(rhs.render_precision),
		};
		out.normalize();
		out
	}
}

impl Div for Quant {
	type Output = Self;

	fn div(self, rhs: Self) -> Self::Output {
		self * rhs.recip()
	}
}

impl Sub for Quant {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self::Output {
		let gcd = Self::gcd(self.denominator, rhs.denominator);
		let lcm = self.denominator / gcd * rhs.denominator;

		let left = self.numerator * (lcm / self.denominator);
		let right = rhs.numerator * (lcm / rhs.denominator);

		// signed arithmetic on unsigned magnitudes
		let (magnitude, is_negative) =
			match (self.is_negative, rhs.is_negative) {
				(false, true) => (left + right, false),
				(true, false) => (left + right, true),
				(false, false) if left >= right => (left - right, false),
				(false, false) => (right - left, true),
				(true, true) if left >= right => (left - right, true),
				(true, true) => (right - left, false),
			};

		let mut out = Self {
			numerator: magnitude,
			denominator: lcm,
			is_negative,
			render_precision: self
				.render_precision
				.max(rhs.render_precision),
		};
		out.normalize();
		out
	}
}

impl Neg for Quant {
	type Output = Self;

	fn neg(self) -> Self::Output {
		let mut out = Self {
			is_negative: !self.is_negative,
			..self
		};
		out.normalize();
		out
	}
}

impl PartialEq for Quant {
	fn eq(&self, other: &Self) -> bool {
		self.is_negative == other.is_negative
			&& self.numerator * other.denominator
				== other.numerator * self.denominator
	}
}

impl Eq for Quant {}

impl PartialOrd for Quant {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Quant {
	fn cmp(&self, other: &Self) -> Ordering {
		if self.numerator == 0 && other.numerator == 0 {
			return Ordering::Equal;
		}

		match (self.is_negative, other.is_negative) {
			(true, false) => return Ordering::Less,
			(false, true) => return Ordering::Greater,
			_ => {},
		}

		let gcd = Self::gcd(self.denominator, other.denominator);
		let lcm = self.denominator / gcd * other.denominator;

		let left = self.numerator * (lcm / self.denominator);
		let right = other.numerator * (lcm / other.denominator);

		if self.is_negative {
			right.cmp(&left)
		} else {
			left.cmp(&right)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	mod parsing {
		use super::*;

		#[test]
		fn test_integer() {
			let q = Quant::from_str("10").unwrap();
			assert_eq!(q, Quant::from_int(10));
			assert_eq!(q.render_precision, 0);
			assert_eq!(q.to_string(), "10");
		}

		#[test]
		fn test_decimal() {
			let q = Quant::from_str("0.85").unwrap();
			assert_eq!(q.render_precision, 2);
			assert_eq!(q.to_string(), "0.85");
		}

		#[test]
		fn test_trailing_zeroes_survive() {
			let q = Quant::from_str("1095.70").unwrap();
			assert_eq!(q.to_string(), "1095.70");
		}

		#[test]
		fn test_negative() {
			let q = Quant::from_str("-3.25").unwrap();
			assert!(q.is_negative());
			assert_eq!(q.to_string(), "-3.25");
		}

		#[test]
		fn test_negative_zero_is_positive() {
			let q = Quant::from_str("-0.00").unwrap();
			assert!(!q.is_negative());
			assert!(q.is_zero());
		}

		#[test]
		fn test_rejects_garbage() {
			assert!(Quant::from_str("").is_err());
			assert!(Quant::from_str("abc").is_err());
			assert!(Quant::from_str("1.2.3").is_err());
			assert!(Quant::from_str("1.").is_err());
			assert!(Quant::from_str("1,000").is_err());
		}
	}

	mod arithmetic {
		use super::*;

		#[test]
		fn test_mul_div_exact() {
			let amount = Quant::from_str("10").unwrap();
			let rate = Quant::from_str("109.57").unwrap();
			let one = Quant::from_int(1);

			let result = amount * rate / one;
			assert_eq!(result, Quant::from_str("1095.7").unwrap());
		}

		#[test]
		fn test_identity_through_same_rate() {
			let amount = Quant::from_str("0.1").unwrap();
			let rate = Quant::from_str("0.85").unwrap();

			// exact rational math; a float would drift here
			assert_eq!(amount * rate / rate, amount);
		}

		#[test]
		fn test_sub_signs() {
			let a = Quant::from_str("1.5").unwrap();
			let b = Quant::from_str("2.25").unwrap();
			assert_eq!(a - b, -Quant::from_str("0.75").unwrap());
			assert_eq!(b - a, Quant::from_str("0.75").unwrap());
		}

		#[test]
		#[should_panic(expected = "Attempt to divide by zero")]
		fn test_div_by_zero_panics() {
			let _ = Quant::from_int(1) / Quant::zero();
		}
	}

	mod rounding {
		use super::*;

		#[test]
		fn test_round_down() {
			// 2 * 1 / 0.85 = 2.3529...
			let q =
				Quant::from_int(2) / Quant::from_str("0.85").unwrap();
			assert_eq!(q.round_half_up(2).to_string(), "2.35");
		}

		#[test]
		fn test_round_half_goes_up() {
			let q = Quant::from_str("1.005").unwrap();
			assert_eq!(q.round_half_up(2).to_string(), "1.01");

			let q = Quant::from_str("2.675").unwrap();
			assert_eq!(q.round_half_up(2).to_string(), "2.68");
		}

		#[test]
		fn test_round_pads_render_precision() {
			let q = Quant::from_int(50).round_half_up(2);
			assert_eq!(q.to_string(), "50.00");
			assert_eq!(q, Quant::from_int(50));
		}

		#[test]
		fn test_round_zero() {
			assert_eq!(
				Quant::zero().round_half_up(2).to_string(),
				"0.00"
			);
		}
	}

	mod ordering {
		use super::*;

		#[test]
		fn test_cross_denominator_compare() {
			let a = Quant::from_str("0.5").unwrap();
			let b = Quant::from_str("0.50").unwrap();
			let c = Quant::from_str("0.51").unwrap();

			assert_eq!(a, b);
			assert!(a < c);
			assert!(c > b);
		}

		#[test]
		fn test_negative_ordering() {
			let a = Quant::from_str("-1.5").unwrap();
			let b = Quant::from_str("-0.5").unwrap();
			assert!(a < b);
			assert!(b < Quant::zero());
		}
	}

	mod serde_round_trip {
		use super::*;

		#[test]
		fn test_serializes_as_string() {
			let q = Quant::from_str("1095.70").unwrap();
			assert_eq!(
				serde_json::to_string(&q).unwrap(),
				"\"1095.70\""
			);
		}

		#[test]
		fn test_deserializes_from_string() {
			let q: Quant = serde_json::from_str("\"0.85\"").unwrap();
			assert_eq!(q, Quant::from_str("0.85").unwrap());
		}

		#[test]
		fn test_deserializes_from_number() {
			// the first run of the original app seeded plain numbers
			let q: Quant = serde_json::from_str("1").unwrap();
			assert_eq!(q, Quant::from_int(1));

			let q: Quant = serde_json::from_str("0.5").unwrap();
			assert_eq!(q, Quant::from_str("0.5").unwrap());
		}

		#[test]
		fn test_rejects_other_shapes() {
			assert!(serde_json::from_str::<Quant>("[1]").is_err());
			assert!(serde_json::from_str::<Quant>("\"abc\"").is_err());
		}
	}
}
