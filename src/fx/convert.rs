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
use crate::util::quant::Quant;
use anyhow::Error;

/// How many decimal places a conversion result carries. Matches the
/// granularity of the amount inputs, which step in hundredths.
pub const RESULT_PRECISION: u32 = 2;

/// Converts an amount of the source currency into the target currency,
/// rounded half-up to two decimal places. Every input is an explicit
/// parameter; there is no enclosing state to go stale.
///
/// Unknown codes error via the rate lookup. Negative amounts pass
/// through unrejected; screening them is the input boundary's job.
pub fn convert(
	amount: Quant,
	source: &str,
	target: &str,
	rates: &RateTable,
) -> Result<Quant, Error> {
	let source_rate = rates.rate(source)?;
	let target_rate = rates.rate(target)?;

	Ok((amount * target_rate / source_rate)
		.round_half_up(RESULT_PRECISION))
}
