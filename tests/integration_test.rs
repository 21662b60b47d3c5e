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
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

/// Each test drives the binary through a sequence of commands against
/// its own state file, then compares the stdout of the final command
/// to a golden file in tests/test_data.
fn execute(
	test_name: &str,
	commands: Vec<Vec<&str>>,
	should_succeed: bool,
	config_file: &str,
	expected_output_file: Option<&str>,
) {
	let state = temp_state(test_name);
	let _ = fs::remove_file(&state);
	let state = state.display().to_string();

	let config = format!("tests/test_data/{}", config_file);

	let mut last: Option<Output> = None;
	for command in &commands {
		let all_args = [
			vec!["run", "--"],
			command.clone(),
			vec!["--state", &state, "--config", &config],
		]
		.concat();

		let output = Command::new("cargo")
			.args(all_args)
			.output()
			.expect("Failed to execute process");

		last = Some(output);
	}

	let output = last.expect("no commands were run");

	if !should_succeed {
		assert!(
			!output.status.success(),
			"{} unexpectedly succeeded!",
			test_name
		);
		return;
	}

	assert!(
		output.status.success(),
		"{} failed processing: {}",
		test_name,
		String::from_utf8_lossy(&output.stderr)
	);

	let stdout = String::from_utf8_lossy(&output.stdout);

	let expected_output = fs::read_to_string(format!(
		"tests/test_data/{}",
		expected_output_file.expect("expected output file required")
	))
	.expect("Failed to read expected output file");

	assert_eq!(
		stdout.trim(),
		expected_output.trim(),
		"Output did not match for {}; expected:\n{}\ngot:\n{}",
		test_name,
		expected_output.trim(),
		stdout.trim()
	);
}

fn temp_state(test_name: &str) -> PathBuf {
	std::env::temp_dir().join(format!(
		"convr-integration-{}-{}.json",
		std::process::id(),
		test_name
	))
}

#[test]
fn test_integration_defaults() {
	execute(
		"defaults",
		vec![vec!["show"]],
		true,
		"empty_config.toml",
		Some("defaults_out.txt"),
	);
}

#[test]
fn test_integration_usd_to_kes() {
	execute(
		"usdtokes",
		vec![vec!["amt", "10"]],
		true,
		"empty_config.toml",
		Some("usd_to_kes_out.txt"),
	);
}

#[test]
fn test_integration_state_persists_across_runs() {
	execute(
		"persists",
		vec![vec!["amt", "10"], vec!["show"]],
		true,
		"empty_config.toml",
		Some("usd_to_kes_out.txt"),
	);
}

#[test]
fn test_integration_swap_is_a_relabeling() {
	execute(
		"swap",
		vec![vec!["to", "EUR"], vec!["amt", "1"], vec!["swap"]],
		true,
		"empty_config.toml",
		Some("swap_out.txt"),
	);
}

#[test]
fn test_integration_edit_after_swap_reconciles() {
	execute(
		"swapedit",
		vec![
			vec!["to", "EUR"],
			vec!["amt", "1"],
			vec!["swap"],
			vec!["amt", "2"],
		],
		true,
		"empty_config.toml",
		Some("swap_then_edit_out.txt"),
	);
}

#[test]
fn test_integration_identity_conversion() {
	execute(
		"identity",
		vec![vec!["to", "USD"], vec!["amt", "50"]],
		true,
		"empty_config.toml",
		Some("identity_out.txt"),
	);
}

#[test]
fn test_integration_output_edit_sticks() {
	execute(
		"outputedit",
		vec![vec!["out", "777.77"], vec!["show"]],
		true,
		"empty_config.toml",
		Some("output_edit_out.txt"),
	);
}

#[test]
fn test_integration_reset() {
	execute(
		"reset",
		vec![
			vec!["to", "EUR"],
			vec!["amt", "42"],
			vec!["reset"],
		],
		true,
		"empty_config.toml",
		Some("reset_out.txt"),
	);
}

#[test]
fn test_integration_lowercase_currency_accepted() {
	execute(
		"lowercase",
		vec![vec!["to", "usd"], vec!["amt", "50"]],
		true,
		"empty_config.toml",
		Some("identity_out.txt"),
	);
}

#[test]
fn test_integration_exchange_rates() {
	execute(
		"rates",
		vec![vec!["er"]],
		true,
		"empty_config.toml",
		Some("er_builtin_out.txt"),
	);
}

#[test]
fn test_integration_exchange_rates_from_config() {
	execute(
		"customrates",
		vec![vec!["er"]],
		true,
		"custom_rates.toml",
		Some("er_custom_out.txt"),
	);
}

#[test]
fn test_integration_unknown_currency_fails() {
	execute(
		"unknowncurrency",
		vec![vec!["from", "XXX"]],
		false,
		"empty_config.toml",
		None,
	);
}

#[test]
fn test_integration_malformed_amount_fails() {
	execute(
		"badamount",
		vec![vec!["amt", "ten"]],
		false,
		"empty_config.toml",
		None,
	);
}

#[test]
fn test_integration_stray_term_fails() {
	execute(
		"strayterm",
		vec![vec!["show", "USD"]],
		false,
		"empty_config.toml",
		None,
	);
}
