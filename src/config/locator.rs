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
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::PathBuf;

/// Fetches the config from the given path, or the default path if
/// none. The default file is created empty on first use; a custom path
/// must already exist.
pub fn load_config(
	custom_config_path: Option<&String>,
) -> Result<Config, Error> {
	let config_path = match custom_config_path {
		None => config_dir().join("config.toml"),
		Some(p) => PathBuf::from(p),
	};

	if !config_path.exists() && custom_config_path.is_none() {
		if let Some(parent) = config_path.parent() {
			fs::create_dir_all(parent)?;
		}
		File::create(config_path.clone())?;
	}

	let content = fs::read_to_string(config_path)?;
	let config: Config = toml::from_str(&content)
		.map_err(|e| anyhow!("failed to parse config: {}", e))?;

	Ok(config)
}

/// Resolves where the state file lives. Precedence: command-line flag,
/// then config, then the default next to the config file.
pub fn state_path(
	custom_state_path: Option<&String>,
	config: &Config,
) -> PathBuf {
	if let Some(p) = custom_state_path {
		return PathBuf::from(p);
	}

	if let Some(p) = &config.state_path {
		return PathBuf::from(p);
	}

	config_dir().join("state.json")
}

fn config_dir() -> PathBuf {
	let home = home_dir()
		.unwrap_or_else(|| panic!("Unable to determine home directory"));
	home.join(".config/convr")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_state_path_precedence() {
		let config = Config {
			state_path: Some("/tmp/from-config.json".to_string()),
			..Default::default()
		};

		let flag = "/tmp/from-flag.json".to_string();
		assert_eq!(
			state_path(Some(&flag), &config),
			PathBuf::from("/tmp/from-flag.json")
		);

		assert_eq!(
			state_path(None, &config),
			PathBuf::from("/tmp/from-config.json")
		);
	}

	#[test]
	fn test_state_path_default_is_in_config_dir() {
		let config = Config::default();
		let path = state_path(None, &config);
		assert!(path.ends_with(".config/convr/state.json"));
	}

	#[test]
	fn test_load_config_missing_custom_path_errors() {
		let custom = "/no/such/convr/config.toml".to_string();
		assert!(load_config(Some(&custom)).is_err());
	}

	#[test]
	fn test_load_config_custom_path() {
		let path = std::env::temp_dir().join(format!(
			"convr-config-test-{}.toml",
			std::process::id()
		));
		fs::write(&path, "as_of = \"2024-11-01\"\n").unwrap();

		let custom = path.display().to_string();
		let config = load_config(Some(&custom)).unwrap();
		assert_eq!(config.as_of.as_deref(), Some("2024-11-01"));

		let _ = fs::remove_file(&path);
	}
}
