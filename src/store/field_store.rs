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
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Durably remembers named scalar values across runs, with safe
/// fallback whenever storage misbehaves. The backing file is a single
/// JSON object of key -> value.
///
/// The in-memory cache is authoritative for the current run: callers
/// always see the last value they set, whether or not it ever reached
/// disk. Durability is best-effort; a failed write is logged, then
/// forgotten. Nothing in here returns an error to a caller.
pub struct FieldStore {
	/// None runs the store purely in memory, for tests and for the
	/// case where no usable state location exists.
	path: Option<PathBuf>,

	cache: BTreeMap<String, Value>,
}

impl FieldStore {
	/// Opens the store backed by the given file. A missing file is a
	/// first run; an unreadable or corrupt one is logged and treated
	/// as empty rather than surfaced.
	pub fn open(path: PathBuf) -> Self {
		let mut cache = BTreeMap::new();

		if path.exists() {
			match fs::read_to_string(&path) {
				Ok(content) => match serde_json::from_str(&content) {
					Ok(stored) => cache = stored,
					Err(e) => eprintln!(
						"warning: state file {} is corrupt, starting fresh: {}",
						path.display(),
						e
					),
				},
				Err(e) => eprintln!(
					"warning: could not read state file {}: {}",
					path.display(),
					e
				),
			}
		}

		Self {
			path: Some(path),
			cache,
		}
	}

	pub fn in_memory() -> Self {
		Self {
			path: None,
			cache: BTreeMap::new(),
		}
	}

	/// Reads the value stored under `key`. Absent keys yield the
	/// initial value silently; a stored value that no longer
	/// deserializes as a T is logged and also yields the initial
	/// value.
	pub fn get<T: DeserializeOwned>(&self, key: &str, initial: T) -> T {
		match self.cache.get(key) {
			None => initial,
			Some(value) => {
				match serde_json::from_value(value.clone()) {
					Ok(stored) => stored,
					Err(e) => {
						eprintln!(
							"warning: stored value for {} is unreadable, using default: {}",
							key, e
						);
						initial
					},
				}
			},
		}
	}

	/// Stores a value under `key`: cache first, then a single
	/// best-effort attempt to persist. Write failures are logged and
	/// swallowed; the cached value stands for the rest of the run.
	pub fn set<T: Serialize>(&mut self, key: &str, value: T) {
		match serde_json::to_value(value) {
			Ok(value) => {
				self.cache.insert(key.to_string(), value);
			},
			Err(e) => {
				eprintln!(
					"warning: value for {} is not serializable: {}",
					key, e
				);
				return;
			},
		}

		self.persist();
	}

	/// The function-of-previous-value form of `set`, for callers that
	/// derive the new value from the old one.
	pub fn update<T, F>(&mut self, key: &str, initial: T, f: F)
	where
		T: Serialize + DeserializeOwned,
		F: FnOnce(T) -> T,
	{
		let next = f(self.get(key, initial));
		self.set(key, next);
	}

	fn persist(&self) {
		let Some(path) = &self.path else {
			return;
		};

		if let Some(parent) = path.parent() {
			if let Err(e) = fs::create_dir_all(parent) {
				eprintln!(
					"warning: could not create state directory {}: {}",
					parent.display(),
					e
				);
				return;
			}
		}

		// to_string on a map of Values cannot fail; the write can
		match serde_json::to_string_pretty(&self.cache) {
			Ok(payload) => {
				if let Err(e) = fs::write(path, payload) {
					eprintln!(
						"warning: could not write state file {}: {}",
						path.display(),
						e
					);
				}
			},
			Err(e) => {
				eprintln!("warning: could not serialize state: {}", e)
			},
		}
	}
}
