// Copyright (c) 2024, The Nio Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::types::ConfigImpl;
use crate::{Config, ConfigOption, ConfigOption::*, ConfigOptionName as CN};
use nio_err::*;
use std::collections::{HashMap, HashSet};

// macro to simplify the process of checking the parameters
macro_rules! cc {
	($self:expr, $set:expr, $specified:expr, $option_name:expr) => {{
		let config_option_name = $option_name;
		let i = $option_name as usize;
		$self.check_set(&$set, &config_option_name)?;
		$self.check_index(i, $specified, format!("{:?}", config_option_name))?;
	}};
}

// Config implementation just return values from the Impl structure.
impl Config for ConfigImpl {
	fn get(&self, name: &CN) -> Option<ConfigOption> {
		self.hash.get(name).cloned()
	}

	fn get_or_bool(&self, name: &CN, default: bool) -> bool {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::DisplayColors(v) => *v,
				ConfigOption::DisplayStdout(v) => *v,
				ConfigOption::DisplayTimestamp(v) => *v,
				ConfigOption::DisplayLogLevel(v) => *v,
				ConfigOption::DisplayMillis(v) => *v,
				ConfigOption::AutoRotate(v) => *v,
				ConfigOption::DeleteRotation(v) => *v,
				ConfigOption::Debug(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_usize(&self, name: &CN, default: usize) -> usize {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::EvlThreads(v) => *v,
				ConfigOption::EvlMaxEvents(v) => *v,
				ConfigOption::EvlReadChunkSize(v) => *v,
				ConfigOption::EvlWriteChunkSize(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u16(&self, name: &CN, default: u16) -> u16 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::EvlTimeout(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u64(&self, name: &CN, default: u64) -> u64 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::MaxSizeBytes(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_u128(&self, name: &CN, default: u128) -> u128 {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::MaxAgeMillis(v) => *v,
				_ => default,
			},
			None => default,
		}
	}

	fn get_or_string(&self, name: &CN, default: String) -> String {
		match self.hash.get(name) {
			Some(v) => match v {
				ConfigOption::FileHeader(v) => v.to_string(),
				_ => default,
			},
			None => default,
		}
	}

	fn check_config(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		self.check_config_impl(allowed, required)
	}
}

impl ConfigImpl {
	// create a new config based on the specified input.
	pub fn new(configs: Vec<ConfigOption>) -> Self {
		// create a hashmap to insert configs for the ability to look them up later.
		let mut hash = HashMap::new();
		for config in &configs {
			let _ = match config {
				MaxSizeBytes(_) => hash.insert(CN::MaxSizeBytes, config.clone()),
				MaxAgeMillis(_) => hash.insert(CN::MaxAgeMillis, config.clone()),
				DisplayColors(_) => hash.insert(CN::DisplayColors, config.clone()),
				DisplayStdout(_) => hash.insert(CN::DisplayStdout, config.clone()),
				DisplayTimestamp(_) => hash.insert(CN::DisplayTimestamp, config.clone()),
				DisplayLogLevel(_) => hash.insert(CN::DisplayLogLevel, config.clone()),
				DisplayMillis(_) => hash.insert(CN::DisplayMillis, config.clone()),
				LogFilePath(_) => hash.insert(CN::LogFilePath, config.clone()),
				AutoRotate(_) => hash.insert(CN::AutoRotate, config.clone()),
				DeleteRotation(_) => hash.insert(CN::DeleteRotation, config.clone()),
				FileHeader(_) => hash.insert(CN::FileHeader, config.clone()),
				Debug(_) => hash.insert(CN::Debug, config.clone()),
				EvlThreads(_) => hash.insert(CN::EvlThreads, config.clone()),
				EvlTimeout(_) => hash.insert(CN::EvlTimeout, config.clone()),
				EvlMaxEvents(_) => hash.insert(CN::EvlMaxEvents, config.clone()),
				EvlReadChunkSize(_) => hash.insert(CN::EvlReadChunkSize, config.clone()),
				EvlWriteChunkSize(_) => hash.insert(CN::EvlWriteChunkSize, config.clone()),
			};
		}
		Self { configs, hash }
	}

	// check the config: 1.) for duplicates, 2.) for allowed input 3.) for the required input.
	pub fn check_config_impl(&self, allowed: Vec<CN>, required: Vec<CN>) -> Result<(), Error> {
		let mut t = HashSet::new();
		let mut s = vec![];
		for a in &allowed {
			t.insert(a);
		}

		// the cc macro handles #1 and #2 above
		for v in &self.configs {
			match v {
				MaxSizeBytes(_) => cc!(self, t, &mut s, CN::MaxSizeBytes),
				MaxAgeMillis(_) => cc!(self, t, &mut s, CN::MaxAgeMillis),
				DisplayColors(_) => cc!(self, t, &mut s, CN::DisplayColors),
				DisplayStdout(_) => cc!(self, t, &mut s, CN::DisplayStdout),
				DisplayTimestamp(_) => cc!(self, t, &mut s, CN::DisplayTimestamp),
				DisplayLogLevel(_) => cc!(self, t, &mut s, CN::DisplayLogLevel),
				DisplayMillis(_) => cc!(self, t, &mut s, CN::DisplayMillis),
				LogFilePath(_) => cc!(self, t, &mut s, CN::LogFilePath),
				AutoRotate(_) => cc!(self, t, &mut s, CN::AutoRotate),
				DeleteRotation(_) => cc!(self, t, &mut s, CN::DeleteRotation),
				FileHeader(_) => cc!(self, t, &mut s, CN::FileHeader),
				Debug(_) => cc!(self, t, &mut s, CN::Debug),
				EvlThreads(_) => cc!(self, t, &mut s, CN::EvlThreads),
				EvlTimeout(_) => cc!(self, t, &mut s, CN::EvlTimeout),
				EvlMaxEvents(_) => cc!(self, t, &mut s, CN::EvlMaxEvents),
				EvlReadChunkSize(_) => cc!(self, t, &mut s, CN::EvlReadChunkSize),
				EvlWriteChunkSize(_) => cc!(self, t, &mut s, CN::EvlWriteChunkSize),
			}
		}

		// #3 is covered here (required)
		let s_len = s.len();
		for v in required {
			let v_as_usize = v.clone() as usize;
			if v_as_usize >= s_len || !s[v_as_usize] {
				return Err(err!(
					ErrKind::Configuration,
					"{:?} was required and not specified",
					v
				));
			}
		}

		Ok(())
	}

	// convenience fn to check if the set contains this option and returns appropriate error
	fn check_set(&self, set: &HashSet<&CN>, option: &CN) -> Result<(), Error> {
		if set.contains(option) {
			Ok(())
		} else {
			Err(err!(ErrKind::Configuration, "{:?} is not allowed", option))
		}
	}

	// this checks for duplicates
	fn check_index(&self, i: usize, specified: &mut Vec<bool>, name: String) -> Result<(), Error> {
		if specified.len() <= i {
			specified.resize(i + 1, false);
		}

		if specified[i] {
			Err(err!(
				ErrKind::Configuration,
				"{} was specified more than once",
				name
			))
		} else {
			specified[i] = true;
			Ok(())
		}
	}
}
