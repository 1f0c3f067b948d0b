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

use nio_err::Error;
use std::collections::HashMap;
use std::path::PathBuf;

/// The config trait allows for easy construction of configurations. Configurations can be
/// retrieved with the [`crate::Config::get`] function and configurations can be checked with the
/// [`crate::Config::check_config`] function.
pub trait Config {
	/// get the [`crate::ConfigOption`] with the specified [`crate::ConfigOptionName`], if
	/// it was specified.
	fn get(&self, name: &ConfigOptionName) -> Option<ConfigOption>;
	/// get the [`bool`] value of the specified option or the default if not specified.
	fn get_or_bool(&self, name: &ConfigOptionName, default: bool) -> bool;
	/// get the [`usize`] value of the specified option or the default if not specified.
	fn get_or_usize(&self, name: &ConfigOptionName, default: usize) -> usize;
	/// get the [`u16`] value of the specified option or the default if not specified.
	fn get_or_u16(&self, name: &ConfigOptionName, default: u16) -> u16;
	/// get the [`u64`] value of the specified option or the default if not specified.
	fn get_or_u64(&self, name: &ConfigOptionName, default: u64) -> u64;
	/// get the [`u128`] value of the specified option or the default if not specified.
	fn get_or_u128(&self, name: &ConfigOptionName, default: u128) -> u128;
	/// get the [`String`] value of the specified option or the default if not specified.
	fn get_or_string(&self, name: &ConfigOptionName, default: String) -> String;
	/// check the configuration: all specified options must be in the allowed list, all
	/// options in the required list must be specified, and no option may be specified
	/// more than once.
	fn check_config(
		&self,
		allowed: Vec<ConfigOptionName>,
		required: Vec<ConfigOptionName>,
	) -> Result<(), Error>;
}

/// Names of configuration options used throughout this repo via macro. This corresponds to the
/// values in [`crate::ConfigOption`].
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ConfigOptionName {
	MaxSizeBytes,
	MaxAgeMillis,
	DisplayColors,
	DisplayStdout,
	DisplayTimestamp,
	DisplayLogLevel,
	DisplayMillis,
	LogFilePath,
	AutoRotate,
	DeleteRotation,
	FileHeader,
	Debug,
	EvlThreads,
	EvlTimeout,
	EvlMaxEvents,
	EvlReadChunkSize,
	EvlWriteChunkSize,
}

/// Configuration options used throughout this repo via macro.
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ConfigOption {
	/// The maximum size, in bytes, of a log file before a rotation occurs.
	MaxSizeBytes(u64),
	/// The maximum age, in milliseconds, of a log file before a rotation occurs.
	MaxAgeMillis(u128),
	/// If set to true, color coding is displayed in the log.
	DisplayColors(bool),
	/// If set to true, lines are logged to standard output.
	DisplayStdout(bool),
	/// If set to true, a timestamp is displayed with each logged line.
	DisplayTimestamp(bool),
	/// If set to true, the log level is displayed with each logged line.
	DisplayLogLevel(bool),
	/// If set to true, milliseconds are included in the logged timestamp.
	DisplayMillis(bool),
	/// The path of the log file. If set to None, no file logging occurs.
	LogFilePath(Option<Box<PathBuf>>),
	/// If set to true, log files are automatically rotated.
	AutoRotate(bool),
	/// If set to true, rotated log files are deleted instead of renamed.
	DeleteRotation(bool),
	/// A header line placed at the top of each log file.
	FileHeader(String),
	/// Debugging option, used in tests only.
	Debug(bool),
	/// The number of worker threads (and therefore event loops) of a worker pool.
	EvlThreads(usize),
	/// The maximum time, in milliseconds, an event loop blocks waiting for readiness.
	EvlTimeout(u16),
	/// The maximum number of readiness events returned by a single wait call.
	EvlMaxEvents(usize),
	/// The maximum number of bytes read per read attempt while servicing a read request.
	EvlReadChunkSize(usize),
	/// The maximum number of bytes written per write attempt while servicing a write request.
	EvlWriteChunkSize(usize),
}

/// A builder struct which can be used to build configs. This is typically done using the
/// [`crate::config!`] macro which calls this builder.
pub struct ConfigBuilder {}

// Crate local structures

#[derive(Clone, Debug)]
pub(crate) struct ConfigImpl {
	pub(crate) configs: Vec<ConfigOption>,
	pub(crate) hash: HashMap<ConfigOptionName, ConfigOption>,
}
