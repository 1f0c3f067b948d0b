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

use nio_conf::{ConfigOption, ConfigOptionName};
use nio_err::Error;
use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// The type of logging to perform. This is generally selected through the distinct
/// [`crate::Log`] functions rather than specified directly.
#[derive(PartialEq)]
pub enum LoggingType {
	/// Log with all configured decorations, to the configured destinations.
	Standard,
	/// Log the line only, with no timestamp, level, or colors.
	Plain,
	/// Log with decorations and write to standard output even if stdout is not configured.
	All,
}

/// Standard 6 log levels.
#[derive(PartialEq, Copy, Clone)]
pub enum LogLevel {
	/// Very fine grained logging information that should not generally be visible except for
	/// debugging purposes
	Trace,
	/// Debugging information
	Debug,
	/// Standard information that is usually displayed to the user under most circumstances
	Info,
	/// Warning of something that the user should be aware of, although it may not be an error
	Warn,
	/// Error that the user must be aware of
	Error,
	/// Fatal error that usually causes the application to be unusable
	Fatal,
}

/// The log trait is implemented by the value returned by [`crate::LogBuilder::build_log`].
/// Most use is through the [`crate::Logger`] handle instead.
pub trait Log {
	/// Log the specified line at the specified [`crate::LogLevel`].
	fn log(&mut self, level: LogLevel, line: &str) -> Result<(), Error>;
	/// Same as [`crate::Log::log`], but the line is also written to standard output even if
	/// stdout logging is not configured.
	fn log_all(&mut self, level: LogLevel, line: &str) -> Result<(), Error>;
	/// Same as [`crate::Log::log`], but without any timestamp, level, or color decoration.
	fn log_plain(&mut self, level: LogLevel, line: &str) -> Result<(), Error>;
	/// Rotate the underlying log file. An error is returned if no log file is configured.
	fn rotate(&mut self) -> Result<(), Error>;
	/// Whether the underlying log file currently needs rotation based on the configured
	/// size and age limits.
	fn need_rotate(&self) -> Result<bool, Error>;
	/// Set the logging threshold. Lines below this level are filtered.
	fn set_log_level(&mut self, level: LogLevel) -> Result<(), Error>;
	/// Initialize the logger. Opens the configured log file, if any. Must be called before
	/// logging occurs.
	fn init(&mut self) -> Result<(), Error>;
	/// Close the underlying log file.
	fn close(&mut self) -> Result<(), Error>;
	/// Update a single configuration option on a running logger.
	fn set_config_option(&mut self, value: ConfigOption) -> Result<(), Error>;
	/// Retrieve a single configuration option from the logger.
	fn get_config_option(&self, option: ConfigOptionName) -> Result<ConfigOption, Error>;
}

/// A clonable handle to a [`crate::Log`] implementation. This is the capability that is
/// passed to components which need to log. Cloning is cheap and clones share the same
/// underlying logger.
#[derive(Clone)]
pub struct Logger {
	pub(crate) log: Arc<RwLock<Box<dyn Log + Send + Sync>>>,
}

/// A builder that is used to construct [`crate::Log`] and [`crate::Logger`] implementations.
pub struct LogBuilder {}

// Crate local types

#[derive(Clone)]
pub(crate) struct LogConfig {
	pub(crate) colors: bool,
	pub(crate) stdout: bool,
	pub(crate) max_size_bytes: u64,
	pub(crate) max_age_millis: u128,
	pub(crate) timestamp: bool,
	pub(crate) level: bool,
	pub(crate) show_millis: bool,
	pub(crate) auto_rotate: bool,
	pub(crate) file_path: Option<Box<PathBuf>>,
	pub(crate) delete_rotation: bool,
	pub(crate) file_header: String,
}

pub(crate) struct LogImpl {
	pub(crate) config: LogConfig,
	pub(crate) log_level: LogLevel,
	pub(crate) cur_size: u64,
	pub(crate) file: Arc<RwLock<Option<File>>>,
	pub(crate) is_init: bool,
	pub(crate) last_rotation: Instant,
}
