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

use crate::constants::*;
use crate::types::{LogConfig, LogImpl};
use crate::{Log, LogLevel, Logger, LoggingType};
use nio_conf::{Config, ConfigBuilder, ConfigOption, ConfigOptionName};
use nio_deps::chrono::{DateTime, Local};
use nio_deps::colored::Colorize;
use nio_deps::rand::random;
use nio_err::*;
use std::fs::{remove_file, rename, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Instant;

// convenience macro
macro_rules! some_or_err {
	($m:expr, $errkind:expr, $text:expr) => {{
		use nio_err::*;
		match $m {
			Some(m) => Ok(m),
			None => Err(err!($errkind, $text)),
		}
	}};
}

impl std::fmt::Display for LogLevel {
	fn fmt(&self, w: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		match self {
			LogLevel::Trace => write!(w, "TRACE"),
			LogLevel::Debug => write!(w, "DEBUG"),
			LogLevel::Info => write!(w, "INFO"),
			LogLevel::Warn => write!(w, "WARN"),
			LogLevel::Error => write!(w, "ERROR"),
			LogLevel::Fatal => write!(w, "FATAL"),
		}
	}
}

impl Logger {
	pub(crate) fn new(log: Box<dyn Log + Send + Sync>) -> Self {
		Self {
			log: Arc::new(RwLock::new(log)),
		}
	}

	/// Log the specified line at the specified [`crate::LogLevel`]. This is usually called
	/// through the level macros ([`crate::trace`], [`crate::debug`], ...).
	pub fn log(&self, level: LogLevel, line: &str) -> Result<(), Error> {
		let mut log = self.log.write()?;
		(*log).log(level, line)
	}

	/// Log the specified line with no decorations.
	pub fn log_plain(&self, level: LogLevel, line: &str) -> Result<(), Error> {
		let mut log = self.log.write()?;
		(*log).log_plain(level, line)
	}

	/// Set the logging threshold of the underlying logger. All clones of this
	/// [`crate::Logger`] observe the new threshold.
	pub fn set_log_level(&self, level: LogLevel) -> Result<(), Error> {
		let mut log = self.log.write()?;
		(*log).set_log_level(level)
	}

	/// Rotate the underlying log file. See [`crate::Log::rotate`].
	pub fn rotate(&self) -> Result<(), Error> {
		let mut log = self.log.write()?;
		(*log).rotate()
	}

	/// Whether the underlying log file needs rotation. See [`crate::Log::need_rotate`].
	pub fn need_rotate(&self) -> Result<bool, Error> {
		let log = self.log.read()?;
		(*log).need_rotate()
	}

	pub(crate) fn init(&self) -> Result<(), Error> {
		let mut log = self.log.write()?;
		(*log).init()
	}
}

impl Log for LogImpl {
	// all logging goes through the log_impl fn.
	fn log(&mut self, level: LogLevel, line: &str) -> Result<(), Error> {
		self.log_impl(level, line, LoggingType::Standard)
	}
	// all logging goes through the log_impl fn.
	fn log_all(&mut self, level: LogLevel, line: &str) -> Result<(), Error> {
		self.log_impl(level, line, LoggingType::All)
	}
	// all logging goes through the log_impl fn.
	fn log_plain(&mut self, level: LogLevel, line: &str) -> Result<(), Error> {
		self.log_impl(level, line, LoggingType::Plain)
	}
	fn rotate(&mut self) -> Result<(), Error> {
		if !self.is_init {
			// log hasn't been initialized yet, return error
			let text = "log file cannot be rotated because init() was never called";
			return Err(err!(ErrKind::Log, text));
		}

		{
			// check if there's a file, if not return error
			let mut file = self.file.write()?;
			match (*file).as_mut() {
				Some(_file) => {}
				None => {
					let text = "log file cannot be rotated because there is no file associated with this logger";
					return Err(err!(ErrKind::Log, text));
				}
			}
		}

		let now: DateTime<Local> = Local::now();
		// standard rotation string format
		let rotation_string = now.format(".r_%m_%d_%Y_%T").to_string().replace(":", "-");

		let ekind = ErrKind::IllegalArgument;
		let text = "log file cannot be rotated. There is no file associated with this logger";

		// get the original file path
		let original_file_path = some_or_err!(self.config.file_path.clone(), ekind, text)?;

		// get the parent directory and the file name
		let text = "file_path has an unexpected illegal value of None for parent";
		let parent = some_or_err!(original_file_path.parent(), ekind, text)?;

		let text = "file_path has an unexpected illegal value of None for file_name";
		let file_name = some_or_err!(original_file_path.file_name(), ekind, text)?;

		let text = "file_path could not be converted to string";
		let file_name = some_or_err!(file_name.to_str(), ekind, text)?;

		// create the new rotated file
		let mut new_file_path_buf = parent.to_path_buf();
		let file_name = match file_name.rfind(".") {
			Some(pos) => &file_name[0..pos],
			_ => &file_name,
		};
		let file_name = format!("{}{}_{}.log", file_name, rotation_string, random::<u64>());
		new_file_path_buf.push(file_name);

		if self.config.delete_rotation {
			remove_file(&original_file_path.as_path())?;
		} else {
			rename(&original_file_path.as_path(), new_file_path_buf.as_path())?;
		}

		let mut open_options = OpenOptions::new();
		let open_options = open_options.append(true).create(true);
		let mut nfile = open_options.open(&original_file_path.as_path())?;
		// reopen the original file so we can continue logging
		self.check_open(&mut nfile, &original_file_path)?;

		{
			let mut file = self.file.write()?;
			*file = Some(nfile);
		}

		self.last_rotation = Instant::now();

		Ok(())
	}
	fn need_rotate(&self) -> Result<bool, Error> {
		if !self.is_init {
			return Err(err!(ErrKind::Log, "log not initialized"));
		}

		let now = Instant::now();

		let max_age_millis = self.config.max_age_millis;
		let max_size_bytes = self.config.max_size_bytes;

		// if the file is either too old or too big we need to rotate
		if now.duration_since(self.last_rotation).as_millis() > max_age_millis
			|| self.cur_size > max_size_bytes
		{
			Ok(true)
		} else {
			Ok(false)
		}
	}
	fn set_log_level(&mut self, log_level: LogLevel) -> Result<(), Error> {
		self.log_level = log_level;
		Ok(())
	}
	fn init(&mut self) -> Result<(), Error> {
		if self.is_init {
			// init already was called
			return Err(err!(ErrKind::Log, "log file has already been initialized"));
		}

		match self.config.file_path.clone().as_ref() {
			Some(path) => {
				let mut f = match File::options().append(true).open(path.as_path()) {
					Ok(f) => {
						// already exists just return file here
						f
					}
					Err(_) => {
						// try to create it
						File::create(path.as_path())?
					}
				};
				self.check_open(&mut f, path)?;

				let mut file = self.file.write()?;
				*file = Some(f);
			}
			None => {}
		}
		self.is_init = true;

		Ok(())
	}
	fn close(&mut self) -> Result<(), Error> {
		if !self.is_init {
			let ekind = ErrKind::Log;
			let text = "log file cannot be closed because init() was never called";
			return Err(err!(ekind, text));
		}
		let mut file = self.file.write()?;
		// drop handler closes the handle
		*file = None;
		Ok(())
	}
	fn set_config_option(&mut self, value: ConfigOption) -> Result<(), Error> {
		// set the specified option, LogFilePath results in an error.
		use nio_conf::ConfigOption as CO;
		let errkind = ErrKind::Configuration;
		let text = "cannot set LogFilePath after logging has been started";
		match value {
			CO::DisplayColors(v) => self.config.colors = v,
			CO::DisplayTimestamp(v) => self.config.timestamp = v,
			CO::MaxSizeBytes(v) => self.config.max_size_bytes = v,
			CO::MaxAgeMillis(v) => self.config.max_age_millis = v,
			CO::DisplayStdout(v) => self.config.stdout = v,
			CO::DisplayLogLevel(v) => self.config.level = v,
			CO::DisplayMillis(v) => self.config.show_millis = v,
			CO::AutoRotate(v) => self.config.auto_rotate = v,
			CO::DeleteRotation(v) => self.config.delete_rotation = v,
			CO::FileHeader(v) => self.config.file_header = v,
			CO::LogFilePath(_) => return Err(err!(errkind, text)),
			_ => return Err(err!(ErrKind::Configuration, "unknown config option")),
		}
		Ok(())
	}
	fn get_config_option(&self, option: ConfigOptionName) -> Result<ConfigOption, Error> {
		// get any specified options
		use nio_conf::ConfigOption as CO;
		use nio_conf::ConfigOptionName as CN;
		Ok(match option {
			CN::DisplayColors => CO::DisplayColors(self.config.colors),
			CN::DisplayTimestamp => CO::DisplayTimestamp(self.config.timestamp),
			CN::MaxSizeBytes => CO::MaxSizeBytes(self.config.max_size_bytes),
			CN::MaxAgeMillis => CO::MaxAgeMillis(self.config.max_age_millis),
			CN::DisplayStdout => CO::DisplayStdout(self.config.stdout),
			CN::DisplayLogLevel => CO::DisplayLogLevel(self.config.level),
			CN::DisplayMillis => CO::DisplayMillis(self.config.show_millis),
			CN::LogFilePath => CO::LogFilePath(self.config.file_path.clone()),
			CN::AutoRotate => CO::AutoRotate(self.config.auto_rotate),
			CN::DeleteRotation => CO::DeleteRotation(self.config.delete_rotation),
			CN::FileHeader => CO::FileHeader(self.config.file_header.clone()),
			_ => return Err(err!(ErrKind::Configuration, "unknown config option")),
		})
	}
}

impl LogImpl {
	pub(crate) fn new(configs: Vec<ConfigOption>) -> Result<Self, Error> {
		let config = LogConfig::new(configs)?;
		let log_level = LogLevel::Info;
		let cur_size = 0;
		let file = Arc::new(RwLock::new(None));
		let is_init = false;
		let last_rotation = Instant::now();
		Ok(Self {
			config,
			log_level,
			cur_size,
			file,
			is_init,
			last_rotation,
		})
	}

	fn rotate_if_needed(&mut self) -> Result<(), Error> {
		if !self.config.auto_rotate {
			return Ok(()); // auto rotate not enabled
		}

		let now = Instant::now();

		let max_age_millis = self.config.max_age_millis;
		let max_size_bytes = self.config.max_size_bytes;

		// if the file is too old or too big we rotate
		if now.duration_since(self.last_rotation).as_millis() > max_age_millis
			|| self.cur_size > max_size_bytes
		{
			self.rotate()?;
		}

		Ok(())
	}

	// check a newly opened file and write the configured header if the file is empty.
	fn check_open(&mut self, file: &mut File, path: &PathBuf) -> Result<(), Error> {
		let metadata = std::fs::metadata(path.as_path())?;
		let len = metadata.len();
		if len == 0 && self.config.file_header.len() > 0 {
			let line = format!("{}\n", self.config.file_header);
			file.write(line.as_bytes())?;
			self.cur_size = try_into!(line.len())?;
		} else {
			self.cur_size = len;
		}
		Ok(())
	}

	fn format_millis(&self, millis: i64) -> String {
		let mut millis_format = format!("{}", millis);
		if millis < 100 {
			millis_format = format!("0{}", millis_format);
		}
		if millis < 10 {
			millis_format = format!("0{}", millis_format);
		}
		millis_format
	}

	fn log_impl(
		&mut self,
		level: LogLevel,
		line: &str,
		logging_type: LoggingType,
	) -> Result<(), Error> {
		if level as usize >= self.log_level as usize {
			self.rotate_if_needed()?;
			let show_stdout = self.config.stdout || logging_type == LoggingType::All;
			let show_timestamp = self.config.timestamp && logging_type != LoggingType::Plain;
			let show_colors = self.config.colors;
			let show_log_level = self.config.level && logging_type != LoggingType::Plain;
			let show_millis = self.config.show_millis && logging_type != LoggingType::Plain;

			// call the main logging function with the specified params
			self.do_log_impl(
				show_stdout,
				show_timestamp,
				show_colors,
				show_log_level,
				show_millis,
				level,
				line,
			)?;
		}
		Ok(())
	}

	fn do_log_impl(
		&mut self,
		show_stdout: bool,
		show_timestamp: bool,
		show_colors: bool,
		show_log_level: bool,
		show_millis: bool,
		level: LogLevel,
		line: &str,
	) -> Result<(), Error> {
		// if timestamp needs to be shown we print/write it here
		if show_timestamp {
			let date = Local::now();
			let millis = date.timestamp_millis() % 1_000;
			let millis_format = self.format_millis(millis);
			let formatted_timestamp = if show_millis {
				format!("{}.{}", date.format("%Y-%m-%d %H:%M:%S"), millis_format)
			} else {
				format!("{}", date.format("%Y-%m-%d %H:%M:%S"))
			};

			{
				let mut file = self.file.write()?;
				match (*file).as_mut() {
					Some(file) => {
						let formatted_timestamp = format!("[{}]: ", formatted_timestamp);
						let formatted_timestamp = formatted_timestamp.as_bytes();
						file.write(formatted_timestamp)?;
						let formatted_len: u64 = try_into!(formatted_timestamp.len())?;
						self.cur_size += formatted_len;
					}
					None => {}
				}
			}

			if show_stdout {
				if show_colors {
					print!("[{}]: ", formatted_timestamp.to_string().dimmed());
				} else {
					print!("[{}]: ", formatted_timestamp);
				}
			}
		}
		// if log level needs to be shown we print/write it here
		if show_log_level {
			{
				let mut file = self.file.write()?;
				match (*file).as_mut() {
					Some(file) => {
						let formatted_level = if level == LogLevel::Info || level == LogLevel::Warn
						{
							format!("({})  ", level)
						} else {
							format!("({}) ", level)
						};
						let formatted_level = formatted_level.as_bytes();
						file.write(formatted_level)?;
						let formatted_len: u64 = try_into!(formatted_level.len())?;
						self.cur_size += formatted_len;
					}
					None => {}
				}
			}

			if show_stdout {
				if show_colors {
					// specific colors for each level
					match level {
						LogLevel::Trace => {
							print!("({}) ", format!("{}", level).magenta());
						}
						LogLevel::Debug => {
							print!("({}) ", format!("{}", level).cyan());
						}
						LogLevel::Info => {
							print!("({})  ", format!("{}", level).green());
						}
						LogLevel::Warn => {
							print!("({})  ", format!("{}", level).yellow());
						}
						LogLevel::Error => {
							print!("({}) ", format!("{}", level).bright_blue());
						}
						LogLevel::Fatal => {
							print!("({}) ", format!("{}", level).red());
						}
					}
				} else {
					// without color
					print!("({}) ", level);
				}
			}
		}

		// finally the line itself
		{
			let mut file = self.file.write()?;
			match (*file).as_mut() {
				Some(file) => {
					let formatted_line = format!("{}\n", line);
					let formatted_line = formatted_line.as_bytes();
					file.write(formatted_line)?;
					let formatted_len: u64 = try_into!(formatted_line.len())?;
					self.cur_size += formatted_len;
				}
				None => {}
			}
		}

		if show_stdout {
			println!("{}", line);
		}

		Ok(())
	}
}

impl LogConfig {
	pub(crate) fn new(configs: Vec<ConfigOption>) -> Result<Self, Error> {
		let config = ConfigBuilder::build_config(configs);
		config.check_config(
			vec![
				ConfigOptionName::MaxSizeBytes,
				ConfigOptionName::MaxAgeMillis,
				ConfigOptionName::DisplayColors,
				ConfigOptionName::DisplayStdout,
				ConfigOptionName::DisplayTimestamp,
				ConfigOptionName::DisplayLogLevel,
				ConfigOptionName::DisplayMillis,
				ConfigOptionName::LogFilePath,
				ConfigOptionName::AutoRotate,
				ConfigOptionName::DeleteRotation,
				ConfigOptionName::FileHeader,
			],
			vec![],
		)?;

		let max_size_bytes =
			config.get_or_u64(&ConfigOptionName::MaxSizeBytes, DEFAULT_MAX_SIZE_BYTES);
		let max_age_millis =
			config.get_or_u128(&ConfigOptionName::MaxAgeMillis, DEFAULT_MAX_AGE_MILLIS);
		let colors = config.get_or_bool(&ConfigOptionName::DisplayColors, true);
		let stdout = config.get_or_bool(&ConfigOptionName::DisplayStdout, true);
		let timestamp = config.get_or_bool(&ConfigOptionName::DisplayTimestamp, true);
		let level = config.get_or_bool(&ConfigOptionName::DisplayLogLevel, true);
		let show_millis = config.get_or_bool(&ConfigOptionName::DisplayMillis, true);
		let auto_rotate = config.get_or_bool(&ConfigOptionName::AutoRotate, false);
		let delete_rotation = config.get_or_bool(&ConfigOptionName::DeleteRotation, false);
		let file_header = config.get_or_string(&ConfigOptionName::FileHeader, "".to_string());
		let file_path = match config.get(&ConfigOptionName::LogFilePath) {
			Some(ConfigOption::LogFilePath(p)) => p,
			_ => None,
		};

		if max_size_bytes == 0 {
			let text = "MaxSizeBytes must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}

		if max_age_millis == 0 {
			let text = "MaxAgeMillis must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}

		Ok(Self {
			colors,
			stdout,
			max_size_bytes,
			max_age_millis,
			timestamp,
			level,
			show_millis,
			auto_rotate,
			file_path,
			delete_rotation,
			file_header,
		})
	}
}
