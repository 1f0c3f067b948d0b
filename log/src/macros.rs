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

/// The [`crate::trace`] macro logs the formatted line at the [`crate::LogLevel::Trace`] level
/// using the specified [`crate::Logger`] capability. The line will only be displayed if the
/// logger's threshold permits it. The remaining parameters are formatted as if they were
/// parameters sent to [`std::format`].
///
/// # Examples
///```
/// use nio_conf::*;
/// use nio_err::*;
/// use nio_log::*;
///
/// fn main() -> Result<(), Error> {
///     let logger = LogBuilder::build_logger(vec![])?;
///     logger.set_log_level(LogLevel::Trace)?;
///
///     trace!(logger, "this is a test")?;
///
///     // formatting can be used just like println! and format!
///     trace!(logger, "1 + 1 = {}", 2)?;
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! trace {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Trace, &format!($($values)*)[..])
	}};
}

/// Same as [`crate::trace`] but logs at the [`crate::LogLevel::Debug`] level.
#[macro_export]
macro_rules! debug {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Debug, &format!($($values)*)[..])
	}};
}

/// Same as [`crate::trace`] but logs at the [`crate::LogLevel::Info`] level.
#[macro_export]
macro_rules! info {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Info, &format!($($values)*)[..])
	}};
}

/// Same as [`crate::trace`] but logs at the [`crate::LogLevel::Warn`] level.
#[macro_export]
macro_rules! warn {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Warn, &format!($($values)*)[..])
	}};
}

/// Same as [`crate::trace`] but logs at the [`crate::LogLevel::Error`] level.
#[macro_export]
macro_rules! error {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Error, &format!($($values)*)[..])
	}};
}

/// Same as [`crate::trace`] but logs at the [`crate::LogLevel::Fatal`] level.
#[macro_export]
macro_rules! fatal {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log(LogLevel::Fatal, &format!($($values)*)[..])
	}};
}

/// The [`crate::info_plain`] macro is identical to the [`crate::info`] macro except that just
/// the formatted log line is logged with no timestamp, log level, or line number.
#[macro_export]
macro_rules! info_plain {
	($logger:expr, $($values:tt)*) => {{
		use nio_log::LogLevel;
		$logger.log_plain(LogLevel::Info, &format!($($values)*)[..])
	}};
}
