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

//! # The Nio Logging crate
//! This crate implements the logging used by the other crates in this repository. Loggers are
//! built with the [`crate::LogBuilder`] and handed to components as an explicit [`crate::Logger`]
//! capability. There is deliberately no process-wide logger: every component that logs holds a
//! [`crate::Logger`] handle it was given at construction time, so library users fully control
//! where diagnostics go. The [`crate::Logger`] is cheap to clone and may be shared freely
//! between threads.
//!
//! Log lines may be directed to standard output and/or a log file, optionally with timestamps,
//! log levels, and color coding. Log files may be rotated based on size and/or age.
//!
//! # Examples
//!
//!```
//! use nio_conf::*;
//! use nio_err::*;
//! use nio_log::*;
//!
//! fn main() -> Result<(), Error> {
//!     // build a logger that logs to stdout only
//!     let logger = LogBuilder::build_logger(vec![
//!         ConfigOption::DisplayColors(false),
//!         ConfigOption::DisplayMillis(false),
//!     ])?;
//!
//!     logger.set_log_level(LogLevel::Debug)?;
//!     debug!(logger, "this is a test")?;
//!     info!(logger, "1 + 1 = {}", 2)?;
//!
//!     // trace is below the configured threshold so this line is filtered
//!     trace!(logger, "will not show up")?;
//!
//!     Ok(())
//! }
//!```

mod builder;
mod constants;
mod log;
mod macros;
mod types;

pub use crate::types::{Log, LogBuilder, LogLevel, Logger, LoggingType};
