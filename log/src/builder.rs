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

use crate::types::LogImpl;
use crate::{Log, LogBuilder, Logger};
use nio_conf::ConfigOption;
use nio_err::Error;

impl LogBuilder {
	/// Builds a [`crate::Log`] implementation with the specified vector of
	/// [`nio_conf::ConfigOption`]. The returned logger has not been initialized.
	pub fn build_log(configs: Vec<ConfigOption>) -> Result<Box<dyn Log + Send + Sync>, Error> {
		Ok(Box::new(LogImpl::new(configs)?))
	}

	/// Builds a [`crate::Logger`] capability handle with the specified vector of
	/// [`nio_conf::ConfigOption`]. The underlying logger is initialized before it is
	/// returned, so the handle is immediately usable and may be cloned and passed to any
	/// component that needs to log.
	pub fn build_logger(configs: Vec<ConfigOption>) -> Result<Logger, Error> {
		let logger = Logger::new(Self::build_log(configs)?);
		logger.init()?;
		Ok(logger)
	}
}
