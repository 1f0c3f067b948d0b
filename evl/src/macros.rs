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

/// Builds a [`crate::WorkerPool`] with the specified [`crate::ConnectionHandler`], the
/// specified [`nio_log::Logger`], and an optional list of [`nio_conf::ConfigOption`] values.
/// See [`crate::EvlBuilder::build_worker_pool`].
///
/// # Examples
///
///```
/// use nio_conf::*;
/// use nio_err::*;
/// use nio_evl::*;
/// use nio_log::*;
/// use std::sync::Arc;
///
/// struct NoopHandler {}
///
/// impl ConnectionHandler for NoopHandler {
///     fn handle_init(&self, _connection: Arc<Connection>) -> Result<(), Error> {
///         Ok(())
///     }
/// }
///
/// fn main() -> Result<(), Error> {
///     let logger = LogBuilder::build_logger(vec![ConfigOption::DisplayStdout(false)])?;
///     let handler = Arc::new(NoopHandler {});
///
///     let mut pool = worker_pool!(handler, logger, EvlThreads(2), EvlTimeout(100))?;
///     pool.start()?;
///     pool.shutdown()?;
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! worker_pool {
	($handler:expr, $logger:expr) => {{
		worker_pool!($handler, $logger,)
	}};
	($handler:expr, $logger:expr, $($config:expr),*) => {{
		use nio_conf::ConfigOption::*;
		use nio_evl::EvlBuilder;
		let config_values = vec![$($config),*];
		EvlBuilder::build_worker_pool(config_values, $handler, &$logger)
	}};
}

/// Builds an [`crate::EventLoop`] with the specified [`nio_log::Logger`] and an optional list
/// of [`nio_conf::ConfigOption`] values. See [`crate::EvlBuilder::build_event_loop`].
#[macro_export]
macro_rules! event_loop {
	($logger:expr) => {{
		event_loop!($logger,)
	}};
	($logger:expr, $($config:expr),*) => {{
		use nio_conf::ConfigOption::*;
		use nio_evl::EvlBuilder;
		let config_values = vec![$($config),*];
		EvlBuilder::build_event_loop(config_values, &$logger)
	}};
}
