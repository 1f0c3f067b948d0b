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

#[cfg(target_os = "linux")]
use crate::linux::*;

use crate::{Connection, ConnectionHandler, EventLoop, EvlBuilder, WorkerPool, WorkerThread};
use nio_conf::ConfigOption;
use nio_err::Error;
use nio_log::Logger;
use std::sync::Arc;

impl EvlBuilder {
	/// Builds an [`crate::EventLoop`] with the specified vector of
	/// [`nio_conf::ConfigOption`] and the specified [`nio_log::Logger`] capability.
	/// Allowed options are `EvlTimeout`, `EvlMaxEvents`, `EvlReadChunkSize`,
	/// `EvlWriteChunkSize`, and `Debug`.
	pub fn build_event_loop(
		configs: Vec<ConfigOption>,
		logger: &Logger,
	) -> Result<Arc<EventLoop>, Error> {
		Ok(Arc::new(EventLoop::new(configs, logger.clone())?))
	}

	/// Builds a [`crate::Connection`] around the specified handle, bound to the specified
	/// [`crate::EventLoop`]. The handle must be connected and configured nonblocking. The
	/// returned connection has not been registered; see
	/// [`crate::Connection::register_event`].
	pub fn build_connection(
		handle: Handle,
		evl: &Arc<EventLoop>,
		logger: &Logger,
	) -> Result<Arc<Connection>, Error> {
		Ok(Connection::new(handle, evl.clone(), logger.clone()))
	}

	/// Builds a [`crate::WorkerThread`] which owns a newly created [`crate::EventLoop`]
	/// and invokes the specified [`crate::ConnectionHandler`] for each accepted handle.
	pub fn build_worker_thread(
		configs: Vec<ConfigOption>,
		handler: Arc<dyn ConnectionHandler>,
		logger: &Logger,
	) -> Result<WorkerThread, Error> {
		WorkerThread::new(configs, handler, logger.clone())
	}

	/// Builds a [`crate::WorkerPool`] of `EvlThreads` [`crate::WorkerThread`]s (default
	/// 4), all sharing the specified [`crate::ConnectionHandler`]. The pool is not yet
	/// running; see [`crate::WorkerPool::start`].
	pub fn build_worker_pool(
		configs: Vec<ConfigOption>,
		handler: Arc<dyn ConnectionHandler>,
		logger: &Logger,
	) -> Result<WorkerPool, Error> {
		WorkerPool::new(configs, handler, logger.clone())
	}
}
