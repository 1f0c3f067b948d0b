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

use crate::{Connection, ConnectionHandler, EventLoop, WorkerThread};
use nio_conf::ConfigOption;
use nio_err::Error;
use nio_log::Logger;
use nio_log::{debug, info, trace};
use std::sync::Arc;

impl WorkerThread {
	pub(crate) fn new(
		configs: Vec<ConfigOption>,
		handler: Arc<dyn ConnectionHandler>,
		logger: Logger,
	) -> Result<Self, Error> {
		let evl = Arc::new(EventLoop::new(configs, logger.clone())?);
		info!(logger, "a new worker thread created")?;
		Ok(Self {
			evl,
			handler,
			logger,
		})
	}

	/// Run the owned event loop's wait/dispatch cycle on the calling thread. This is the
	/// worker thread's entire body; it returns after [`crate::WorkerThread::stop`] is
	/// called, or with an error if the event loop fails fatally.
	pub fn run(&self) -> Result<(), Error> {
		self.evl.event_loop()
	}

	/// Accept a raw handle into this worker: the handle is wrapped in a new
	/// [`crate::Connection`] bound to this worker's event loop, registered, and handed to
	/// the application's [`crate::ConnectionHandler::handle_init`], which is expected to
	/// issue the first enqueue calls that start the protocol. The handle must already be
	/// connected and configured nonblocking. The new connection is also returned so that
	/// callers wiring up outbound connections can retain it directly.
	pub fn accept(&self, handle: Handle) -> Result<Arc<Connection>, Error> {
		debug!(self.logger, "adding new handle={}", handle)?;
		let conn = Connection::new(handle, self.evl.clone(), self.logger.clone());
		conn.register_event()?;
		trace!(self.logger, "event registered for handle={}", handle)?;
		trace!(self.logger, "executing handler")?;
		self.handler.handle_init(conn.clone())?;
		Ok(conn)
	}

	/// The number of handles currently registered with this worker's event loop. Intended
	/// for load inspection, not admission control.
	pub fn active_connection_count(&self) -> Result<usize, Error> {
		self.evl.registered_count()
	}

	/// Stop this worker's event loop. An in-flight dispatch batch still completes.
	pub fn stop(&self) {
		self.evl.disable_loop();
	}
}
