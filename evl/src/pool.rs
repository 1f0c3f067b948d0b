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

use crate::constants::*;
use crate::{Connection, ConnectionHandler, WorkerPool, WorkerThread};
use nio_conf::ConfigOptionName as CN;
use nio_conf::{Config, ConfigBuilder, ConfigOption};
use nio_err::*;
use nio_log::Logger;
use nio_log::{debug, error, fatal, info};
use std::sync::{Arc, Mutex};
use std::thread;

impl WorkerPool {
	pub(crate) fn new(
		configs: Vec<ConfigOption>,
		handler: Arc<dyn ConnectionHandler>,
		logger: Logger,
	) -> Result<Self, Error> {
		let threads = Self::build_config(&configs)?;

		// the remaining options configure each worker's event loop
		let evl_configs: Vec<ConfigOption> = configs
			.iter()
			.filter(|c| !matches!(c, ConfigOption::EvlThreads(_)))
			.cloned()
			.collect();

		let mut workers = vec![];
		for _ in 0..threads {
			let worker = WorkerThread::new(evl_configs.clone(), handler.clone(), logger.clone())?;
			workers.push(worker);
		}

		Ok(Self {
			workers,
			cursor: Mutex::new(0),
			jhs: vec![],
			logger,
		})
	}

	fn build_config(configs: &Vec<ConfigOption>) -> Result<usize, Error> {
		let config = ConfigBuilder::build_config(configs.clone());
		config.check_config(
			vec![
				CN::EvlThreads,
				CN::EvlTimeout,
				CN::EvlMaxEvents,
				CN::EvlReadChunkSize,
				CN::EvlWriteChunkSize,
				CN::Debug,
			],
			vec![],
		)?;

		let threads = config.get_or_usize(&CN::EvlThreads, EVL_DEFAULT_THREADS);
		if threads == 0 {
			let text = "EvlThreads must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}
		Ok(threads)
	}

	/// Start the pool: one named OS thread is spawned per worker, each running its
	/// worker's event loop. This function must be called before readiness events are
	/// dispatched, but handles may be assigned with [`crate::WorkerPool::assign`] at any
	/// time after construction.
	/// # Errors
	/// [`nio_err::ErrKind::IllegalState`] - if the pool has already been started.
	pub fn start(&mut self) -> Result<(), Error> {
		if !self.jhs.is_empty() {
			let text = "worker pool has already been started";
			return Err(err!(ErrKind::IllegalState, text));
		}

		let mut jhs = vec![];
		for (tid, worker) in self.workers.iter().enumerate() {
			let worker = worker.clone();
			let logger = self.logger.clone();
			let builder = thread::Builder::new().name(format!("nio-worker-{}", tid));
			let jh = map_err!(
				builder.spawn(move || -> Result<(), Error> {
					match worker.run() {
						Ok(_) => Ok(()),
						Err(e) => {
							// fatal for this thread. restart policy is left to
							// the operator.
							fatal!(logger, "worker thread had an unexpected error: {}", e)?;
							Err(e)
						}
					}
				}),
				ErrKind::ThreadPanic,
				"could not spawn worker thread"
			)?;
			jhs.push(jh);
		}
		self.jhs = jhs;

		info!(
			self.logger,
			"worker pool started with {} threads",
			self.workers.len()
		)?;
		Ok(())
	}

	/// Assign a newly accepted handle to the next [`crate::WorkerThread`] in round-robin
	/// order and invoke that worker's [`crate::WorkerThread::accept`]. Safe to call from an
	/// acceptor thread concurrently with the worker threads; the cursor update and worker
	/// selection are a single protected step.
	pub fn assign(&self, handle: Handle) -> Result<Arc<Connection>, Error> {
		let tid = {
			let mut cursor = self.cursor.lock()?;
			let tid = *cursor;
			*cursor = (*cursor + 1) % self.workers.len();
			tid
		};
		debug!(self.logger, "assigning handle {} to worker {}", handle, tid)?;
		self.workers[tid].accept(handle)
	}

	/// The fixed number of worker threads in this pool.
	pub fn size(&self) -> usize {
		self.workers.len()
	}

	/// The pool's workers, for load inspection via
	/// [`crate::WorkerThread::active_connection_count`].
	pub fn workers(&self) -> &Vec<WorkerThread> {
		&self.workers
	}

	/// Stop every worker's event loop and join the worker threads. In-flight dispatch
	/// batches still complete. A fatal error previously returned by a worker's event loop
	/// surfaces here.
	pub fn shutdown(&mut self) -> Result<(), Error> {
		debug!(self.logger, "stopping {} workers", self.workers.len())?;
		for worker in &self.workers {
			worker.stop();
		}

		loop {
			let jh = match self.jhs.pop() {
				Some(jh) => jh,
				None => break,
			};
			match jh.join() {
				Ok(res) => res?,
				Err(_e) => {
					let text = "worker thread panicked";
					return Err(err!(ErrKind::ThreadPanic, text));
				}
			}
		}
		Ok(())
	}
}

impl Drop for WorkerPool {
	fn drop(&mut self) {
		let stop_res = self.shutdown();
		if stop_res.is_err() {
			let _ = error!(
				self.logger,
				"error occurred while dropping: {}",
				stop_res.unwrap_err()
			);
		}
	}
}
