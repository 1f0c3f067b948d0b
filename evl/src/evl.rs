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
use crate::types::{Event, EventHandler, EventLoopConfig, PollData};
use crate::{EventLoop, Interest};
use nio_conf::ConfigOptionName as CN;
use nio_conf::{Config, ConfigBuilder, ConfigOption};
use nio_err::*;
use nio_log::Logger;
use nio_log::{debug, info, trace, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

impl EventLoop {
	pub(crate) fn new(configs: Vec<ConfigOption>, logger: Logger) -> Result<Self, Error> {
		let config = Self::build_config(configs)?;
		let selector = create_selector_impl()?;
		debug!(logger, "created event loop with selector {}", selector)?;

		Ok(Self {
			selector,
			handlers: Mutex::new(HashMap::new()),
			loop_enabled: AtomicBool::new(true),
			in_loop: AtomicBool::new(false),
			config,
			logger,
		})
	}

	fn build_config(configs: Vec<ConfigOption>) -> Result<EventLoopConfig, Error> {
		let config = ConfigBuilder::build_config(configs);
		config.check_config(
			vec![
				CN::EvlTimeout,
				CN::EvlMaxEvents,
				CN::EvlReadChunkSize,
				CN::EvlWriteChunkSize,
				CN::Debug,
			],
			vec![],
		)?;

		let timeout = config.get_or_u16(&CN::EvlTimeout, EVL_DEFAULT_TIMEOUT);
		let max_events = config.get_or_usize(&CN::EvlMaxEvents, EVL_DEFAULT_MAX_EVENTS);
		let evlrcs = &CN::EvlReadChunkSize;
		let read_chunk_size = config.get_or_usize(evlrcs, EVL_DEFAULT_READ_CHUNK_SIZE);
		let evlwcs = &CN::EvlWriteChunkSize;
		let write_chunk_size = config.get_or_usize(evlwcs, EVL_DEFAULT_WRITE_CHUNK_SIZE);
		let debug = config.get_or_bool(&CN::Debug, false);

		if timeout == 0 {
			let text = "EvlTimeout must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}

		if max_events == 0 {
			let text = "EvlMaxEvents must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}

		if read_chunk_size == 0 || write_chunk_size == 0 {
			let text = "EvlReadChunkSize and EvlWriteChunkSize must not be 0";
			return Err(err!(ErrKind::Configuration, text));
		}

		let evlc = EventLoopConfig {
			max_events,
			timeout,
			read_chunk_size,
			write_chunk_size,
			debug,
		};
		Ok(evlc)
	}

	/// Register the specified handle for the specified [`crate::Interest`] categories and
	/// associate the specified [`crate::types::EventHandler`] with it.
	/// # Errors
	/// [`nio_err::ErrKind::DuplicateRegistration`] - if the handle is already registered
	/// with this event loop.
	/// [`nio_err::ErrKind::Errno`] - if the kernel facility reports an error.
	pub fn add_event(
		&self,
		handle: Handle,
		interest: Interest,
		handler: EventHandler,
	) -> Result<(), Error> {
		let mut handlers = self.handlers.lock()?;
		if handlers.contains_key(&handle) {
			let fmt = format!("handle {} is already registered", handle);
			return Err(err!(ErrKind::DuplicateRegistration, fmt));
		}
		selector_add_impl(self.selector, handle, interest)?;
		handlers.insert(handle, PollData { interest, handler });
		trace!(self.logger, "added handle={}, interest={:?}", handle, interest)?;
		Ok(())
	}

	/// Atomically update the [`crate::Interest`] categories and the handler associated with
	/// a registered handle.
	/// # Errors
	/// [`nio_err::ErrKind::NotRegistered`] - if the handle is not registered with this
	/// event loop.
	/// [`nio_err::ErrKind::Errno`] - if the kernel facility reports an error.
	pub fn modify_event(
		&self,
		handle: Handle,
		interest: Interest,
		handler: EventHandler,
	) -> Result<(), Error> {
		let mut handlers = self.handlers.lock()?;
		match handlers.get_mut(&handle) {
			Some(poll_data) => {
				selector_modify_impl(self.selector, handle, interest)?;
				poll_data.interest = interest;
				poll_data.handler = handler;
				trace!(
					self.logger,
					"modified handle={}, interest={:?}",
					handle,
					interest
				)?;
				Ok(())
			}
			None => {
				let fmt = format!("handle {} is not registered", handle);
				Err(err!(ErrKind::NotRegistered, fmt))
			}
		}
	}

	/// Deregister the specified handle from this event loop.
	/// # Errors
	/// [`nio_err::ErrKind::NotRegistered`] - if the handle is not registered with this
	/// event loop.
	/// [`nio_err::ErrKind::Errno`] - if the kernel facility reports an error.
	pub fn remove_event(&self, handle: Handle) -> Result<(), Error> {
		let mut handlers = self.handlers.lock()?;
		match handlers.remove(&handle) {
			Some(_) => {
				selector_remove_impl(self.selector, handle)?;
				trace!(self.logger, "removed handle={}", handle)?;
				Ok(())
			}
			None => {
				let fmt = format!("handle {} is not registered", handle);
				Err(err!(ErrKind::NotRegistered, fmt))
			}
		}
	}

	/// Run the blocking wait/dispatch cycle of this event loop on the calling thread. The
	/// cycle continues until [`crate::EventLoop::disable_loop`] is called. Disabling the
	/// loop from within a handler takes effect after the current dispatch batch completes.
	/// Any kernel facility error other than a retryable interruption terminates the cycle
	/// and is returned to the caller.
	pub fn event_loop(&self) -> Result<(), Error> {
		self.in_loop.store(true, Ordering::SeqCst);
		let res = self.event_loop_impl();
		self.in_loop.store(false, Ordering::SeqCst);
		res
	}

	fn event_loop_impl(&self) -> Result<(), Error> {
		let mut ctx = SelectorContext::new(self.config.max_events);
		let mut events: Vec<Event> = vec![];
		let mut count = 0u128;

		while self.loop_enabled.load(Ordering::SeqCst) {
			let event_count =
				selector_wait_impl(self.selector, &mut ctx, &mut events, self.config.timeout)?;

			if self.config.debug {
				info!(self.logger, "event loop {}, {} events", count, event_count)?;
			}

			// dispatch in the order the kernel returned the events. the handler is
			// resolved per event so a handle removed earlier in the batch is skipped.
			for i in 0..event_count {
				let event = events[i];
				let handler = {
					let handlers = self.handlers.lock()?;
					match handlers.get(&event.handle) {
						Some(poll_data) => Some(poll_data.handler.clone()),
						None => None,
					}
				};

				match handler {
					Some(handler) => {
						// invoked with the registration lock released so the
						// handler may call add/modify/remove itself
						match (*handler)(&event) {
							Ok(_) => {}
							Err(e) => {
								warn!(
									self.logger,
									"handler for handle {} generated error: {}",
									event.handle,
									e
								)?;
							}
						}
					}
					None => {
						trace!(
							self.logger,
							"no handler for handle {}, removed mid batch",
							event.handle
						)?;
					}
				}
			}
			count += 1;
		}

		debug!(self.logger, "event loop stopped after {} cycles", count)?;
		Ok(())
	}

	/// Allow the wait/dispatch cycle to run. Loops are enabled on creation; this only needs
	/// to be called if [`crate::EventLoop::disable_loop`] was used.
	pub fn enable_loop(&self) {
		self.loop_enabled.store(true, Ordering::SeqCst);
	}

	/// Stop the wait/dispatch cycle. An in-flight dispatch batch still completes.
	pub fn disable_loop(&self) {
		self.loop_enabled.store(false, Ordering::SeqCst);
	}

	/// Whether the wait/dispatch cycle is currently enabled.
	pub fn is_loop_enabled(&self) -> bool {
		self.loop_enabled.load(Ordering::SeqCst)
	}

	/// Whether a thread is currently inside [`crate::EventLoop::event_loop`].
	pub fn is_in_loop(&self) -> bool {
		self.in_loop.load(Ordering::SeqCst)
	}

	/// The number of handles currently registered with this event loop.
	pub fn registered_count(&self) -> Result<usize, Error> {
		let handlers = self.handlers.lock()?;
		Ok(handlers.len())
	}

	pub(crate) fn read_chunk_size(&self) -> usize {
		self.config.read_chunk_size
	}

	pub(crate) fn write_chunk_size(&self) -> usize {
		self.config.write_chunk_size
	}
}

impl Drop for EventLoop {
	fn drop(&mut self) {
		let _ = close_impl(self.selector);
	}
}
