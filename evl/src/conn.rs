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

use crate::types::{
	ConnState, Event, EventHandler, OnReadComplete, OnWriteComplete, ReadRequest, WriteRequest,
};
use crate::{Connection, EventLoop, Interest};
use nio_deps::rand::random;
use nio_err::*;
use nio_log::Logger;
use nio_log::{debug, trace, warn};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

impl Connection {
	pub(crate) fn new(handle: Handle, evl: Arc<EventLoop>, logger: Logger) -> Arc<Self> {
		Arc::new(Self {
			handle,
			id: random(),
			evl,
			registered: AtomicBool::new(false),
			state: Mutex::new(ConnState {
				interest: Interest::NONE,
				closed: false,
				read_queue: VecDeque::new(),
				write_queue: VecDeque::new(),
			}),
			logger,
		})
	}

	/// Retrieves the `id` for this Connection. The id is a unique random u128 value.
	pub fn id(&self) -> u128 {
		self.id
	}

	/// Retrieves the underlying handle for this Connection.
	pub fn handle(&self) -> Handle {
		self.handle
	}

	/// Whether this connection has been closed.
	pub fn is_closed(&self) -> Result<bool, Error> {
		let state = self.state.lock()?;
		Ok(state.closed)
	}

	// the handler closure registered with the event loop. it holds a strong reference to
	// this connection which is released when the handle is deregistered.
	fn event_handler(self: &Arc<Self>) -> EventHandler {
		let conn = self.clone();
		Arc::new(move |event: &Event| conn.on_event(event))
	}

	/// First-time registration of this connection with its event loop, for peer-close/error
	/// readiness only. Repeated calls are no-ops once registered. Read/write interest is
	/// added by [`crate::Connection::enqueue_read`] / [`crate::Connection::enqueue_write`].
	pub fn register_event(self: &Arc<Self>) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		if !self.registered.swap(true, Ordering::SeqCst) {
			trace!(self.logger, "event registered for handle {}", self.handle)?;
			let mut interest = Interest::NONE;
			interest.set(Interest::HANGUP);
			self.evl.add_event(self.handle, interest, self.event_handler())?;
			state.interest = interest;
		}
		Ok(())
	}

	// idempotent deregistration, keyed on the registered flag.
	pub(crate) fn remove_event(&self) -> Result<(), Error> {
		if self.registered.swap(false, Ordering::SeqCst) {
			trace!(self.logger, "event removed for handle {}", self.handle)?;
			self.evl.remove_event(self.handle)?;
		}
		Ok(())
	}

	fn enable_event(self: &Arc<Self>, state: &mut ConnState, ec: Interest) -> Result<(), Error> {
		if !state.interest.is_set(ec) && !state.closed {
			state.interest.set(ec);
			trace!(self.logger, "enable event listen: cur={:?}", state.interest)?;
			self.evl
				.modify_event(self.handle, state.interest, self.event_handler())?;
		}
		Ok(())
	}

	fn disable_event(self: &Arc<Self>, state: &mut ConnState, ec: Interest) -> Result<(), Error> {
		if state.interest.is_set(ec) && !state.closed {
			state.interest.unset(ec);
			trace!(self.logger, "disable event listen: cur={:?}", state.interest)?;
			self.evl
				.modify_event(self.handle, state.interest, self.event_handler())?;
		}
		Ok(())
	}

	/// Append a read request for exactly `requested_len` bytes to this connection's read
	/// queue. Read requests complete strictly in the order they were enqueued; the
	/// completion callback is executed exactly once, with exactly `requested_len` bytes. If
	/// this request is the only pending read, read interest is enabled with the event loop.
	/// # Errors
	/// [`nio_err::ErrKind::ClosedConnection`] - if the connection has been closed.
	pub fn enqueue_read(
		self: &Arc<Self>,
		requested_len: usize,
		on_complete: OnReadComplete,
	) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		if state.closed {
			let fmt = format!("enqueue_read on closed connection {}", self.id);
			return Err(err!(ErrKind::ClosedConnection, fmt));
		}

		state.read_queue.push_back(ReadRequest {
			requested_len,
			buf: vec![],
			on_complete,
		});
		debug!(
			self.logger,
			"enqueued read of {} bytes on handle {}, {} pending",
			requested_len,
			self.handle,
			state.read_queue.len()
		)?;

		if state.read_queue.len() == 1 {
			self.enable_event(&mut state, Interest::READ)?;
		}
		Ok(())
	}

	/// Append a write request for the specified buffer to this connection's write queue.
	/// Write requests complete strictly in the order they were enqueued; the completion
	/// callback is executed exactly once, after every byte of the buffer has been written.
	/// If this request is the only pending write, write interest is enabled with the event
	/// loop.
	/// # Errors
	/// [`nio_err::ErrKind::ClosedConnection`] - if the connection has been closed.
	pub fn enqueue_write(
		self: &Arc<Self>,
		buf: Vec<u8>,
		on_complete: OnWriteComplete,
	) -> Result<(), Error> {
		let mut state = self.state.lock()?;
		if state.closed {
			let fmt = format!("enqueue_write on closed connection {}", self.id);
			return Err(err!(ErrKind::ClosedConnection, fmt));
		}

		debug!(
			self.logger,
			"enqueued write of {} bytes on handle {}, {} pending",
			buf.len(),
			self.handle,
			state.write_queue.len() + 1
		)?;
		state.write_queue.push_back(WriteRequest {
			buf,
			offset: 0,
			on_complete,
		});

		if state.write_queue.len() == 1 {
			self.enable_event(&mut state, Interest::WRITE)?;
		}
		Ok(())
	}

	/// Close this connection. Safe to call multiple times, only the first call has effect:
	/// it discards all pending read and write requests WITHOUT executing their completion
	/// callbacks, deregisters the handle from the event loop (best effort), and closes the
	/// handle. Subsequent enqueue or servicing calls fail with
	/// [`nio_err::ErrKind::ClosedConnection`].
	pub fn close(self: &Arc<Self>) -> Result<(), Error> {
		{
			let mut state = self.state.lock()?;
			if state.closed {
				return Ok(());
			}
			debug!(
				self.logger,
				"closing connection {}, handle {}, discarding {} reads and {} writes",
				self.id,
				self.handle,
				state.read_queue.len(),
				state.write_queue.len()
			)?;
			state.closed = true;
			// pending requests are discarded. their callbacks do not execute.
			state.read_queue.clear();
			state.write_queue.clear();
			state.interest = Interest::NONE;
		}

		// best effort deregistration. the registration holds the event loop's reference
		// to this connection so this is also where that reference is released.
		match self.remove_event() {
			Ok(_) => {}
			Err(e) => {
				trace!(
					self.logger,
					"remove_event for handle {} on close: {}",
					self.handle,
					e
				)?;
			}
		}

		close_impl(self.handle)?;
		Ok(())
	}

	// service the read queue strictly in fifo order. the front request is filled with
	// bounded read attempts until it is satisfied, the kernel reports would-block, or a
	// fatal condition occurs. completion callbacks execute with the state lock released so
	// they may re-enter this connection.
	fn handle_read(self: &Arc<Self>) -> Result<(), Error> {
		let mut first = true;
		loop {
			let (on_complete, buf) = {
				let mut state = self.state.lock()?;
				if first {
					if state.closed {
						let fmt = format!("read on closed connection {}", self.id);
						return Err(err!(ErrKind::ClosedConnection, fmt));
					}
					trace!(
						self.logger,
						"handling read, {} items in read queue",
						state.read_queue.len()
					)?;
					first = false;
				}

				let chunk_size = self.evl.read_chunk_size();
				let req = match state.read_queue.front_mut() {
					Some(req) => req,
					None => break,
				};
				trace!(
					self.logger,
					"read the first request: {} / {}",
					req.buf.len(),
					req.requested_len
				)?;

				let mut would_block = false;
				while req.buf.len() < req.requested_len {
					let read_len =
						std::cmp::min(chunk_size, req.requested_len - req.buf.len());
					let cur = req.buf.len();
					req.buf.resize(cur + read_len, 0u8);
					let res = read_impl(self.handle, &mut req.buf[cur..cur + read_len]);
					match res {
						Ok(Some(len)) if len > 0 => {
							req.buf.truncate(cur + len);
						}
						Ok(Some(_)) => {
							// 0 length read, the peer closed the connection
							req.buf.truncate(cur);
							let fmt =
								format!("read found handle {} closed", self.handle);
							return Err(err!(ErrKind::IO, fmt));
						}
						Ok(None) => {
							// would block, wait for the next readiness event
							req.buf.truncate(cur);
							would_block = true;
							break;
						}
						Err(e) => {
							req.buf.truncate(cur);
							return Err(e);
						}
					}
				}

				if req.buf.len() == req.requested_len {
					trace!(self.logger, "read request ok, executing callback")?;
					let req = match state.read_queue.pop_front() {
						Some(req) => req,
						None => break,
					};
					if state.read_queue.is_empty() {
						self.disable_event(&mut state, Interest::READ)?;
					}
					(req.on_complete, req.buf)
				} else {
					// would block, the request stays at the front of the queue
					trace!(
						self.logger,
						"read suspended at {} / {}, would_block={}",
						req.buf.len(),
						req.requested_len,
						would_block
					)?;
					break;
				}
			};

			// executed with the lock released so the callback may enqueue further
			// requests or close the connection
			on_complete(self, &buf)?;
		}
		Ok(())
	}

	// service the write queue strictly in fifo order, mirroring handle_read. the front
	// request is written with bounded attempts starting at its current offset. a request is
	// complete when its offset reaches the end of its buffer.
	fn handle_write(self: &Arc<Self>) -> Result<(), Error> {
		let mut first = true;
		loop {
			let on_complete = {
				let mut state = self.state.lock()?;
				if first {
					if state.closed {
						let fmt = format!("write on closed connection {}", self.id);
						return Err(err!(ErrKind::ClosedConnection, fmt));
					}
					trace!(
						self.logger,
						"handling write, {} items in write queue",
						state.write_queue.len()
					)?;
					first = false;
				}

				let chunk_size = self.evl.write_chunk_size();
				let req = match state.write_queue.front_mut() {
					Some(req) => req,
					None => break,
				};
				trace!(
					self.logger,
					"write the first request: {} / {}",
					req.offset,
					req.buf.len()
				)?;

				let mut would_block = false;
				while req.offset < req.buf.len() {
					let write_len = std::cmp::min(chunk_size, req.buf.len() - req.offset);
					let res =
						write_impl(self.handle, &req.buf[req.offset..req.offset + write_len]);
					match res {
						Ok(Some(len)) if len > 0 => {
							req.offset += len;
						}
						Ok(Some(_)) => {
							// 0 length write, the peer closed the connection
							let fmt =
								format!("write found handle {} closed", self.handle);
							return Err(err!(ErrKind::IO, fmt));
						}
						Ok(None) => {
							// would block, wait for the next readiness event
							would_block = true;
							break;
						}
						Err(e) => return Err(e),
					}
				}

				if req.offset == req.buf.len() {
					trace!(self.logger, "write request ok, executing callback")?;
					let req = match state.write_queue.pop_front() {
						Some(req) => req,
						None => break,
					};
					if state.write_queue.is_empty() {
						self.disable_event(&mut state, Interest::WRITE)?;
					}
					req.on_complete
				} else {
					// would block, the request stays at the front of the queue
					trace!(
						self.logger,
						"write suspended at {} / {}, would_block={}",
						req.offset,
						req.buf.len(),
						would_block
					)?;
					break;
				}
			};

			// executed with the lock released so the callback may enqueue further
			// requests or close the connection
			on_complete(self)?;
		}
		Ok(())
	}

	// dispatch boundary for readiness events. servicing errors are caught here, logged,
	// and converted into a close. failures never propagate to the event loop.
	pub(crate) fn on_event(self: &Arc<Self>, event: &Event) -> Result<(), Error> {
		debug!(
			self.logger,
			"handling event {:?} for connection {}", event, self.id
		)?;
		if self.is_closed()? {
			return Ok(());
		}

		match self.service_event(event) {
			Ok(_) => {
				// peer close/error is checked after servicing so data that is still
				// readable at the moment of peer shutdown is drained first
				if event.interest.is_set(Interest::HANGUP) {
					self.close()?;
				}
			}
			Err(e) => {
				warn!(
					self.logger,
					"closing connection {} while processing event: {}", self.id, e
				)?;
				self.close()?;
			}
		}
		Ok(())
	}

	fn service_event(self: &Arc<Self>, event: &Event) -> Result<(), Error> {
		if event.interest.is_set(Interest::READ) {
			self.handle_read()?;
		}
		if event.interest.is_set(Interest::WRITE) {
			self.handle_write()?;
		}
		Ok(())
	}
}
