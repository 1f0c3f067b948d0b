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
use nio_err::Error;
use nio_log::Logger;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// The set of readiness categories a handle is registered to be notified about, or the set of
/// categories a delivered [`crate::Event`] resolved to. The individual categories are
/// [`crate::Interest::READ`], [`crate::Interest::WRITE`], and [`crate::Interest::HANGUP`].
#[derive(Copy, Clone, PartialEq, Default)]
pub struct Interest {
	pub(crate) bits: u8,
}

impl Interest {
	/// No readiness categories.
	pub const NONE: Interest = Interest {
		bits: INTEREST_NONE,
	};
	/// The handle can be read without blocking.
	pub const READ: Interest = Interest {
		bits: INTEREST_READ,
	};
	/// The handle can be written without blocking.
	pub const WRITE: Interest = Interest {
		bits: INTEREST_WRITE,
	};
	/// The peer shut down its end of the connection or an error condition occurred on the
	/// handle.
	pub const HANGUP: Interest = Interest {
		bits: INTEREST_HANGUP,
	};

	/// Whether all categories of the specified [`crate::Interest`] are set in this one.
	pub fn is_set(&self, other: Interest) -> bool {
		self.bits & other.bits != 0
	}

	/// Add the categories of the specified [`crate::Interest`] to this one.
	pub fn set(&mut self, other: Interest) {
		self.bits |= other.bits;
	}

	/// Remove the categories of the specified [`crate::Interest`] from this one.
	pub fn unset(&mut self, other: Interest) {
		self.bits &= !other.bits;
	}
}

impl std::fmt::Debug for Interest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
		write!(f, "[")?;
		if self.is_set(Interest::READ) {
			write!(f, " READ ")?;
		}
		if self.is_set(Interest::WRITE) {
			write!(f, " WRITE ")?;
		}
		if self.is_set(Interest::HANGUP) {
			write!(f, " HANGUP ")?;
		}
		write!(f, "]")
	}
}

/// A single readiness event delivered by an [`crate::EventLoop`] to the handler registered for
/// the handle. The `interest` field holds the categories that resolved ready, which is not
/// necessarily the full set the handle was registered for.
#[derive(Copy, Clone, Debug)]
pub struct Event {
	/// The handle the event occurred on.
	pub handle: Handle,
	/// The readiness categories that resolved for this event.
	pub interest: Interest,
}

/// The handler closure registered for a handle with [`crate::EventLoop::add_event`]. Handlers
/// are invoked on the thread driving [`crate::EventLoop::event_loop`] with the event loop's
/// registration lock released, so a handler may itself call
/// [`crate::EventLoop::add_event`] / [`crate::EventLoop::modify_event`] /
/// [`crate::EventLoop::remove_event`], including removing its own handle.
pub type EventHandler = Arc<dyn Fn(&Event) -> Result<(), Error> + Send + Sync>;

/// The completion callback of a read request enqueued with
/// [`crate::Connection::enqueue_read`]. The callback receives the connection and exactly the
/// number of bytes that were requested.
pub type OnReadComplete = Box<dyn FnOnce(&Arc<Connection>, &[u8]) -> Result<(), Error> + Send>;

/// The completion callback of a write request enqueued with
/// [`crate::Connection::enqueue_write`]. The callback is executed after every byte of the
/// request's buffer has been written to the handle.
pub type OnWriteComplete = Box<dyn FnOnce(&Arc<Connection>) -> Result<(), Error> + Send>;

/// The capability through which an application takes part in the life of new connections. The
/// [`crate::ConnectionHandler::handle_init`] function is executed exactly once per connection
/// accepted by a [`crate::WorkerThread`], immediately after the connection has been registered
/// with the worker's event loop. It is expected to issue the initial
/// [`crate::Connection::enqueue_read`] / [`crate::Connection::enqueue_write`] calls that start
/// the application protocol.
pub trait ConnectionHandler: Send + Sync {
	/// Called exactly once for each newly accepted connection.
	fn handle_init(&self, connection: Arc<Connection>) -> Result<(), Error>;
}

/// A readiness multiplexer. One instance wraps one kernel notification facility (epoll on
/// linux) and owns the registrations of the handles added to it. The blocking wait/dispatch
/// cycle is driven by [`crate::EventLoop::event_loop`], which is intended to be the entire
/// body of one dedicated thread. See the [`crate`] documentation for examples.
pub struct EventLoop {
	pub(crate) selector: Handle,
	pub(crate) handlers: Mutex<HashMap<Handle, PollData>>,
	pub(crate) loop_enabled: AtomicBool,
	pub(crate) in_loop: AtomicBool,
	pub(crate) config: EventLoopConfig,
	pub(crate) logger: Logger,
}

/// A connection being serviced by an [`crate::EventLoop`]. Connections hold ordered queues of
/// buffered read and write requests and translate raw readiness events into completed,
/// length-exact requests, executing the enqueuing caller's completion callback for each. A
/// connection is shared between the event loop, which holds a reference for as long as the
/// connection is registered, and the application. See the [`crate`] documentation for
/// examples.
pub struct Connection {
	pub(crate) handle: Handle,
	pub(crate) id: u128,
	pub(crate) evl: Arc<EventLoop>,
	pub(crate) registered: AtomicBool,
	pub(crate) state: Mutex<ConnState>,
	pub(crate) logger: Logger,
}

/// A worker thread. Owns exactly one [`crate::EventLoop`] and accepts raw handles into it,
/// wrapping each in a [`crate::Connection`] and invoking the application's
/// [`crate::ConnectionHandler`]. [`crate::WorkerThread::run`] is the thread's entire body.
#[derive(Clone)]
pub struct WorkerThread {
	pub(crate) evl: Arc<EventLoop>,
	pub(crate) handler: Arc<dyn ConnectionHandler>,
	pub(crate) logger: Logger,
}

/// A fixed-size pool of [`crate::WorkerThread`]s. Newly accepted handles are distributed over
/// the workers round-robin via [`crate::WorkerPool::assign`], which is the scale-out mechanism
/// across cores. See the [`crate`] documentation for examples.
pub struct WorkerPool {
	pub(crate) workers: Vec<WorkerThread>,
	pub(crate) cursor: Mutex<usize>,
	pub(crate) jhs: Vec<JoinHandle<Result<(), Error>>>,
	pub(crate) logger: Logger,
}

/// Builder struct for the crate. All implementations are created through this struct.
pub struct EvlBuilder {}

// crate local structures

pub(crate) struct PollData {
	pub(crate) interest: Interest,
	pub(crate) handler: EventHandler,
}

pub(crate) struct ConnState {
	pub(crate) interest: Interest,
	pub(crate) closed: bool,
	pub(crate) read_queue: VecDeque<ReadRequest>,
	pub(crate) write_queue: VecDeque<WriteRequest>,
}

pub(crate) struct ReadRequest {
	pub(crate) requested_len: usize,
	pub(crate) buf: Vec<u8>,
	pub(crate) on_complete: OnReadComplete,
}

pub(crate) struct WriteRequest {
	pub(crate) buf: Vec<u8>,
	pub(crate) offset: usize,
	pub(crate) on_complete: OnWriteComplete,
}

#[derive(Clone)]
pub(crate) struct EventLoopConfig {
	pub(crate) max_events: usize,
	pub(crate) timeout: u16,
	pub(crate) read_chunk_size: usize,
	pub(crate) write_chunk_size: usize,
	pub(crate) debug: bool,
}
