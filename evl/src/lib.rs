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

//! This crate implements the nio network I/O core: a multi-threaded, readiness-notification
//! based engine for servicing very large numbers of nonblocking tcp/ip connections with a
//! small, fixed number of threads. On linux, epoll is used as the underlying notification
//! facility.
//!
//! There are four pieces:
//!
//! * [`crate::EventLoop`] - the readiness multiplexer. Owns the mapping from handle to
//! handler and runs a blocking wait/dispatch cycle on one thread.
//! * [`crate::Connection`] - one socket. Owns ordered queues of buffered read and write
//! requests and turns raw readiness events into completed, length-exact requests, executing a
//! completion callback for each.
//! * [`crate::WorkerThread`] - owns exactly one [`crate::EventLoop`] and runs it on a
//! dedicated thread. Accepts raw handles, wraps them in connections, and invokes the
//! application's [`crate::ConnectionHandler`].
//! * [`crate::WorkerPool`] - a fixed set of worker threads. Distributes newly accepted
//! handles round-robin, which is the scale-out mechanism across cores.
//!
//! The application supplies two things: already-connected nonblocking handles (the accept
//! loop itself is deliberately outside this crate) and a [`crate::ConnectionHandler`] whose
//! `handle_init` issues the first [`crate::Connection::enqueue_read`] /
//! [`crate::Connection::enqueue_write`] calls that start the protocol. Each enqueued request
//! carries a completion callback: read callbacks execute once exactly the requested number of
//! bytes have accumulated, write callbacks once the full buffer has been transmitted. "Would
//! block" results suspend the request until the next readiness event; they are never errors.
//!
//! Closing a connection discards all still-pending requests without executing their
//! callbacks, and any later enqueue attempt fails with
//! [`nio_err::ErrKind::ClosedConnection`]. A fatal i/o error on one connection closes that
//! connection only; other connections on the same event loop are unaffected.
//!
//! # Examples
//!
//!```
//! // Echo server
//! use nio_conf::*;
//! use nio_err::*;
//! use nio_evl::*;
//! use nio_log::*;
//! use nio_test::*;
//! use std::io::{Read, Write};
//! use std::net::{TcpListener, TcpStream};
//! use std::os::fd::IntoRawFd;
//! use std::sync::Arc;
//!
//! // an echo protocol: read 5 bytes, write them back
//! struct EchoHandler {}
//!
//! impl ConnectionHandler for EchoHandler {
//!     fn handle_init(&self, connection: Arc<Connection>) -> Result<(), Error> {
//!         connection.enqueue_read(
//!             5,
//!             Box::new(|conn, data| {
//!                 conn.enqueue_write(data.to_vec(), Box::new(|_conn| Ok(())))?;
//!                 Ok(())
//!             }),
//!         )
//!     }
//! }
//!
//! fn main() -> Result<(), Error> {
//!     let logger = LogBuilder::build_logger(vec![ConfigOption::DisplayStdout(false)])?;
//!
//!     // two worker threads, each running its own event loop
//!     let handler = Arc::new(EchoHandler {});
//!     let mut pool = worker_pool!(handler, logger, EvlThreads(2), EvlTimeout(100))?;
//!     pool.start()?;
//!
//!     // the acceptor is an external collaborator. here it is a plain std listener.
//!     let port = pick_free_port()?;
//!     let addr = format!("127.0.0.1:{}", port);
//!     let listener = TcpListener::bind(&addr)?;
//!
//!     let mut client = TcpStream::connect(&addr)?;
//!     let (server_stream, _peer) = listener.accept()?;
//!     server_stream.set_nonblocking(true)?;
//!     pool.assign(server_stream.into_raw_fd())?;
//!
//!     // the pool echoes what we send
//!     client.write(b"hello")?;
//!     let mut buf = [0u8; 5];
//!     client.read_exact(&mut buf)?;
//!     assert_eq!(&buf, b"hello");
//!
//!     pool.shutdown()?;
//!     Ok(())
//! }
//!```

mod builder;
mod conn;
mod constants;
mod evl;
#[cfg(target_os = "linux")]
mod linux;
mod macros;
mod pool;
mod test;
mod types;
mod worker;

#[cfg(target_os = "linux")]
pub use crate::linux::Handle;

pub use crate::types::{
	Connection, ConnectionHandler, Event, EventHandler, EventLoop, EvlBuilder, Interest,
	OnReadComplete, OnWriteComplete, WorkerPool, WorkerThread,
};
