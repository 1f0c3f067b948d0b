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

//! # Nio
//!
//! <p align="center">Multi-threaded nonblocking network I/O core libraries.</p>
//!
//! Nio is a small set of crates for building tcp/ip services that handle very large numbers
//! of simultaneous connections with a small, fixed number of threads. Each thread runs an
//! independent readiness-notification event loop (epoll on linux); connections are
//! distributed over the threads round-robin and serviced through buffered, callback-based
//! read and write request queues.
//!
//! # The Nio Event Loop crate
//!
//! The event loop crate is the core of the repository. It implements the
//! [`nio_evl::EventLoop`] readiness multiplexer, the [`nio_evl::Connection`] buffered-I/O
//! state machine, the [`nio_evl::WorkerThread`], and the round-robin
//! [`nio_evl::WorkerPool`]. A simple echo server looks like this:
//!
//!```
//! use nio_conf::*;
//! use nio_err::*;
//! use nio_evl::*;
//! use nio_log::*;
//! use std::io::{Read, Write};
//! use std::net::{TcpListener, TcpStream};
//! use std::os::fd::IntoRawFd;
//! use std::sync::Arc;
//!
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
//!     // loggers are an explicitly injected capability, there is no global logger
//!     let logger = LogBuilder::build_logger(vec![ConfigOption::DisplayStdout(false)])?;
//!
//!     let handler = Arc::new(EchoHandler {});
//!     let mut pool = worker_pool!(handler, logger, EvlThreads(4), EvlTimeout(100))?;
//!     pool.start()?;
//!
//!     // accepting sockets is the application's responsibility. hand each accepted,
//!     // nonblocking handle to the pool and the pool does the rest.
//!     let listener = TcpListener::bind("127.0.0.1:0")?;
//!     let addr = listener.local_addr()?;
//!
//!     let mut client = TcpStream::connect(addr)?;
//!     let (server_stream, _peer) = listener.accept()?;
//!     server_stream.set_nonblocking(true)?;
//!     pool.assign(server_stream.into_raw_fd())?;
//!
//!     client.write(b"hello")?;
//!     let mut buf = [0u8; 5];
//!     client.read_exact(&mut buf)?;
//!     assert_eq!(&buf, b"hello");
//!
//!     pool.shutdown()?;
//!     Ok(())
//! }
//!```
//!
//! Full details can be found here: [`nio_evl`].
//!
//! # The Nio Logging crate
//!
//! The logging crate is used by the other crates in this repository. Loggers are built with
//! [`nio_log::LogBuilder`] and passed to components as [`nio_log::Logger`] capability
//! handles. Log lines can be directed to stdout and/or a rotated log file with optional
//! timestamps, levels, and colors. Full details can be found here: [`nio_log`].
//!
//! # The Nio Error crate
//!
//! The error crate is used to handle errors in the other nio crates. The two main useful
//! macros from this crate are the [`nio_err::err!`] macro and the [`nio_err::map_err`]
//! macro. Full details can be found here: [`nio_err`].
//!
//! # The Nio Configuration crate
//!
//! The configuration crate implements the [`nio_conf::ConfigOption`] values accepted by the
//! builders in this repository and the [`nio_conf::config!`] macro. Full details can be
//! found here: [`nio_conf`].

pub use nio_conf;
pub use nio_deps;
pub use nio_err;
pub use nio_evl;
pub use nio_log;
pub use nio_util;
