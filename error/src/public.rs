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

use nio_deps::failure::{Context, Fail};

/// Base Error struct which is used throughout this repository.
#[derive(Debug, Fail)]
pub struct Error {
	pub(crate) inner: Context<ErrorKind>,
}

/// Kinds of errors that can occur.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
	/// IO Error
	#[fail(display = "IO Error: {}", _0)]
	IO(String),
	/// Log Error
	#[fail(display = "Log Error: {}", _0)]
	Log(String),
	/// UTF8 Error
	#[fail(display = "UTF8 Error: {}", _0)]
	Utf8(String),
	/// Configuration Error
	#[fail(display = "Configuration Error: {}", _0)]
	Configuration(String),
	/// Poison error multiple locks
	#[fail(display = "Poison Error: {}", _0)]
	Poison(String),
	/// IllegalArgument
	#[fail(display = "IllegalArgument: {}", _0)]
	IllegalArgument(String),
	/// Illegal State
	#[fail(display = "Illegal State Error: {}", _0)]
	IllegalState(String),
	/// Miscellaneous Error
	#[fail(display = "Miscellaneous Error: {}", _0)]
	Misc(String),
	/// Overflow error
	#[fail(display = "overflow error: {}", _0)]
	Overflow(String),
	/// Thread Panic
	#[fail(display = "thread panic: {}", _0)]
	ThreadPanic(String),
	/// Errno system error
	#[fail(display = "errno error: {}", _0)]
	Errno(String),
	/// A handle was registered with an event loop that already has it
	#[fail(display = "duplicate registration error: {}", _0)]
	DuplicateRegistration(String),
	/// A handle that was never registered with this event loop was specified
	#[fail(display = "not registered error: {}", _0)]
	NotRegistered(String),
	/// An operation was attempted on a connection that has been closed
	#[fail(display = "closed connection error: {}", _0)]
	ClosedConnection(String),
	/// Simulated Error used in testing
	#[fail(display = "simulated test error: {}", _0)]
	Test(String),
}

/// The names of the [`crate::ErrorKind`] variants. These names are used by the
/// [`crate::err`] and [`crate::map_err`] macros to build the corresponding
/// [`crate::Error`].
pub enum ErrKind {
	/// IO Error
	IO,
	/// Log Error
	Log,
	/// UTF8 Error
	Utf8,
	/// Configuration Error
	Configuration,
	/// Poison error multiple locks
	Poison,
	/// IllegalArgument
	IllegalArgument,
	/// Illegal State
	IllegalState,
	/// Miscellaneous Error
	Misc,
	/// Overflow error
	Overflow,
	/// Thread Panic
	ThreadPanic,
	/// Errno system error
	Errno,
	/// A handle was registered with an event loop that already has it
	DuplicateRegistration,
	/// A handle that was never registered with this event loop was specified
	NotRegistered,
	/// An operation was attempted on a connection that has been closed
	ClosedConnection,
	/// Simulated Error used in testing
	Test,
}
