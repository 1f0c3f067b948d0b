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

//! # The Nio Error crate
//! This crate defines the [`crate::Error`] type which is used by all other crates in this
//! repository. Errors are built around a displayable [`crate::ErrorKind`] and its name-only
//! counterpart [`crate::ErrKind`] which is used by the [`crate::err`] and [`crate::map_err`]
//! macros. The kind of an error can be checked with the [`crate::Error::kind`] function which
//! allows callers to distinguish, for instance, a programmer error like
//! [`crate::ErrorKind::NotRegistered`] from a fatal i/o condition.
//!
//! # Examples
//!
//!```
//! use nio_err::*;
//!
//! fn ret_err(fail: bool) -> Result<(), Error> {
//!     if fail {
//!         return Err(err!(ErrKind::IllegalState, "fail was true"));
//!     }
//!     Ok(())
//! }
//!
//! fn main() -> Result<(), Error> {
//!     assert!(ret_err(false).is_ok());
//!     let e = ret_err(true).unwrap_err();
//!     assert_eq!(e.kind(), ErrorKind::IllegalState("fail was true".to_string()));
//!     Ok(())
//! }
//!```

mod error;
mod macros;
mod public;

pub use crate::public::{ErrKind, Error, ErrorKind};
