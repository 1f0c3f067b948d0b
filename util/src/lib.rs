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

//! # The Nio Utility crate
//! This crate implements the shared-state utilities used by the other crates in this
//! repository. The main abstraction is the [`crate::LockBox`] which is a clonable,
//! thread-safe wrapper around a value. Clones of a [`crate::LockBox`] share the same
//! underlying value.
//!
//! # Examples
//!
//!```
//! use nio_err::*;
//! use nio_util::*;
//!
//! fn main() -> Result<(), Error> {
//!     let mut lock = lock_box!(1u32);
//!     let lock_clone = lock.clone();
//!
//!     {
//!         let mut guard = lock.wlock()?;
//!         *guard += 1;
//!     }
//!
//!     let guard = lock_clone.rlock()?;
//!     assert_eq!(*guard, 2);
//!
//!     Ok(())
//! }
//!```

mod lock;
mod macros;
mod test;

pub use crate::lock::{build_lock_box, LockBox};
