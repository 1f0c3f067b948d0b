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

/// Builds a [`crate::LockBox`] for the specified value.
///
/// # Examples
///
///```
/// use nio_err::*;
/// use nio_util::*;
///
/// fn main() -> Result<(), Error> {
///     let lock = lock_box!(100u64);
///     assert_eq!(*lock.rlock()?, 100);
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! lock_box {
	($value:expr) => {{
		nio_util::build_lock_box($value)
	}};
}

/// Obtain the read value of the specified [`crate::LockBox`]. May only be used in functions
/// that return `Result<_, nio_err::Error>`.
#[macro_export]
macro_rules! rlock {
	($value:expr) => {
		*$value.rlock()?
	};
}

/// Obtain a writable reference to the value of the specified [`crate::LockBox`]. May only be
/// used in functions that return `Result<_, nio_err::Error>`.
#[macro_export]
macro_rules! wlock {
	($value:expr) => {
		*$value.wlock()?
	};
}
