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

//! This is the dependency crate. All nio dependencies are included in this crate as re-exports
//! and used by the other crates within the repo.

pub use backtrace;
pub use chrono;
pub use colored;
pub use errno;
pub use failure;
pub use failure_derive;
pub use libc;
pub use portpicker;
pub use rand;
