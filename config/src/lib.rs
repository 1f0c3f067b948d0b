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

//! # The Nio Configuration crate
//! The Configuration crate is used by other crates in this repo to build and check
//! configurations. Configurations should generally be built using the [`crate::config!`] macro
//! and the [`crate::Config::check_config`] function should be used to confirm the resulting
//! configuration has only allowed values, has all required values, and has no duplicates.
//!
//! # Examples
//!
//!```
//! use nio_err::*;
//! use nio_conf::*;
//!
//! fn main() -> Result<(), Error> {
//!     // create a simple config
//!     let config = config!(EvlThreads(4), EvlTimeout(100));
//!
//!     let res = config.check_config(
//!         vec![
//!             ConfigOptionName::EvlThreads,
//!             ConfigOptionName::EvlTimeout
//!         ],
//!         vec![ConfigOptionName::EvlThreads]
//!     );
//!
//!     // this configuration is ok because all fields specified are allowed and all
//!     // required fields are specified.
//!     assert!(res.is_ok());
//!
//!     // create an invalid config
//!     let config = config!(EvlTimeout(100));
//!
//!     let res = config.check_config(
//!         vec![
//!             ConfigOptionName::EvlThreads,
//!             ConfigOptionName::EvlTimeout
//!         ],
//!         vec![ConfigOptionName::EvlThreads]
//!     );
//!
//!     // this configuration is invalid because EvlThreads is not specified.
//!     assert!(res.is_err());
//!
//!     Ok(())
//! }
//!```

mod builder;
mod config;
mod macros;
mod types;

pub use crate::types::{Config, ConfigBuilder, ConfigOption, ConfigOptionName};
