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

//! # The Nio Test crate
//! This crate provides the utilities that the tests in the other crates of this repository
//! use: a unique scratch directory and free tcp/ip port per test (see [`crate::TestInfo`] and
//! the [`crate::test_info`] macro), and a sync_channel that times out automatically so that a
//! hung test fails instead of blocking the suite.

mod impls;
mod macros;
mod test;
mod types;

pub use crate::impls::pick_free_port;
pub use crate::types::{TestBuilder, TestInfo};
