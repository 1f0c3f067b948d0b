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

// configuration defaults
pub(crate) const EVL_DEFAULT_THREADS: usize = 4;
pub(crate) const EVL_DEFAULT_TIMEOUT: u16 = 1_000;
pub(crate) const EVL_DEFAULT_MAX_EVENTS: usize = 1_024;
pub(crate) const EVL_DEFAULT_READ_CHUNK_SIZE: usize = 1_024;
pub(crate) const EVL_DEFAULT_WRITE_CHUNK_SIZE: usize = 1_024;

// interest bitmask values
pub(crate) const INTEREST_NONE: u8 = 0x0;
pub(crate) const INTEREST_READ: u8 = 0x1 << 0;
pub(crate) const INTEREST_WRITE: u8 = 0x1 << 1;
pub(crate) const INTEREST_HANGUP: u8 = 0x1 << 2;
