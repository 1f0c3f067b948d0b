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
pub(crate) const DEFAULT_MAX_SIZE_BYTES: u64 = 1024 * 1024; // 1 mb
pub(crate) const DEFAULT_MAX_AGE_MILLIS: u128 = 60 * 60 * 1_000; // 1 hour
