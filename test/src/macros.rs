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

/// Macro to setup a test directory based on the function name. A free port
/// is also returned. The directory is removed when the returned value goes
/// out of scope unless the `preserve` value is specified and set to true.
/// Specifically a [`crate::TestInfo`] is returned by this macro.
/// # Examples
///```
/// use nio_err::*;
/// use nio_test::*;
///
/// fn test_my_fn() -> Result<(), Error> {
///     let test_info = test_info!()?;
///
///     let directory = test_info.directory();
///     let port = test_info.port();
///
///     // use the directory to write/read files and the port for tcp/ip connections.
///     // the directory will be deleted when the test_info impl is dropped (at the
///     // end of this test function).
///
///     Ok(())
/// }
///```
#[macro_export]
macro_rules! test_info {
	() => {{
		test_info!(false)
	}};
	($preserve:expr) => {{
		use nio_test::TestBuilder;
		TestBuilder::build_test_info($preserve)
	}};
}
