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

#[cfg(test)]
mod test {
	use crate as nio_test;
	use crate::{pick_free_port, test_info};
	use nio_err::Error;
	use std::net::TcpListener;
	use std::path::PathBuf;

	#[test]
	fn test_pick_free_port() -> Result<(), Error> {
		let port1 = pick_free_port()?;
		let port2 = pick_free_port()?;
		assert_ne!(port1, port2);

		// the port is actually bindable
		let listener = TcpListener::bind(format!("127.0.0.1:{}", port1))?;
		drop(listener);

		Ok(())
	}

	#[test]
	fn test_test_info() -> Result<(), Error> {
		let dir;
		{
			let test_info = test_info!()?;
			dir = test_info.directory().clone();

			// directory is named after the test and exists
			assert!(dir.contains("test_test_info"));
			let mut path_buf = PathBuf::new();
			path_buf.push(test_info.directory());
			assert!(path_buf.as_path().exists());

			assert!(test_info.port() >= 9000);
		}

		// directory is cleaned up on drop
		let mut path_buf = PathBuf::new();
		path_buf.push(dir);
		assert!(!path_buf.as_path().exists());

		Ok(())
	}

	#[test]
	fn test_sync_channel() -> Result<(), Error> {
		let test_info = test_info!()?;
		let (tx, rx) = test_info.sync_channel();
		tx.send(())?;
		rx.recv()?;
		Ok(())
	}
}
