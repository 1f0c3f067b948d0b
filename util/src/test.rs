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
	use crate as nio_util;
	use crate::{lock_box, rlock, wlock, LockBox};
	use nio_err::*;
	use nio_test::*;

	#[test]
	fn test_lock_box() -> Result<(), Error> {
		let test = test_info!()?;
		let mut lock = lock_box!(5);
		let lock_clone = lock.clone();

		let (tx, rx) = test.sync_channel();

		std::thread::spawn(move || -> Result<(), Error> {
			let mut guard = lock.wlock()?;
			*guard += 1;

			tx.send(())?;

			Ok(())
		});

		rx.recv()?;
		let guard = lock_clone.rlock()?;
		assert_eq!(*guard, 6);

		Ok(())
	}

	#[test]
	fn test_lock_macros() -> Result<(), Error> {
		let mut lock = lock_box!(0usize);
		wlock!(lock) += 10;
		assert_eq!(rlock!(lock), 10);
		wlock!(lock) = 7;
		assert_eq!(rlock!(lock), 7);
		Ok(())
	}

	#[test]
	fn test_lock_ids_and_inner() -> Result<(), Error> {
		let lock = lock_box!(1u8);
		let lock_clone = lock.clone();

		// clones share an id and the underlying value
		assert_eq!(lock.id(), lock_clone.id());
		{
			let inner = lock.inner();
			assert!(std::sync::Arc::strong_count(&inner) > 1);
		}

		let other = lock_box!(1u8);
		assert_ne!(lock.id(), other.id());

		Ok(())
	}

	#[test]
	fn test_lock_ignore_poison() -> Result<(), Error> {
		let mut lock = lock_box!(1u32);
		let mut lock_clone = lock.clone();
		let _ = std::thread::spawn(move || -> Result<(), Error> {
			let _guard = lock_clone.wlock()?;
			panic!("poison it");
		})
		.join();

		// normal access reports poison
		assert!(lock.rlock().is_err());

		// the ignore_poison variants still return the value
		assert_eq!(*lock.rlock_ignore_poison()?, 1);
		{
			let mut guard = lock.wlock_ignore_poison()?;
			*guard = 2;
		}
		assert_eq!(*lock.rlock_ignore_poison()?, 2);

		Ok(())
	}
}
