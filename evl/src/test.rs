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
	use crate as nio_evl;
	use crate::linux::*;
	use crate::{
		event_loop, worker_pool, Connection, ConnectionHandler, Event, EvlBuilder, Interest,
	};
	use nio_conf::ConfigOption;
	use nio_err::*;
	use nio_log::{LogBuilder, Logger};
	use nio_test::*;
	use nio_util::{lock_box, rlock, wlock, LockBox};
	use std::io::{Read, Write};
	use std::net::{TcpListener, TcpStream};
	use std::os::fd::IntoRawFd;
	use std::sync::Arc;
	use std::thread::{sleep, spawn};
	use std::time::Duration;

	fn test_logger() -> Result<Logger, Error> {
		LogBuilder::build_logger(vec![ConfigOption::DisplayStdout(false)])
	}

	// wait for a condition with a bounded number of attempts so a broken test fails
	// instead of hanging
	fn wait_for<F>(mut f: F) -> Result<bool, Error>
	where
		F: FnMut() -> Result<bool, Error>,
	{
		for _ in 0..500 {
			if f()? {
				return Ok(true);
			}
			sleep(Duration::from_millis(10));
		}
		Ok(false)
	}

	#[test]
	fn test_interest_bits() -> Result<(), Error> {
		let mut interest = Interest::NONE;
		assert!(!interest.is_set(Interest::READ));

		interest.set(Interest::READ);
		interest.set(Interest::HANGUP);
		assert!(interest.is_set(Interest::READ));
		assert!(!interest.is_set(Interest::WRITE));
		assert!(interest.is_set(Interest::HANGUP));

		interest.unset(Interest::READ);
		assert!(!interest.is_set(Interest::READ));
		assert!(interest.is_set(Interest::HANGUP));

		interest.set(Interest::WRITE);
		assert_eq!(format!("{:?}", interest), "[ WRITE  HANGUP ]");
		assert_eq!(format!("{:?}", Interest::NONE), "[]");

		Ok(())
	}

	#[test]
	fn test_event_loop_registration_errors() -> Result<(), Error> {
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;

		let handler = Arc::new(move |_event: &Event| -> Result<(), Error> { Ok(()) });

		evl.add_event(reader, Interest::READ, handler.clone())?;

		// registering the same handle twice fails
		let res = evl.add_event(reader, Interest::READ, handler.clone());
		assert_eq!(
			res.unwrap_err().kind(),
			ErrorKind::DuplicateRegistration(format!("handle {} is already registered", reader))
		);

		// modifying a handle that was never added fails
		let res = evl.modify_event(writer, Interest::WRITE, handler.clone());
		assert_eq!(
			res.unwrap_err().kind(),
			ErrorKind::NotRegistered(format!("handle {} is not registered", writer))
		);

		// removing a handle that was never added fails
		let res = evl.remove_event(writer);
		assert_eq!(
			res.unwrap_err().kind(),
			ErrorKind::NotRegistered(format!("handle {} is not registered", writer))
		);

		// modify and remove of a registered handle are fine
		evl.modify_event(reader, Interest::READ, handler.clone())?;
		assert_eq!(evl.registered_count()?, 1);
		evl.remove_event(reader)?;
		assert_eq!(evl.registered_count()?, 0);

		// and a second remove fails
		assert!(evl.remove_event(reader).is_err());

		close_impl(reader)?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_event_loop_config_errors() -> Result<(), Error> {
		let logger = test_logger()?;
		assert!(event_loop!(logger, EvlTimeout(0)).is_err());
		assert!(event_loop!(logger, EvlMaxEvents(0)).is_err());
		assert!(event_loop!(logger, EvlReadChunkSize(0)).is_err());
		assert!(event_loop!(logger, EvlWriteChunkSize(0)).is_err());
		// EvlThreads is a worker pool option, not an event loop option
		assert!(event_loop!(logger, EvlThreads(4)).is_err());
		// log options are not event loop options
		assert!(event_loop!(logger, MaxSizeBytes(100)).is_err());
		assert!(event_loop!(logger).is_ok());
		Ok(())
	}

	#[test]
	fn test_event_loop_dispatch_and_stop() -> Result<(), Error> {
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;

		let count = lock_box!(0usize);
		let count_clone = count.clone();
		let evl_clone = evl.clone();
		let handler = Arc::new(move |event: &Event| -> Result<(), Error> {
			assert!(event.interest.is_set(Interest::READ));
			let mut count = count.clone();
			wlock!(count) += 1;
			// disabling the loop from within a handler takes effect after the batch
			evl_clone.disable_loop();
			Ok(())
		});

		evl.add_event(reader, Interest::READ, handler)?;
		write_impl(writer, b"x")?;

		// the handler stops the loop so event_loop returns
		evl.event_loop()?;
		assert_eq!(rlock!(count_clone), 1);
		assert!(!evl.is_in_loop());
		assert!(!evl.is_loop_enabled());

		close_impl(reader)?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_event_loop_handler_errors_are_isolated() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader_a, writer_a) = pipe_impl()?;
		let (reader_b, writer_b) = pipe_impl()?;

		let record = lock_box!(vec![]);
		let record_clone = record.clone();

		let record_a = record.clone();
		let handler_a = Arc::new(move |event: &Event| -> Result<(), Error> {
			// drain so the event does not fire again
			let mut buf = [0u8; 10];
			read_impl(event.handle, &mut buf)?;
			let mut record_a = record_a.clone();
			wlock!(record_a).push("a");
			Err(err!(ErrKind::Test, "handler a failed"))
		});

		let (tx, rx) = test_info.sync_channel();
		let evl_clone = evl.clone();
		let record_b = record.clone();
		let handler_b = Arc::new(move |event: &Event| -> Result<(), Error> {
			let mut buf = [0u8; 10];
			read_impl(event.handle, &mut buf)?;
			let mut record_b = record_b.clone();
			wlock!(record_b).push("b");
			evl_clone.disable_loop();
			tx.send(())?;
			Ok(())
		});

		evl.add_event(reader_a, Interest::READ, handler_a)?;
		evl.add_event(reader_b, Interest::READ, handler_b)?;

		let evl_run = evl.clone();
		let jh = spawn(move || -> Result<(), Error> { evl_run.event_loop() });

		// handler a errors but the loop keeps running and still dispatches b
		write_impl(writer_a, b"x")?;
		sleep(Duration::from_millis(100));
		write_impl(writer_b, b"x")?;
		rx.recv()?;

		// the loop exited cleanly. the handler error never propagated.
		match jh.join() {
			Ok(res) => res?,
			Err(_) => return Err(err!(ErrKind::ThreadPanic, "event loop thread panicked")),
		}
		assert_eq!(rlock!(record_clone), vec!["a", "b"]);

		close_impl(reader_a)?;
		close_impl(writer_a)?;
		close_impl(reader_b)?;
		close_impl(writer_b)?;
		Ok(())
	}

	#[test]
	fn test_event_loop_remove_within_handler() -> Result<(), Error> {
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;

		let evl_clone = evl.clone();
		let handler = Arc::new(move |event: &Event| -> Result<(), Error> {
			// a handler may remove its own registration
			evl_clone.remove_event(event.handle)?;
			evl_clone.disable_loop();
			Ok(())
		});

		evl.add_event(reader, Interest::READ, handler)?;
		write_impl(writer, b"x")?;
		evl.event_loop()?;

		assert_eq!(evl.registered_count()?, 0);

		close_impl(reader)?;
		close_impl(writer)?;
		Ok(())
	}

	// run an event loop on a dedicated thread until the returned closure is called
	fn start_loop(
		evl: &Arc<crate::EventLoop>,
	) -> std::thread::JoinHandle<Result<(), Error>> {
		let evl = evl.clone();
		spawn(move || -> Result<(), Error> { evl.event_loop() })
	}

	#[test]
	fn test_connection_read_fifo_order() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		let mut results = lock_box!(vec![]);
		let results_clone = results.clone();
		let (tx, rx) = test_info.sync_channel();

		let mut results_a = results.clone();
		conn.enqueue_read(
			4,
			Box::new(move |_conn, data| {
				wlock!(results_a).push(data.to_vec());
				Ok(())
			}),
		)?;
		conn.enqueue_read(
			3,
			Box::new(move |_conn, data| {
				wlock!(results).push(data.to_vec());
				tx.send(())?;
				Ok(())
			}),
		)?;

		// both requests are satisfied by a single burst of bytes
		write_impl(writer, b"abcdefg")?;
		rx.recv()?;

		// completions happened in enqueue order, each with exactly the requested bytes
		assert_eq!(rlock!(results_clone), vec![b"abcd".to_vec(), b"efg".to_vec()]);

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_connection_partial_read_resumes() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		let mut result = lock_box!(vec![]);
		let result_clone = result.clone();
		let (tx, rx) = test_info.sync_channel();

		conn.enqueue_read(
			1_000,
			Box::new(move |_conn, data| {
				wlock!(result) = data.to_vec();
				tx.send(())?;
				Ok(())
			}),
		)?;

		// a partial 600 bytes arrives. the request stays at the front of the queue.
		let part1: Vec<u8> = (0..600u32).map(|i| (i % 256) as u8).collect();
		write_impl(writer, &part1)?;
		sleep(Duration::from_millis(200));
		assert_eq!(rlock!(result_clone).len(), 0);

		// the remaining 400 bytes complete the request
		let part2: Vec<u8> = (600..1_000u32).map(|i| (i % 256) as u8).collect();
		write_impl(writer, &part2)?;
		rx.recv()?;

		// all 1000 bytes were assembled contiguously
		let expected: Vec<u8> = (0..1_000u32).map(|i| (i % 256) as u8).collect();
		assert_eq!(rlock!(result_clone), expected);

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_connection_interest_tracks_queues() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		// registration listens for peer close only
		{
			let state = conn.state.lock()?;
			assert!(state.interest.is_set(Interest::HANGUP));
			assert!(!state.interest.is_set(Interest::READ));
			assert!(!state.interest.is_set(Interest::WRITE));
		}

		let (tx, rx) = test_info.sync_channel();
		conn.enqueue_read(
			2,
			Box::new(move |_conn, _data| {
				tx.send(())?;
				Ok(())
			}),
		)?;

		// read interest is enabled iff the read queue is non-empty
		{
			let state = conn.state.lock()?;
			assert!(state.interest.is_set(Interest::READ));
		}

		write_impl(writer, b"ok")?;
		rx.recv()?;

		// the queue drained so read interest was disabled again
		assert!(wait_for(|| {
			let state = conn.state.lock()?;
			Ok(!state.interest.is_set(Interest::READ))
		})?);
		{
			let state = conn.state.lock()?;
			assert!(state.interest.is_set(Interest::HANGUP));
		}

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_connection_write_chunked_delivery() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		// the connection owns the write side of the pipe
		let conn = EvlBuilder::build_connection(writer, &evl, &logger)?;
		conn.register_event()?;

		let mut count = lock_box!(0usize);
		let count_clone = count.clone();
		let (tx, rx) = test_info.sync_channel();

		// 2000 bytes, written in bounded 1024 byte attempts
		let data: Vec<u8> = (0..2_000u32).map(|i| (i % 256) as u8).collect();
		conn.enqueue_write(
			data.clone(),
			Box::new(move |_conn| {
				wlock!(count) += 1;
				tx.send(())?;
				Ok(())
			}),
		)?;

		rx.recv()?;
		assert_eq!(rlock!(count_clone), 1);

		// the reader received every byte in order
		let mut received: Vec<u8> = vec![];
		let mut buf = [0u8; 4_096];
		loop {
			match read_impl(reader, &mut buf)? {
				Some(len) => received.extend(&buf[0..len]),
				None => break,
			}
			cbreak!(received.len() >= 2_000);
		}
		assert_eq!(received, data);

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(reader)?;
		Ok(())
	}

	#[test]
	fn test_connection_write_would_block_resumes() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(writer, &evl, &logger)?;
		conn.register_event()?;

		let (tx, rx) = test_info.sync_channel();

		// much larger than the pipe capacity so servicing must suspend on would-block
		// and resume across multiple readiness events
		let total = 200_000usize;
		let data: Vec<u8> = (0..total).map(|i| (i % 256) as u8).collect();
		conn.enqueue_write(
			data.clone(),
			Box::new(move |_conn| {
				tx.send(())?;
				Ok(())
			}),
		)?;

		// drain the read side until everything arrived
		let mut received: Vec<u8> = vec![];
		let mut buf = [0u8; 65_536];
		while received.len() < total {
			match read_impl(reader, &mut buf)? {
				Some(len) => received.extend(&buf[0..len]),
				None => sleep(Duration::from_millis(10)),
			}
		}
		rx.recv()?;

		assert_eq!(received.len(), total);
		assert_eq!(received, data);

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(reader)?;
		Ok(())
	}

	#[test]
	fn test_connection_reenqueue_from_callback() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		let mut results = lock_box!(vec![]);
		let results_clone = results.clone();
		let (tx, rx) = test_info.sync_channel();

		let mut results_outer = results.clone();
		conn.enqueue_read(
			3,
			Box::new(move |conn, data| {
				wlock!(results_outer).push(data.to_vec());
				// a completion callback may enqueue the next request itself
				conn.enqueue_read(
					3,
					Box::new(move |_conn, data| {
						wlock!(results).push(data.to_vec());
						tx.send(())?;
						Ok(())
					}),
				)?;
				Ok(())
			}),
		)?;

		write_impl(writer, b"abcdef")?;
		rx.recv()?;

		assert_eq!(rlock!(results_clone), vec![b"abc".to_vec(), b"def".to_vec()]);

		evl.disable_loop();
		let _ = jh.join();
		conn.close()?;
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_connection_close_discards_pending() -> Result<(), Error> {
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		let mut fired = lock_box!(false);
		let fired_clone = fired.clone();
		let mut fired_w = fired.clone();

		conn.enqueue_read(
			100,
			Box::new(move |_conn, _data| {
				wlock!(fired) = true;
				Ok(())
			}),
		)?;
		conn.enqueue_write(
			vec![0u8; 10],
			Box::new(move |_conn| {
				wlock!(fired_w) = true;
				Ok(())
			}),
		)?;

		// close discards both requests without executing their callbacks
		conn.close()?;
		assert!(conn.is_closed()?);
		assert_eq!(evl.registered_count()?, 0);
		{
			let state = conn.state.lock()?;
			assert_eq!(state.read_queue.len(), 0);
			assert_eq!(state.write_queue.len(), 0);
		}

		// closing again is a no-op
		conn.close()?;

		// subsequent enqueues fail
		let res = conn.enqueue_read(1, Box::new(|_conn, _data| Ok(())));
		match res.unwrap_err().kind() {
			ErrorKind::ClosedConnection(_) => {}
			_ => panic!("expected closed connection errorkind"),
		}
		let res = conn.enqueue_write(vec![1], Box::new(|_conn| Ok(())));
		match res.unwrap_err().kind() {
			ErrorKind::ClosedConnection(_) => {}
			_ => panic!("expected closed connection errorkind"),
		}

		sleep(Duration::from_millis(100));
		assert!(!rlock!(fired_clone));

		evl.disable_loop();
		let _ = jh.join();
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_connection_peer_close_drains_then_closes() -> Result<(), Error> {
		let test_info = test_info!()?;
		let logger = test_logger()?;
		let evl = event_loop!(logger, EvlTimeout(10))?;
		let (reader, writer) = pipe_impl()?;
		let jh = start_loop(&evl);

		let conn = EvlBuilder::build_connection(reader, &evl, &logger)?;
		conn.register_event()?;

		let mut drained = lock_box!(vec![]);
		let drained_clone = drained.clone();
		let mut second_fired = lock_box!(false);
		let second_fired_clone = second_fired.clone();
		let (tx, rx) = test_info.sync_channel();

		conn.enqueue_read(
			3,
			Box::new(move |_conn, data| {
				wlock!(drained) = data.to_vec();
				tx.send(())?;
				Ok(())
			}),
		)?;
		conn.enqueue_read(
			2,
			Box::new(move |_conn, _data| {
				wlock!(second_fired) = true;
				Ok(())
			}),
		)?;

		// the peer sends a partial payload then shuts down
		write_impl(writer, b"bye")?;
		rx.recv()?;
		close_impl(writer)?;

		// the readable data was drained into the first request before the shutdown
		// forced the connection closed. the second request never completes.
		assert_eq!(rlock!(drained_clone), b"bye".to_vec());
		assert!(wait_for(|| conn.is_closed())?);
		assert!(!rlock!(second_fired_clone));
		assert_eq!(evl.registered_count()?, 0);

		evl.disable_loop();
		let _ = jh.join();
		Ok(())
	}

	struct CountingHandler {
		count: Box<dyn LockBox<usize>>,
	}

	impl ConnectionHandler for CountingHandler {
		fn handle_init(&self, _connection: Arc<Connection>) -> Result<(), Error> {
			let mut count = self.count.clone();
			wlock!(count) += 1;
			Ok(())
		}
	}

	#[test]
	fn test_worker_thread_accept() -> Result<(), Error> {
		let logger = test_logger()?;
		let count = lock_box!(0usize);
		let handler = Arc::new(CountingHandler {
			count: count.clone(),
		});

		let worker =
			EvlBuilder::build_worker_thread(vec![ConfigOption::EvlTimeout(10)], handler, &logger)?;
		assert_eq!(worker.active_connection_count()?, 0);

		let (reader, writer) = pipe_impl()?;
		let conn = worker.accept(reader)?;

		// the init hook ran exactly once and the connection is registered
		assert_eq!(rlock!(count), 1);
		assert_eq!(worker.active_connection_count()?, 1);

		conn.close()?;
		assert_eq!(worker.active_connection_count()?, 0);
		close_impl(writer)?;
		Ok(())
	}

	#[test]
	fn test_worker_pool_round_robin() -> Result<(), Error> {
		let logger = test_logger()?;
		let count = lock_box!(0usize);
		let handler = Arc::new(CountingHandler {
			count: count.clone(),
		});

		let mut pool = worker_pool!(handler, logger, EvlThreads(3), EvlTimeout(10))?;
		assert_eq!(pool.size(), 3);
		pool.start()?;

		let mut conns = vec![];
		let mut writers = vec![];
		for _ in 0..7 {
			let (reader, writer) = pipe_impl()?;
			conns.push(pool.assign(reader)?);
			writers.push(writer);
		}

		// 7 handles over 3 workers in perfect rotation: 3 / 2 / 2
		assert_eq!(rlock!(count), 7);
		let workers = pool.workers();
		assert_eq!(workers[0].active_connection_count()?, 3);
		assert_eq!(workers[1].active_connection_count()?, 2);
		assert_eq!(workers[2].active_connection_count()?, 2);

		for conn in &conns {
			conn.close()?;
		}
		for writer in &writers {
			close_impl(*writer)?;
		}
		pool.shutdown()?;
		Ok(())
	}

	#[test]
	fn test_worker_pool_start_twice() -> Result<(), Error> {
		let logger = test_logger()?;
		let count = lock_box!(0usize);
		let handler = Arc::new(CountingHandler { count });

		let mut pool = worker_pool!(handler, logger, EvlThreads(1), EvlTimeout(10))?;
		pool.start()?;
		match pool.start().unwrap_err().kind() {
			ErrorKind::IllegalState(_) => {}
			_ => panic!("expected illegal state errorkind"),
		}
		pool.shutdown()?;
		Ok(())
	}

	#[test]
	fn test_worker_pool_config_errors() -> Result<(), Error> {
		let logger = test_logger()?;
		let count = lock_box!(0usize);
		let handler = Arc::new(CountingHandler { count });
		let handler_clone: Arc<dyn ConnectionHandler> = handler.clone();

		assert!(worker_pool!(handler, logger, EvlThreads(0)).is_err());
		assert!(
			EvlBuilder::build_worker_pool(
				vec![ConfigOption::MaxSizeBytes(100)],
				handler_clone,
				&logger
			)
			.is_err()
		);
		Ok(())
	}

	// an echo protocol: read 5 bytes, write them back, repeat
	struct EchoHandler {}

	impl ConnectionHandler for EchoHandler {
		fn handle_init(&self, connection: Arc<Connection>) -> Result<(), Error> {
			Self::next_request(&connection)
		}
	}

	impl EchoHandler {
		fn next_request(connection: &Arc<Connection>) -> Result<(), Error> {
			connection.enqueue_read(
				5,
				Box::new(|conn, data| {
					conn.enqueue_write(data.to_vec(), Box::new(|_conn| Ok(())))?;
					EchoHandler::next_request(conn)
				}),
			)
		}
	}

	#[test]
	fn test_worker_pool_echo() -> Result<(), Error> {
		let logger = test_logger()?;
		let handler = Arc::new(EchoHandler {});
		let mut pool = worker_pool!(handler, logger, EvlThreads(2), EvlTimeout(10))?;
		pool.start()?;

		let port = pick_free_port()?;
		let addr = format!("127.0.0.1:{}", port);
		let listener = TcpListener::bind(&addr)?;

		// two clients so both workers get a connection
		let mut clients = vec![];
		for _ in 0..2 {
			let client = TcpStream::connect(&addr)?;
			let (server_stream, _peer) = listener.accept()?;
			server_stream.set_nonblocking(true)?;
			pool.assign(server_stream.into_raw_fd())?;
			clients.push(client);
		}

		// each client echoes multiple round trips on its own connection
		for (i, client) in clients.iter_mut().enumerate() {
			let msg1 = format!("msg{}a", i);
			let msg2 = format!("msg{}b", i);
			client.write(msg1.as_bytes())?;
			client.write(msg2.as_bytes())?;

			let mut buf = [0u8; 10];
			client.read_exact(&mut buf)?;
			assert_eq!(&buf[0..5], msg1.as_bytes());
			assert_eq!(&buf[5..10], msg2.as_bytes());
		}

		pool.shutdown()?;
		Ok(())
	}
}
