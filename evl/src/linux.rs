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

use crate::types::{Event, Interest};
use nio_deps::errno::{errno, set_errno, Errno};
use nio_deps::libc::{
	self, c_int, c_void, close, epoll_create1, epoll_ctl, epoll_event, epoll_wait, read, write,
	EPOLLERR, EPOLLHUP, EPOLLIN, EPOLLOUT, EPOLLRDHUP, EPOLL_CLOEXEC, EPOLL_CTL_ADD,
	EPOLL_CTL_DEL, EPOLL_CTL_MOD,
};
use nio_err::*;
use std::os::unix::prelude::RawFd;

/// The platform's handle type. On linux this is a raw file descriptor.
pub type Handle = RawFd;

// reusable epoll_event buffer for a single event loop thread.
pub(crate) struct SelectorContext {
	pub(crate) epoll_events: Vec<epoll_event>,
}

impl SelectorContext {
	pub(crate) fn new(max_events: usize) -> Self {
		let mut epoll_events = vec![];
		epoll_events.resize(max_events, epoll_event { events: 0, u64: 0 });
		Self { epoll_events }
	}
}

fn interest_flags(interest: Interest) -> u32 {
	// EPOLLRDHUP is always registered so peer shutdown is reported even when no
	// request is pending
	let mut flags = EPOLLRDHUP;
	if interest.is_set(Interest::READ) {
		flags |= EPOLLIN;
	}
	if interest.is_set(Interest::WRITE) {
		flags |= EPOLLOUT;
	}
	flags as u32
}

pub(crate) fn create_selector_impl() -> Result<Handle, Error> {
	set_errno(Errno(0));
	let selector = unsafe { epoll_create1(EPOLL_CLOEXEC) };
	if selector < 0 {
		let fmt = format!("epoll_create1 failed: {}", errno());
		return Err(err!(ErrKind::Errno, fmt));
	}
	Ok(selector)
}

pub(crate) fn selector_add_impl(
	selector: Handle,
	handle: Handle,
	interest: Interest,
) -> Result<(), Error> {
	selector_ctl_impl(selector, handle, interest, EPOLL_CTL_ADD)
}

pub(crate) fn selector_modify_impl(
	selector: Handle,
	handle: Handle,
	interest: Interest,
) -> Result<(), Error> {
	selector_ctl_impl(selector, handle, interest, EPOLL_CTL_MOD)
}

pub(crate) fn selector_remove_impl(selector: Handle, handle: Handle) -> Result<(), Error> {
	set_errno(Errno(0));
	let res = unsafe { epoll_ctl(selector, EPOLL_CTL_DEL, handle, std::ptr::null_mut()) };
	if res < 0 {
		let fmt = format!("epoll_ctl (del) failed for handle {}: {}", handle, errno());
		return Err(err!(ErrKind::Errno, fmt));
	}
	Ok(())
}

fn selector_ctl_impl(
	selector: Handle,
	handle: Handle,
	interest: Interest,
	op: c_int,
) -> Result<(), Error> {
	set_errno(Errno(0));
	let mut event = epoll_event {
		events: interest_flags(interest),
		u64: try_into!(handle)?,
	};
	let res = unsafe { epoll_ctl(selector, op, handle, &mut event) };
	if res < 0 {
		let fmt = format!("epoll_ctl (op={}) failed for handle {}: {}", op, handle, errno());
		return Err(err!(ErrKind::Errno, fmt));
	}
	Ok(())
}

// wait for the next batch of readiness events, resolving them into the buffer of
// platform-independent events. a retryable interruption resolves to an empty batch.
pub(crate) fn selector_wait_impl(
	selector: Handle,
	ctx: &mut SelectorContext,
	events: &mut Vec<Event>,
	timeout: u16,
) -> Result<usize, Error> {
	events.clear();
	set_errno(Errno(0));
	let count = unsafe {
		epoll_wait(
			selector,
			ctx.epoll_events.as_mut_ptr(),
			try_into!(ctx.epoll_events.len())?,
			timeout as c_int,
		)
	};

	if count < 0 {
		if errno().0 == libc::EINTR {
			// interrupted, not an error. resolve to an empty batch.
			return Ok(0);
		}
		let fmt = format!("epoll_wait failed: {}", errno());
		return Err(err!(ErrKind::Errno, fmt));
	}

	for i in 0..try_into!(count)? {
		let flags = ctx.epoll_events[i].events;
		let mut interest = Interest::NONE;
		if flags & EPOLLIN as u32 != 0 {
			interest.set(Interest::READ);
		}
		if flags & EPOLLOUT as u32 != 0 {
			interest.set(Interest::WRITE);
		}
		if flags & (EPOLLRDHUP | EPOLLHUP | EPOLLERR) as u32 != 0 {
			interest.set(Interest::HANGUP);
		}
		let handle: Handle = try_into!(ctx.epoll_events[i].u64)?;
		events.push(Event { handle, interest });
	}

	Ok(events.len())
}

pub(crate) fn read_impl(handle: Handle, buf: &mut [u8]) -> Result<Option<usize>, Error> {
	set_errno(Errno(0));
	let cbuf: *mut c_void = buf as *mut _ as *mut c_void;
	let len = unsafe { read(handle, cbuf, buf.len()) };

	if len < 0 {
		let e = errno();
		if e.0 == libc::EAGAIN || e.0 == libc::EWOULDBLOCK {
			// would block, a retry-later signal, not an error
			return Ok(None);
		}
		let fmt = format!("read failed for handle {}: {}", handle, e);
		return Err(err!(ErrKind::IO, fmt));
	}

	Ok(Some(try_into!(len)?))
}

pub(crate) fn write_impl(handle: Handle, buf: &[u8]) -> Result<Option<usize>, Error> {
	set_errno(Errno(0));
	let cbuf: *const c_void = buf as *const _ as *const c_void;
	let len = unsafe { write(handle, cbuf, buf.len()) };

	if len < 0 {
		let e = errno();
		if e.0 == libc::EAGAIN || e.0 == libc::EWOULDBLOCK {
			// would block, a retry-later signal, not an error
			return Ok(None);
		}
		let fmt = format!("write failed for handle {}: {}", handle, e);
		return Err(err!(ErrKind::IO, fmt));
	}

	Ok(Some(try_into!(len)?))
}

pub(crate) fn close_impl(handle: Handle) -> Result<(), Error> {
	unsafe {
		close(handle);
	}
	Ok(())
}

// nonblocking pipe, used by the tests to exercise would-block conditions precisely.
#[cfg(test)]
pub(crate) fn pipe_impl() -> Result<(Handle, Handle), Error> {
	use nio_deps::libc::{fcntl, pipe, F_SETFL, O_NONBLOCK};

	let mut retfds = [0i32; 2];
	let fds: *mut c_int = &mut retfds as *mut _ as *mut c_int;
	set_errno(Errno(0));
	if unsafe { pipe(fds) } < 0 {
		let fmt = format!("pipe failed: {}", errno());
		return Err(err!(ErrKind::Errno, fmt));
	}
	unsafe { fcntl(retfds[0], F_SETFL, O_NONBLOCK) };
	unsafe { fcntl(retfds[1], F_SETFL, O_NONBLOCK) };
	Ok((retfds[0], retfds[1]))
}
