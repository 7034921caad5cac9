// SPDX-License-Identifier: Apache-2.0

use std::sync::Barrier;
use std::thread;
use all_asserts::assert_le;
use pretty_assertions::assert_eq;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use rebuf::{Chunk, ChunkPool, Pool, PoolError};

#[macro_use]
#[allow(dead_code)]
mod common;

const CHUNK_SIZE: usize = 256;
const MAX_IDLE: usize = 10;

fn pool() -> Pool { Pool::new(CHUNK_SIZE, MAX_IDLE) }

#[test]
fn new() {
	assert_eq!(pool().size(), 0);
}

#[test]
fn get() {
	let pool = pool();
	for _ in 0..3 {
		let chunk = pool.get();
		assert_eq!(pool.size(), 0);
		assert_eq!(chunk.len(), 0);
		assert_eq!(chunk.capacity(), CHUNK_SIZE);
	}

	let a = pool.get();
	let b = pool.get();
	assert_ne!(a.as_ptr(), b.as_ptr());
}

#[test]
fn put_then_get_reuses_memory() {
	let pool = pool();
	let mut a = pool.get();
	a.extend_from_slice(b"abc");
	assert_eq!(a.len(), 3);
	let ptr = a.as_ptr();
	pool.put(a).unwrap();
	assert_eq!(pool.size(), 1);

	let b = pool.get();
	assert_eq!(b.as_ptr(), ptr);
	assert_eq!(b.len(), 0);
	assert_eq!(b.capacity(), CHUNK_SIZE);
	assert_eq!(pool.size(), 0);
	// Only the length is reset.
	assert_eq!(&b.as_raw()[..3], b"abc");
}

#[test]
fn put_beyond_max_idle_is_dropped() {
	let pool = pool();
	let chunks = (0..=MAX_IDLE).map(|_| pool.get()).collect::<Vec<_>>();
	let ptrs = chunks.iter().map(Chunk::as_ptr).collect::<Vec<_>>();

	let mut chunks = chunks.into_iter();
	for (i, chunk) in chunks.by_ref().take(MAX_IDLE).enumerate() {
		pool.put(chunk).unwrap();
		assert_eq!(pool.size(), i + 1);
	}

	let extra = chunks.next().unwrap();
	pool.put(extra).unwrap();
	assert_eq!(pool.size(), MAX_IDLE);
	assert_eq!(pool.get().as_ptr(), ptrs[MAX_IDLE - 1]);
}

#[test]
fn put_nil() {
	let pool = pool();
	let err = pool.put(None::<Chunk>).unwrap_err();
	assert!(matches!(err, PoolError::NilValue));
	assert_eq!(pool.size(), 0);
}

#[test]
fn put_wrong_capacity() {
	let pool = pool();
	for capacity in [CHUNK_SIZE + 1, CHUNK_SIZE - 1] {
		let err = pool.put(Chunk::with_capacity(capacity)).unwrap_err();
		assert!(
			matches!(err, PoolError::WrongCapacity { expected: CHUNK_SIZE, actual, .. } if actual == capacity),
			"unexpected error {err:?}"
		);
		assert_eq!(
			err.to_string(),
			format!("chunk of capacity {capacity} can't be put into a pool of capacity {CHUNK_SIZE}")
		);
		assert_eq!(pool.size(), 0);
	}
}

#[test]
fn zero_max_idle_keeps_nothing() {
	let pool = Pool::new(CHUNK_SIZE, 0);
	pool.put(pool.get()).unwrap();
	assert_eq!(pool.size(), 0);
}

#[test]
fn shared_between_threads() {
	const THREADS: usize = 8;
	let pool = pool();
	let barrier = Barrier::new(THREADS);
	thread::scope(|scope| {
		for _ in 0..THREADS {
			scope.spawn(|| {
				barrier.wait();
				for _ in 0..100 {
					let chunks = (0..4).map(|_| pool.get()).collect::<Vec<_>>();
					for chunk in chunks {
						assert_eq!(chunk.capacity(), CHUNK_SIZE);
						pool.put(chunk).unwrap();
					}
					assert_le!(pool.size(), MAX_IDLE);
				}
			});
		}
	});
	assert_le!(pool.size(), MAX_IDLE);
	assert_ne!(pool.size(), 0);
}

#[quickcheck]
fn get_is_empty(capacity: u8, max_idle: u8) -> TestResult {
	let pool = Pool::new(capacity as usize, max_idle as usize);
	let chunk = pool.get();
	if !chunk.is_empty() {
		return TestResult::failed()
	}
	qc_assert_eq!(chunk.capacity(), capacity as usize)
}

/// Replays a sequence of gets (`false`) and puts (`true`), checking the idle
/// count against a model of the stack.
#[quickcheck]
fn size_is_bounded(max_idle: u8, ops: Vec<bool>) -> TestResult {
	let max_idle = max_idle as usize % 8;
	let pool = Pool::new(4, max_idle);
	let mut held = Vec::new();
	let mut model = 0usize;
	for put in ops {
		if put {
			let Some(chunk) = held.pop() else { continue };
			pool.put(chunk).unwrap();
			model = (model + 1).min(max_idle);
		} else {
			held.push(pool.get());
			model = model.saturating_sub(1);
		}

		if pool.size() > max_idle {
			return TestResult::failed()
		}
	}
	qc_assert_eq!(pool.size(), model)
}
