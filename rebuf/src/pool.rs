// SPDX-License-Identifier: Apache-2.0

//! A bounded, thread-safe store of reusable [chunks](Chunk).
//!
//! The pool keeps at most `max_idle` chunks, all empty and all of the same
//! capacity. Chunks are handed out most-recently-returned first. When the pool
//! is empty, a fresh chunk is allocated instead; when it's full, returned chunks
//! are dropped.

use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use itertools::Itertools;
use log::debug;
use crate::Chunk;

pub const DEFAULT_CHUNK_SIZE: usize = 8192;
pub const DEFAULT_MAX_IDLE: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
	#[error("a nil chunk can't be put into the pool")]
	NilValue,
	/// The chunk's capacity doesn't match the pool's. The rejected chunk is
	/// returned to the caller.
	#[error("chunk of capacity {actual} can't be put into a pool of capacity {expected}")]
	WrongCapacity {
		chunk: Chunk,
		expected: usize,
		actual: usize,
	},
}

impl PoolError {
	/// Takes back the chunk rejected by the pool, if any.
	pub fn into_chunk(self) -> Option<Chunk> {
		match self {
			Self::NilValue => None,
			Self::WrongCapacity { chunk, .. } => Some(chunk)
		}
	}
}

/// A source of fixed-capacity chunks shared between buffers.
pub trait ChunkPool: Clone {
	/// Returns the capacity of every chunk claimed from the pool.
	fn item_capacity(&self) -> usize;

	/// Claims a single, empty chunk. Never fails; a chunk is allocated if the
	/// pool has none.
	fn get(&self) -> Chunk;

	/// Collects a chunk back into the pool. Ownership of the chunk passes to the
	/// pool whether it's kept or dropped, except on error, where the chunk (if
	/// any) is handed back in the error.
	fn put(&self, chunk: impl Into<Option<Chunk>>) -> Result<(), PoolError>;

	/// Returns the number of idle chunks in the pool.
	fn size(&self) -> usize;
}

/// Options for creating a [`Pool`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct PoolOptions {
	pub item_capacity: usize,
	pub max_idle: usize,
}

impl Default for PoolOptions {
	fn default() -> Self { Self::new() }
}

impl PoolOptions {
	/// Creates a new set of pool options with 8KiB chunks, keeping at most 64
	/// of them.
	pub const fn new() -> Self {
		Self {
			item_capacity: DEFAULT_CHUNK_SIZE,
			max_idle: DEFAULT_MAX_IDLE,
		}
	}

	/// Sets the capacity of pooled chunks.
	#[inline]
	pub const fn with_item_capacity(mut self, value: usize) -> Self {
		self.item_capacity = value;
		self
	}

	/// Sets the maximum number of idle chunks the pool retains.
	#[inline]
	pub const fn with_max_idle(mut self, value: usize) -> Self {
		self.max_idle = value;
		self
	}
}

struct IdleChunks {
	stack: Vec<Chunk>,
	item_capacity: usize,
	max_idle: usize,
}

/// A shared handle to a chunk pool. Cloning the handle is cheap; all clones
/// refer to the same pool.
#[derive(Clone)]
pub struct Pool(Arc<Mutex<IdleChunks>>);

impl Default for Pool {
	fn default() -> Self { PoolOptions::default().into() }
}

impl From<PoolOptions> for Pool {
	fn from(PoolOptions { item_capacity, max_idle }: PoolOptions) -> Self {
		Self::new(item_capacity, max_idle)
	}
}

impl Debug for Pool {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let idle = self.lock();
		f.debug_struct("Pool")
			.field("item_capacity", &idle.item_capacity)
			.field("max_idle", &idle.max_idle)
			.field("size", &idle.stack.len())
			.finish()
	}
}

impl Pool {
	/// Creates a new pool of chunks with `item_capacity` bytes each, retaining at
	/// most `max_idle` unused chunks.
	pub fn new(item_capacity: usize, max_idle: usize) -> Self {
		Self(Arc::new(Mutex::new(IdleChunks {
			stack: Vec::new(),
			item_capacity,
			max_idle,
		})))
	}

	/// Returns the maximum number of idle chunks the pool retains.
	pub fn max_idle(&self) -> usize { self.lock().max_idle }

	/// Allocates idle chunks until at least `count` are available, up to the
	/// pool's maximum.
	pub fn reserve(&self, count: usize) {
		let mut idle = self.lock();
		let target = count.min(idle.max_idle);
		let missing = target.saturating_sub(idle.stack.len());
		let capacity = idle.item_capacity;
		let fresh = (0..missing).map(|_| Chunk::with_capacity(capacity)).collect_vec();
		idle.stack.extend(fresh);
	}

	/// Drops all idle chunks, freeing their memory.
	pub fn shed(&self) {
		let dropped = {
			let mut idle = self.lock();
			idle.stack.drain(..).collect_vec()
		};
		debug!("shed {} idle chunks", dropped.len());
	}

	/// Locks the pool, ignoring poisoning. No operation leaves the idle stack
	/// half-modified.
	fn lock(&self) -> MutexGuard<'_, IdleChunks> {
		self.0.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

impl ChunkPool for Pool {
	fn item_capacity(&self) -> usize { self.lock().item_capacity }

	fn get(&self) -> Chunk {
		let (chunk, capacity) = {
			let mut idle = self.lock();
			(idle.stack.pop(), idle.item_capacity)
		};
		chunk.unwrap_or_else(|| Chunk::with_capacity(capacity))
	}

	fn put(&self, chunk: impl Into<Option<Chunk>>) -> Result<(), PoolError> {
		let Some(mut chunk) = chunk.into() else {
			debug!("rejected nil chunk");
			return Err(PoolError::NilValue)
		};

		let mut idle = self.lock();
		let expected = idle.item_capacity;
		let actual = chunk.capacity();
		if actual != expected {
			debug!("rejected chunk of capacity {actual}, expected {expected}");
			return Err(PoolError::WrongCapacity { chunk, expected, actual })
		}

		if idle.stack.len() >= idle.max_idle {
			debug!("pool is full at {} chunks, dropping chunk", idle.max_idle);
			return Ok(())
		}

		chunk.clear();
		idle.stack.push(chunk);
		Ok(())
	}

	fn size(&self) -> usize { self.lock().stack.len() }
}
