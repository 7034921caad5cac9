// SPDX-License-Identifier: Apache-2.0

mod read;
mod write;
mod options;

pub use options::*;
pub use read::ReadStatus;

use std::collections::VecDeque;
use std::fmt;
use std::fmt::{Debug, Formatter};
use log::debug;
use crate::{Chunk, Error, Result};
use crate::pool::{ChunkPool, Pool};

/// A dynamically-growing byte buffer made of chunks borrowed from a shared
/// [pool](ChunkPool).
///
/// Writes append to the last chunk, claiming a new one from the pool when it's
/// full. Every chunk but the last is always full, so any byte offset maps
/// directly to a chunk index. Reads copy out from a cursor without modifying
/// the data; [`read_at`](Self::read_at) reads from any offset without moving it.
///
/// The buffer must be [freed](Self::free) to return its chunks, which happens
/// automatically on drop. After freeing, reads and writes fail with
/// [`Closed`](crate::ErrorKind::Closed).
///
/// Buffers are not synchronized; share one between threads only behind a lock.
pub struct Buffer<P: ChunkPool = Pool> {
	pool: P,
	chunks: VecDeque<Chunk>,
	chunk_capacity: usize,
	/// Absolute read position.
	cursor: usize,
	/// Absolute write position, the total number of bytes written.
	len: usize,
	/// Bytes in chunks already returned to the pool, always a multiple of the
	/// chunk capacity.
	released: usize,
	retention: Retention,
}

impl<P: ChunkPool> Debug for Buffer<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Buffer")
			.field("chunks", &self.chunks)
			.field("chunk_capacity", &self.chunk_capacity)
			.field("cursor", &self.cursor)
			.field("len", &self.len)
			.field("released", &self.released)
			.field("retention", &self.retention)
			.finish_non_exhaustive()
	}
}

impl<P: ChunkPool> Buffer<P> {
	/// Creates a new buffer from `pool` with default options, claiming its first
	/// chunk. Fails if `pool` is `None`.
	/// A `None` pool needs its type spelled out, as in `Buffer::<Pool>::new(None)`.
	pub fn new(pool: impl Into<Option<P>>) -> Result<Self> {
		Self::with_options(pool, BufferOptions::default())
	}

	/// Creates a new buffer from `pool`, claiming its first chunk. Fails if
	/// `pool` is `None`.
	pub fn with_options(
		pool: impl Into<Option<P>>,
		BufferOptions { retention }: BufferOptions
	) -> Result<Self> {
		let pool = pool.into().ok_or_else(Error::nil_pool)?;
		let first = pool.get();
		let chunk_capacity = first.capacity();
		Ok(Self {
			pool,
			chunks: VecDeque::from([first]),
			chunk_capacity,
			cursor: 0,
			len: 0,
			released: 0,
			retention,
		})
	}

	/// Returns the options used to create the buffer.
	pub fn options(&self) -> BufferOptions {
		BufferOptions::new().with_retention(self.retention)
	}

	/// Returns the pool the buffer claims chunks from.
	pub fn pool(&self) -> &P { &self.pool }

	/// Returns the number of chunks held by the buffer.
	pub fn chunk_count(&self) -> usize { self.chunks.len() }
	/// Returns the capacity of each chunk, fixed when the buffer was created.
	pub fn chunk_capacity(&self) -> usize { self.chunk_capacity }
	/// Returns the total number of bytes written to the buffer.
	pub fn len(&self) -> usize { self.len }
	/// Returns `true` if nothing was written to the buffer.
	pub fn is_empty(&self) -> bool { self.len == 0 }
	/// Returns the read position.
	pub fn position(&self) -> usize { self.cursor }
	/// Returns the number of bytes left to read from the read position.
	pub fn remaining(&self) -> usize { self.len - self.cursor }
	/// Returns `true` if the buffer has been freed.
	pub fn is_closed(&self) -> bool { self.chunks.is_empty() }

	/// Copies the contents of all held chunks into a contiguous vector.
	pub fn snapshot(&self) -> Vec<u8> {
		let mut vec = Vec::with_capacity(self.len - self.released);
		for chunk in &self.chunks {
			vec.extend_from_slice(chunk.as_slice());
		}
		vec
	}

	/// Returns all chunks to the pool, closing the buffer. Freeing a closed buffer
	/// does nothing.
	pub fn free(&mut self) {
		if self.is_closed() { return }

		let count = self.chunks.len();
		for chunk in self.chunks.drain(..) {
			// Chunks the pool rejects or discards are dropped.
			let _ = self.pool.put(chunk);
		}
		self.cursor = 0;
		self.len = 0;
		self.released = 0;
		debug!("freed buffer, returned {count} chunks");
	}

	/// Maps a relative offset into retained chunks to a chunk and an offset within
	/// that chunk. Returns `None` past the last chunk.
	fn locate(&self, offset: usize) -> Option<(&Chunk, usize)> {
		if self.chunk_capacity == 0 { return None }

		let index = offset / self.chunk_capacity;
		self.chunks
			.get(index)
			.map(|chunk| (chunk, offset % self.chunk_capacity))
	}
}

impl<P: ChunkPool> Drop for Buffer<P> {
	fn drop(&mut self) {
		self.free();
	}
}
