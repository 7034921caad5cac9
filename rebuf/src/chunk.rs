// SPDX-License-Identifier: Apache-2.0

use std::cmp::min;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;

/// A fixed-capacity block of heap memory with a length marker, the unit of
/// memory recycled by the [pool](crate::Pool).
///
/// Chunks are move-only: [`put`](crate::ChunkPool::put) takes a chunk by value,
/// so it can't be touched after being returned. The block is never reallocated;
/// its capacity is fixed when the chunk is created. Clearing a chunk only resets
/// its length, the bytes from previous use are left in place.
pub struct Chunk {
	data: Box<[u8]>,
	len: usize,
}

impl Chunk {
	/// Allocates a new, empty chunk of `capacity` bytes.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: vec![0; capacity].into_boxed_slice(),
			len: 0,
		}
	}

	/// Returns the number of bytes written to the chunk.
	#[inline]
	pub fn len(&self) -> usize { self.len }
	/// Returns the fixed capacity of the chunk.
	#[inline]
	pub fn capacity(&self) -> usize { self.data.len() }
	/// Returns the number of bytes that can still be written.
	#[inline]
	pub fn limit(&self) -> usize { self.capacity() - self.len }
	#[inline]
	pub fn is_empty(&self) -> bool { self.len == 0 }
	#[inline]
	pub fn is_full(&self) -> bool { self.len == self.capacity() }

	/// Returns the written bytes.
	#[inline]
	pub fn as_slice(&self) -> &[u8] { &self.data[..self.len] }

	/// Returns a pointer to the start of the block. Two chunks with the same
	/// pointer share the same memory.
	#[inline]
	pub fn as_ptr(&self) -> *const u8 { self.data.as_ptr() }

	/// Returns the whole block, including stale bytes past the length marker.
	pub fn as_raw(&self) -> &[u8] { &self.data }

	/// Resets the length to zero without touching the memory.
	#[inline]
	pub fn clear(&mut self) { self.len = 0 }

	/// Copies as much of `src` as fits into the unused part of the chunk,
	/// returning the number of bytes copied.
	pub fn extend_from_slice(&mut self, src: &[u8]) -> usize {
		let n = min(self.limit(), src.len());
		let end = self.len + n;
		self.data[self.len..end].copy_from_slice(&src[..n]);
		self.len = end;
		n
	}

	/// Copies bytes starting at `offset` into `dst`, returning the number of
	/// bytes copied. Returns `0` if `offset` is at or past the length.
	pub(crate) fn read_at(&self, dst: &mut [u8], offset: usize) -> usize {
		let Some(src) = self.as_slice().get(offset..) else { return 0 };
		let n = min(src.len(), dst.len());
		dst[..n].copy_from_slice(&src[..n]);
		n
	}
}

impl Deref for Chunk {
	type Target = [u8];

	fn deref(&self) -> &[u8] { self.as_slice() }
}

impl From<Vec<u8>> for Chunk {
	/// Creates a chunk from a vector, keeping its contents. The chunk's capacity
	/// is the vector's capacity.
	fn from(mut value: Vec<u8>) -> Self {
		let len = value.len();
		value.resize(value.capacity(), 0);
		Self { data: value.into_boxed_slice(), len }
	}
}

impl Debug for Chunk {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Chunk")
			.field("len", &self.len)
			.field("capacity", &self.capacity())
			.finish_non_exhaustive()
	}
}
