// SPDX-License-Identifier: Apache-2.0

use log::trace;
use crate::{Buffer, Chunk, Error, ErrorKind, OperationKind::Write, Result, ResultContext};
use crate::pool::ChunkPool;

impl<P: ChunkPool> Buffer<P> {
	/// Appends all of `data` to the buffer, claiming chunks from the pool as
	/// needed, and returns its length.
	///
	/// All chunks needed for the write are claimed before any data is copied. If
	/// the buffer can't grow to fit `data`, this fails with
	/// [`CapacityExceeded`](crate::ErrorKind::CapacityExceeded) and the buffer is
	/// left unchanged.
	pub fn write(&mut self, data: &[u8]) -> Result<usize> {
		if self.is_closed() {
			return Err(Error::closed(Write))
		}
		if data.is_empty() {
			return Ok(0)
		}

		self.reserve(data.len()).context(Write)?;

		// Reserving succeeded, so the chunk capacity is non-zero.
		let start = (self.len - self.released) / self.chunk_capacity;
		let mut rest = data;
		for chunk in self.chunks.range_mut(start..) {
			let n = chunk.extend_from_slice(rest);
			rest = &rest[n..];
			if rest.is_empty() { break }
		}
		debug_assert!(rest.is_empty(), "reserved chunks should fit all data");

		self.len += data.len();
		Ok(data.len())
	}

	/// Appends the UTF-8 bytes of `text` to the buffer. See [`write`](Self::write).
	pub fn write_str(&mut self, text: &str) -> Result<usize> {
		self.write(text.as_bytes())
	}

	/// Claims enough chunks to write `count` more bytes.
	fn reserve(&mut self, count: usize) -> Result<(), ErrorKind> {
		let Self { pool, chunks, chunk_capacity, len, .. } = self;

		if len.checked_add(count).is_none() {
			return Err(ErrorKind::CapacityExceeded)
		}

		let limit = chunks.back().map_or(0, Chunk::limit);
		if count <= limit {
			return Ok(())
		}
		if *chunk_capacity == 0 {
			return Err(ErrorKind::CapacityExceeded)
		}

		let needed = (count - limit).div_ceil(*chunk_capacity);
		let mut claimed = Vec::with_capacity(needed);
		for _ in 0..needed {
			let chunk = pool.get();
			let fits = chunk.capacity() == *chunk_capacity && chunk.is_empty();
			claimed.push(chunk);
			if !fits {
				for chunk in claimed {
					let _ = pool.put(chunk);
				}
				return Err(ErrorKind::CapacityExceeded)
			}
		}

		trace!("claimed {needed} chunks for a {count}-byte write");
		chunks.extend(claimed);
		Ok(())
	}
}
