// SPDX-License-Identifier: Apache-2.0

use log::trace;
use crate::{Buffer, Error, ErrorKind, OperationKind, Result, ResultContext};
use crate::pool::ChunkPool;

/// The outcome of a successful read.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReadStatus {
	/// The destination was filled.
	Complete(usize),
	/// Data ran out before the destination was filled. The count is still the
	/// number of bytes copied.
	EndOfData(usize),
}

impl ReadStatus {
	/// Returns the number of bytes read.
	pub fn count(self) -> usize {
		match self {
			Self::Complete(n) | Self::EndOfData(n) => n
		}
	}

	/// Returns `true` if data ran out before the destination was filled.
	pub fn is_end_of_data(self) -> bool {
		matches!(self, Self::EndOfData(_))
	}

	/// Converts a short read into an [`EndOfData`](crate::ErrorKind::EndOfData)
	/// error raised from `op`, discarding its count.
	pub fn into_result(self, op: OperationKind) -> Result<usize> {
		match self {
			Self::Complete(n) => Ok(n),
			Self::EndOfData(_) => Err(Error::end_of_data(op))
		}
	}
}

impl<P: ChunkPool> Buffer<P> {
	/// Reads bytes from the read position into `dst`, moving the position past
	/// the bytes read. Returns [`EndOfData`](ReadStatus::EndOfData) with the count
	/// actually read if fewer than `dst.len()` bytes were available. Reading into
	/// an empty slice always completes with `0`.
	pub fn read(&mut self, dst: &mut [u8]) -> Result<ReadStatus> {
		let status = self.read_from(dst, self.cursor).context(OperationKind::Read)?;
		self.cursor += status.count();
		if self.retention.is_eager() {
			self.release_consumed();
		}
		Ok(status)
	}

	/// Reads bytes starting at `offset` into `dst`, without moving the read
	/// position. Offsets past the end of the data read nothing and return
	/// [`EndOfData`](ReadStatus::EndOfData).
	///
	/// With [eager retention](crate::Retention::Eager), offsets in chunks already
	/// returned to the pool fail with [`Released`](crate::ErrorKind::Released),
	/// unless `dst` is empty.
	pub fn read_at(&self, dst: &mut [u8], offset: usize) -> Result<ReadStatus> {
		self.read_from(dst, offset).context(OperationKind::ReadAt)
	}

	/// Fills `dst` from the read position. Fails with
	/// [`EndOfData`](crate::ErrorKind::EndOfData), reading nothing, if fewer than
	/// `dst.len()` bytes remain.
	pub fn read_exact(&mut self, dst: &mut [u8]) -> Result {
		if self.is_closed() {
			return Err(Error::closed(OperationKind::Read))
		}
		if self.remaining() < dst.len() {
			return Err(Error::end_of_data(OperationKind::Read))
		}

		self.read(dst)?.into_result(OperationKind::Read)?;
		Ok(())
	}

	fn read_from(&self, dst: &mut [u8], offset: usize) -> Result<ReadStatus, ErrorKind> {
		if self.is_closed() {
			return Err(ErrorKind::Closed)
		}
		if dst.is_empty() {
			return Ok(ReadStatus::Complete(0))
		}
		if offset < self.released {
			return Err(ErrorKind::Released)
		}

		let mut offset = offset - self.released;
		let mut count = 0;
		while count < dst.len() {
			let Some((chunk, pos)) = self.locate(offset) else { break };
			let n = chunk.read_at(&mut dst[count..], pos);
			if n == 0 { break }

			offset += n;
			count += n;
		}

		Ok(if count < dst.len() {
			ReadStatus::EndOfData(count)
		} else {
			ReadStatus::Complete(count)
		})
	}

	/// Returns fully-read chunks to the pool, keeping at least the last chunk.
	fn release_consumed(&mut self) {
		let Self { pool, chunks, chunk_capacity, cursor, released, .. } = self;
		while chunks.len() > 1 && *cursor - *released >= *chunk_capacity {
			let Some(chunk) = chunks.pop_front() else { break };
			let _ = pool.put(chunk);
			*released += *chunk_capacity;
			trace!("released consumed chunk, {released} bytes released");
		}
	}
}
