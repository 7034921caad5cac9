// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::io::{Read, Write};
use crate::{Buffer, Error, ErrorKind};
use crate::pool::ChunkPool;

impl From<Error> for io::Error {
	fn from(value: Error) -> Self {
		let kind = match value.kind() {
			ErrorKind::Closed           => io::ErrorKind::BrokenPipe,
			ErrorKind::EndOfData        => io::ErrorKind::UnexpectedEof,
			ErrorKind::NilPool          => io::ErrorKind::InvalidInput,
			ErrorKind::CapacityExceeded => io::ErrorKind::OutOfMemory,
			ErrorKind::Released         => io::ErrorKind::InvalidInput,
			ErrorKind::Pool             => io::ErrorKind::Other,
		};
		io::Error::new(kind, value)
	}
}

impl<P: ChunkPool> Read for Buffer<P> {
	/// Reads from the read position. A short read is not an error; reading
	/// returns `0` once all data has been read.
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		Ok(Buffer::read(self, buf)?.count())
	}
}

impl<P: ChunkPool> Write for Buffer<P> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Ok(Buffer::write(self, buf)?)
	}

	/// Does nothing; written data is immediately readable.
	fn flush(&mut self) -> io::Result<()> { Ok(()) }
}
