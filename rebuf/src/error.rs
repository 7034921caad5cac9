// Copyright 2023 Strixpyrr
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

use std::{fmt, result};
use std::error::Error as StdError;
use std::fmt::{Display, Formatter};
use amplify_derive::Display;
use crate::PoolError;

pub type Result<T = (), E = Error> = result::Result<T, E>;

/// The buffer operation an [`Error`] was raised from.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum OperationKind {
	#[display("create buffer")]
	Construct,
	#[display("read from buffer")]
	Read,
	#[display("read from buffer at offset")]
	ReadAt,
	#[display("write to buffer")]
	Write,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum ErrorKind {
	/// No pool was given to the buffer.
	#[display("no pool was provided")]
	NilPool,
	/// The buffer was freed.
	#[display("buffer closed")]
	Closed,
	/// Fewer bytes were available than requested.
	#[display("premature end-of-data")]
	EndOfData,
	/// The buffer can't grow to fit the written data.
	#[display("buffer capacity exceeded")]
	CapacityExceeded,
	/// The offset points into a chunk already returned to the pool.
	#[display("offset was already released to the pool")]
	Released,
	/// The pool rejected a chunk.
	#[display("pool rejected chunk")]
	Pool,
}

/// The broad class of an [`ErrorKind`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Display)]
pub enum ErrorCategory {
	#[display("invalid argument")]
	InvalidArgument,
	#[display("closed resource")]
	ClosedResource,
	#[display("end of data")]
	EndOfData,
	#[display("capacity exceeded")]
	CapacityExceeded,
	#[display("released data")]
	Released,
}

impl ErrorKind {
	/// Returns the category of this kind.
	pub fn category(self) -> ErrorCategory {
		match self {
			Self::NilPool          => ErrorCategory::InvalidArgument,
			Self::Closed           => ErrorCategory::ClosedResource,
			Self::EndOfData        => ErrorCategory::EndOfData,
			Self::CapacityExceeded => ErrorCategory::CapacityExceeded,
			Self::Released         => ErrorCategory::Released,
			Self::Pool             => ErrorCategory::InvalidArgument,
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Error {
	op: OperationKind,
	kind: ErrorKind,
}

impl Display for Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let Self { op, kind } = self;
		write!(f, "{op} failed; {kind}")
	}
}

impl StdError for Error { }

impl Error {
	pub(crate) fn new(op: OperationKind, kind: ErrorKind) -> Self {
		Self { op, kind }
	}

	/// Creates a new "no pool" error.
	pub fn nil_pool() -> Self { Self::new(OperationKind::Construct, ErrorKind::NilPool) }

	/// Creates a new "closed" error.
	pub fn closed(op: OperationKind) -> Self { Self::new(op, ErrorKind::Closed) }

	/// Creates a new "end-of-data" error.
	pub fn end_of_data(op: OperationKind) -> Self { Self::new(op, ErrorKind::EndOfData) }

	/// Creates a new "capacity exceeded" error.
	pub fn capacity_exceeded(op: OperationKind) -> Self {
		Self::new(op, ErrorKind::CapacityExceeded)
	}

	/// Creates a new "released" error.
	pub fn released(op: OperationKind) -> Self { Self::new(op, ErrorKind::Released) }

	/// Returns the operation kind.
	pub fn operation(&self) -> OperationKind { self.op }

	/// Returns the error kind.
	pub fn kind(&self) -> ErrorKind { self.kind }

	/// Returns `true` if the error was caused by a closed buffer.
	pub fn is_closed(&self) -> bool { self.kind == ErrorKind::Closed }

	/// Returns `true` if the error is a short read.
	pub fn is_end_of_data(&self) -> bool { self.kind == ErrorKind::EndOfData }
}

/// Attaches the [operation](OperationKind) that failed to a result.
pub trait ResultContext<T> {
	fn context(self, op: OperationKind) -> Result<T>;
}

impl<T> ResultContext<T> for Result<T, ErrorKind> {
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|kind| Error::new(op, kind))
	}
}

impl<T> ResultContext<T> for Result<T, PoolError> {
	fn context(self, op: OperationKind) -> Result<T> {
		self.map_err(|_| Error::new(op, ErrorKind::Pool))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let err = Error::closed(OperationKind::Write);
		assert_eq!(err.to_string(), "write to buffer failed; buffer closed");
	}

	#[test]
	fn categories() {
		assert_eq!(ErrorKind::NilPool.category(), ErrorCategory::InvalidArgument);
		assert_eq!(ErrorKind::Closed.category(), ErrorCategory::ClosedResource);
		assert_eq!(ErrorKind::EndOfData.category(), ErrorCategory::EndOfData);
		assert_eq!(ErrorKind::CapacityExceeded.category(), ErrorCategory::CapacityExceeded);
		assert_eq!(ErrorKind::Pool.category(), ErrorCategory::InvalidArgument);
	}

	#[test]
	fn context() {
		let result: Result<(), ErrorKind> = Err(ErrorKind::Released);
		let err = result.context(OperationKind::ReadAt).unwrap_err();
		assert_eq!(err, Error::released(OperationKind::ReadAt));

		let result: Result<(), PoolError> = Err(PoolError::NilValue);
		let err = result.context(OperationKind::Write).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Pool);
		assert_eq!(err.to_string(), "write to buffer failed; pool rejected chunk");

		let ok: Result<u8, ErrorKind> = Ok(1);
		assert_eq!(ok.context(OperationKind::Read), Ok(1));
	}

	#[test]
	fn nil_pool() {
		let err = Error::nil_pool();
		assert_eq!(err.operation(), OperationKind::Construct);
		assert_eq!(err.to_string(), "create buffer failed; no pool was provided");
	}
}
