// SPDX-License-Identifier: Apache-2.0

use std::fmt::Debug;
use rebuf::{Buffer, Pool};

/// Like `assert_eq`, but returns a failed quickcheck result instead of
/// panicking, so the failing input is shrunk and reported.
macro_rules! qc_assert_eq {
	($left:expr,$right:expr) => {{
		let left = $left;
		let right = $right;
		if left == right {
			TestResult::passed()
		} else {
			TestResult::error(common::format_qc_assert_error(&left, &right))
		}
	}};
}

pub fn format_qc_assert_error<L: Debug, R: Debug>(left: &L, right: &R) -> String {
	format!(
		"assertion failed `(left == right)`:\n \
		left: `{left:?}`,\nright: `{right:?}`",
	)
}

/// Maps an arbitrary byte to a small, non-zero chunk capacity, so generated
/// data spans several chunks.
pub fn small_capacity(seed: u8) -> usize {
	seed as usize % 16 + 1
}

/// Creates a buffer holding `data`, with chunks of `capacity` bytes.
pub fn buffer_with(capacity: usize, data: &[u8]) -> Buffer {
	let mut buffer = Buffer::new(Pool::new(capacity, 8)).unwrap();
	buffer.write(data).unwrap();
	buffer
}
