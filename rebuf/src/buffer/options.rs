// SPDX-License-Identifier: Apache-2.0

/// Options for tuning [`Buffer`](super::Buffer)'s behavior.
///
/// # Retention
///
/// Controls when chunks consumed by sequential reads go back to the pool. By
/// default chunks are kept until the buffer is freed, so [`read_at`] works for
/// any offset ever written. With [`Retention::Eager`], each chunk is returned as
/// soon as a read moves past it, trading random access to consumed data for a
/// lower memory footprint.
///
/// [`read_at`]: super::Buffer::read_at
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub struct BufferOptions {
	pub retention: Retention,
}

/// The chunk retention policy.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Retention {
	/// Keep every chunk until the buffer is freed.
	#[default]
	Deferred,
	/// Return fully-read chunks to the pool while more chunks follow them.
	Eager,
}

impl Retention {
	/// Returns `true` if the policy is [`Deferred`](Self::Deferred).
	pub fn is_deferred(&self) -> bool {
		matches!(self, Self::Deferred)
	}

	/// Returns `true` if the policy is [`Eager`](Self::Eager).
	pub fn is_eager(&self) -> bool {
		matches!(self, Self::Eager)
	}
}

impl BufferOptions {
	/// Creates a new set of buffer options.
	pub const fn new() -> Self {
		Self { retention: Retention::Deferred }
	}

	/// Presets the options to release consumed chunks eagerly.
	#[inline]
	pub const fn eager() -> Self {
		Self { retention: Retention::Eager }
	}

	/// Returns the chunk retention policy.
	#[inline]
	pub const fn retention(&self) -> Retention { self.retention }

	/// Sets the chunk retention policy.
	#[inline]
	pub const fn with_retention(mut self, value: Retention) -> Self {
		self.retention = value;
		self
	}
}
