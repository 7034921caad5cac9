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

//! ## How it works
//!
//! Data is written to and read from fixed-capacity blocks of memory called
//! *chunks*. Chunks come from a *pool* shared by any number of buffers and
//! threads. The pool keeps a bounded stack of idle chunks; claiming a chunk pops
//! the most recently returned one, or allocates a new one when the stack is
//! empty. Returning a chunk resets its length, but not its memory, and pushes it
//! back, unless the pool is already at its idle limit, in which case the chunk
//! is dropped.
//!
//! ### Buffers
//!
//! A [`Buffer`] is a growable byte sequence made of chunks from one pool. Writes
//! fill the last chunk then claim more as needed, so every chunk but the last
//! is full. Because of this, a byte offset maps straight to a chunk by dividing
//! by the chunk capacity, and reads at any offset are cheap.
//!
//! Sequential reads move a cursor through the data. By default, chunks stay in
//! the buffer until it's freed, keeping every written offset readable. With
//! [`Retention::Eager`], fully read chunks go back to the pool as the cursor
//! passes them.
//!
//! Freeing a buffer, or dropping it, returns all of its chunks to the pool. A
//! freed buffer is closed; further reads and writes fail.
//!
//! ```
//! use rebuf::{Buffer, Pool, ReadStatus};
//!
//! let pool = Pool::new(5, 100);
//! let mut buffer = Buffer::new(pool.clone())?;
//! buffer.write_str("hello world")?;
//! assert_eq!(buffer.chunk_count(), 3);
//!
//! let mut dst = [0; 20];
//! assert_eq!(buffer.read(&mut dst)?, ReadStatus::EndOfData(11));
//!
//! buffer.free();
//! assert_eq!(buffer.chunk_count(), 0);
//! # Ok::<(), rebuf::Error>(())
//! ```

mod buffer;
mod chunk;
mod error;
mod pool;
mod std_io;

pub use buffer::*;
pub use chunk::Chunk;
pub use error::*;
pub use pool::{ChunkPool, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_IDLE, Pool, PoolError, PoolOptions};
