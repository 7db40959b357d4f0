//! Internal read buffer management.
//!
//! A split fills one block-sized buffer per block and copies the filled
//! prefix out as the payload. Buffers are pooled per thread so splitting
//! many files back to back does not reallocate them. This is an
//! implementation detail and not part of the public API.

mod pool;

pub(crate) use pool::Buffer;
