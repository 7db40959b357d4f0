//! Thread-local pool of block-sized read buffers.

use std::cell::RefCell;
use std::io::{self, ErrorKind, Read};

use crate::config::DEFAULT_BLOCK_SIZE;

/// Buffers larger than this are freed instead of returned to the pool.
pub const MAX_POOLED_CAPACITY: usize = 2 * DEFAULT_BLOCK_SIZE;

/// Maximum number of buffers to keep per thread.
pub const MAX_POOL_SIZE: usize = 4;

/// A reusable buffer sized for one block.
pub struct Buffer {
    data: Vec<u8>,
}

impl Buffer {
    /// Takes a buffer of exactly `len` bytes from the thread-local pool, or
    /// allocates one.
    ///
    /// Contents are unspecified; callers only ever look at the prefix
    /// [`Buffer::fill_from`] reports as filled.
    pub fn take(len: usize) -> Self {
        let mut data = THREAD_BUFFER_POOL
            .with(|pool| pool.borrow_mut().pop())
            .unwrap_or_default();
        data.resize(len, 0);
        Self { data }
    }

    /// Size of the buffer.
    #[cfg(test)]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Grows the buffer to at least `len` bytes.
    pub fn ensure(&mut self, len: usize) {
        if self.data.len() < len {
            self.data.resize(len, 0);
        }
    }

    /// Reads from `reader` into `[filled..want]` until `want` bytes are
    /// buffered or the reader is exhausted, and returns the new fill level.
    ///
    /// Short reads are accumulated; only a read of zero bytes ends the fill
    /// early. `Interrupted` is retried.
    pub fn fill_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        mut filled: usize,
        want: usize,
    ) -> io::Result<usize> {
        debug_assert!(filled <= want && want <= self.data.len());
        let target = &mut self.data[..want];

        while filled < want {
            match reader.read(&mut target[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(filled)
    }

    /// The first `len` bytes of the buffer.
    pub fn filled(&self, len: usize) -> &[u8] {
        &self.data[..len]
    }

    /// Mutable access for fills driven from outside (async reads).
    #[cfg(feature = "async-io")]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        if self.data.capacity() <= MAX_POOLED_CAPACITY {
            let data = std::mem::take(&mut self.data);
            // The pool may already be gone during thread teardown.
            let _ = THREAD_BUFFER_POOL.try_with(|pool| {
                let mut pool = pool.borrow_mut();
                if pool.len() < MAX_POOL_SIZE {
                    pool.push(data);
                }
            });
        }
    }
}

thread_local! {
    static THREAD_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.step.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_take_has_requested_len() {
        let buf = Buffer::take(1000);
        assert_eq!(buf.size(), 1000);
    }

    #[test]
    fn test_fill_accumulates_short_reads() {
        let mut buf = Buffer::take(8);
        let mut reader = Trickle {
            data: b"abcdefghij",
            step: 3,
        };

        assert_eq!(buf.fill_from(&mut reader, 0, 8).unwrap(), 8);
        assert_eq!(buf.filled(8), b"abcdefgh");

        assert_eq!(buf.fill_from(&mut reader, 0, 8).unwrap(), 2);
        assert_eq!(buf.filled(2), b"ij");

        assert_eq!(buf.fill_from(&mut reader, 0, 8).unwrap(), 0);
    }

    #[test]
    fn test_fill_resumes_after_prefix() {
        let mut buf = Buffer::take(1);
        let mut reader: &[u8] = b"xyz";

        assert_eq!(buf.fill_from(&mut reader, 0, 1).unwrap(), 1);
        buf.ensure(4);
        assert_eq!(buf.fill_from(&mut reader, 1, 4).unwrap(), 3);
        assert_eq!(buf.filled(3), b"xyz");
    }

    #[test]
    fn test_fill_retries_interrupted() {
        struct InterruptOnce(bool);
        impl Read for InterruptOnce {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.0 {
                    self.0 = true;
                    return Err(ErrorKind::Interrupted.into());
                }
                buf[0] = 7;
                Ok(1)
            }
        }

        let mut buf = Buffer::take(2);
        assert_eq!(buf.fill_from(&mut InterruptOnce(false), 0, 2).unwrap(), 2);
        assert_eq!(buf.filled(2), &[7, 7]);
    }

    #[test]
    fn test_buffer_reuse() {
        {
            let mut buf = Buffer::take(16);
            buf.fill_from(&mut &b"stale bytes here"[..], 0, 16).unwrap();
        }

        // A recycled buffer is resized to the new request.
        let buf = Buffer::take(4);
        assert_eq!(buf.size(), 4);
    }
}
