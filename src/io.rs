//! Input and output capabilities the codec runs against.
//!
//! The [`Reader`](crate::Reader) and [`Writer`](crate::Writer) never touch a
//! transport directly. They pull bytes from an [`InputStream`] and push bytes
//! into an [`OutputStream`], so the same codec serves memory buffers, files
//! and sockets. Blocking and cancellation belong to the stream: a stream that
//! wants to abort a decode reports end-of-stream or an error.

use std::io::{self, BufRead, Write};

use crate::{Error, Result};

/// A source of bytes.
pub trait InputStream {
    /// Fills `buf` completely or fails with [`Error::TruncatedInput`] when the
    /// stream ends first.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Returns `true` once no byte is left.
    fn is_at_end(&mut self) -> Result<bool>;

    /// Bytes left, when the stream knows it up front. The reader uses this to
    /// reject counts that cannot be satisfied before allocating for them.
    #[inline]
    fn remaining(&self) -> Option<usize> {
        None
    }

    /// Bytes consumed so far, when tracked.
    #[inline]
    fn position(&self) -> Option<usize> {
        None
    }
}

impl<I: InputStream + ?Sized> InputStream for &mut I {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    #[inline]
    fn is_at_end(&mut self) -> Result<bool> {
        (**self).is_at_end()
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        (**self).position()
    }
}

impl InputStream for &[u8] {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let Some((head, tail)) = self.split_at_checked(buf.len()) else {
            return Err(Error::TruncatedInput);
        };
        buf.copy_from_slice(head);
        *self = tail;
        Ok(())
    }

    #[inline]
    fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.is_empty())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// A byte slice with a read cursor.
#[derive(Clone, Debug)]
pub struct SliceInput<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceInput<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The bytes not consumed yet.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl InputStream for SliceInput<'_> {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let end = self
            .pos
            .checked_add(buf.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::TruncatedInput)?;
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    #[inline]
    fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.pos == self.data.len())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(self.data.len() - self.pos)
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        Some(self.pos)
    }
}

/// Adapts a [`BufRead`] (a file behind `BufReader`, a socket, a decompressor).
///
/// End-of-stream maps to [`Error::TruncatedInput`]; any other I/O error maps to
/// [`Error::ReadFailure`].
#[derive(Debug)]
pub struct IoInput<R> {
    inner: R,
    pos: usize,
}

impl<R: BufRead> IoInput<R> {
    #[inline]
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> InputStream for IoInput<R> {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::TruncatedInput,
            _ => Error::ReadFailure(e),
        })?;
        self.pos += buf.len();
        Ok(())
    }

    fn is_at_end(&mut self) -> Result<bool> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(Error::ReadFailure(e)),
            }
        }
    }

    #[inline]
    fn position(&self) -> Option<usize> {
        Some(self.pos)
    }
}

#[cfg(feature = "shared")]
impl InputStream for bytes::Bytes {
    #[inline]
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.len() < buf.len() {
            return Err(Error::TruncatedInput);
        }
        bytes::Buf::copy_to_slice(self, buf);
        Ok(())
    }

    #[inline]
    fn is_at_end(&mut self) -> Result<bool> {
        Ok(self.is_empty())
    }

    #[inline]
    fn remaining(&self) -> Option<usize> {
        Some(self.len())
    }
}

/// A sink for bytes.
pub trait OutputStream {
    /// Accepts all of `bytes` or fails with [`Error::WriteFailure`].
    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<W: OutputStream + ?Sized> OutputStream for &mut W {
    #[inline]
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        (**self).write_all(bytes)
    }
}

impl OutputStream for Vec<u8> {
    #[inline]
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapts a [`Write`]. Errors from the writer surface unchanged inside
/// [`Error::WriteFailure`].
#[derive(Debug)]
pub struct IoOutput<W> {
    inner: W,
}

impl<W: Write> IoOutput<W> {
    #[inline]
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flushes the writer and hands it back.
    pub fn finish(mut self) -> Result<W> {
        self.inner.flush().map_err(Error::WriteFailure)?;
        Ok(self.inner)
    }
}

impl<W: Write> OutputStream for IoOutput<W> {
    #[inline]
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(Error::WriteFailure)
    }
}

#[cfg(feature = "shared")]
impl OutputStream for bytes::BytesMut {
    #[inline]
    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}
