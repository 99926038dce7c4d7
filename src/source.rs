//! Byte sources feeding the compressor
//!
//! The compressor pulls its input one byte at a time. A source either yields
//! the next byte or signals end of input with `None`; once it has returned
//! `None` it keeps returning `None`. In-memory sources cannot fail and use
//! `Infallible` as their error type.

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::{self, ErrorKind, Read};

/// A finite, single-pass supply of input bytes
pub trait ByteSource {
    /// Error raised when the underlying input cannot be read
    type Error;

    /// Produce the next byte, or `None` once the input is exhausted
    fn next_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Byte source reading sequentially from a slice
#[derive(Debug, Clone)]
pub struct MemorySource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> MemorySource<'a> {
    /// Create a source over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes handed out so far
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl ByteSource for MemorySource<'_> {
    type Error = Infallible;

    fn next_byte(&mut self) -> Result<Option<u8>, Infallible> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

/// Byte source reading one byte at a time from a `Read` implementation
///
/// Wrap unbuffered readers (files, sockets) in a `BufReader` first.
#[derive(Debug)]
pub struct StreamSource<R: Read> {
    reader: R,
    bytes_read: u64,
    exhausted: bool,
}

impl<R: Read> StreamSource<R> {
    /// Create a source over `reader`
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes_read: 0,
            exhausted: false,
        }
    }

    /// Number of bytes read from the stream so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Recover the wrapped reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    type Error = io::Error;

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Pending input queued by the streaming writer
impl ByteSource for VecDeque<u8> {
    type Error = Infallible;

    fn next_byte(&mut self) -> Result<Option<u8>, Infallible> {
        Ok(self.pop_front())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    type Error = S::Error;

    fn next_byte(&mut self) -> Result<Option<u8>, S::Error> {
        (**self).next_byte()
    }
}
