use crate::error::{ExtractError, Result};
use crate::parser::decoder::decode;
use crate::types::{Record, RECORD_SIZE};
use std::io::{ErrorKind, Read};

/// Sequential reader pulling fixed-size record chunks from a byte source
pub struct RecordReader<R> {
    inner: R,
    buf: [u8; RECORD_SIZE],
    /// Bytes consumed from the source so far
    pub pos: u64,
    pub eof: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: [0u8; RECORD_SIZE],
            pos: 0,
            eof: false,
        }
    }

    /// Pull the next full chunk.
    ///
    /// Returns `Ok(None)` when the source is exhausted on a record boundary and
    /// [`ExtractError::IncompleteRecord`] when it ends partway through one.
    /// Either way the reader is at EOF afterwards.
    pub fn read_chunk(&mut self) -> Result<Option<&[u8; RECORD_SIZE]>> {
        if self.eof {
            return Ok(None);
        }

        let start = self.pos;
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.inner.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.pos += filled as u64;

        if filled == RECORD_SIZE {
            return Ok(Some(&self.buf));
        }

        self.eof = true;
        if filled == 0 {
            Ok(None)
        } else {
            Err(ExtractError::IncompleteRecord {
                expected: RECORD_SIZE,
                actual: filled,
                offset: start,
            })
        }
    }

    /// Pull and decode the next record
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        match self.read_chunk()? {
            Some(chunk) => decode(chunk).map(Some),
            None => Ok(None),
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}
