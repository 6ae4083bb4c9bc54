//! Sequential big-endian byte reader with position tracking.

use crate::{Error, Result};
use bytes::Bytes;
use std::io::{self, Read};

/// Widest integer the reader assembles (the FLV data offset and
/// previous-tag-size fields).
const MAX_UINT_WIDTH: usize = 4;

/// Forward-only reader over an FLV byte stream.
///
/// Holds the running count of consumed bytes so every decode step can report
/// where in the stream it failed. The stream is never rewound.
pub struct ByteReader<R> {
    reader: R,
    position: u64,
}

impl<R: Read> ByteReader<R> {
    /// Wrap a reader positioned at the start of the stream.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Consume the wrapper and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read up to `width` bytes as a big-endian unsigned integer.
    ///
    /// Returns the value and the number of bytes actually read, which is
    /// less than `width` only when the stream ended. Missing trailing bytes
    /// count as zero in the returned value.
    pub fn read_uint(&mut self, width: usize) -> Result<(u32, usize)> {
        debug_assert!((1..=MAX_UINT_WIDTH).contains(&width));
        let mut buf = [0u8; MAX_UINT_WIDTH];
        let count = self.fill(&mut buf[..width])?;
        let value = buf[..width]
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | byte as u32);
        Ok((value, count))
    }

    /// Read and discard `width` bytes, returning how many were consumed.
    pub fn read_uint_skip(&mut self, width: usize) -> Result<usize> {
        self.read_uint(width).map(|(_, count)| count)
    }

    /// Read exactly `width` bytes as a big-endian integer or fail with
    /// [`Error::TruncatedStream`] naming `field`.
    pub fn expect_uint(&mut self, width: usize, field: &'static str) -> Result<u32> {
        let offset = self.position;
        let (value, count) = self.read_uint(width)?;
        if count < width {
            return Err(Error::truncated(field, offset, width, count));
        }
        Ok(value)
    }

    /// Read exactly one byte or fail with [`Error::TruncatedStream`].
    pub fn expect_u8(&mut self, field: &'static str) -> Result<u8> {
        self.expect_uint(1, field).map(|v| v as u8)
    }

    /// Read exactly `len` bytes into an owned buffer.
    pub fn expect_body(&mut self, len: usize, field: &'static str) -> Result<Bytes> {
        let offset = self.position;
        let mut data = Vec::with_capacity(len.min(1 << 20));
        let count = (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut data)?;
        self.position += count as u64;
        if count < len {
            return Err(Error::truncated(field, offset, len, count));
        }
        Ok(Bytes::from(data))
    }

    /// Discard exactly `len` bytes.
    pub fn skip(&mut self, len: u64, field: &'static str) -> Result<()> {
        let offset = self.position;
        let count = io::copy(&mut (&mut self.reader).take(len), &mut io::sink())?;
        self.position += count;
        if count < len {
            return Err(Error::truncated(field, offset, len as usize, count as usize));
        }
        Ok(())
    }

    /// Read into `buf` until it is full or the stream ends.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that hands out one byte per call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_read_uint_widths() {
        let mut reader = ByteReader::new(Cursor::new(vec![
            0x12, 0xAB, 0xCD, 0xEF, 0x01, 0x02, 0x03, 0x04,
        ]));
        assert_eq!(reader.read_uint(1).unwrap(), (0x12, 1));
        assert_eq!(reader.read_uint(3).unwrap(), (0xABCDEF, 3));
        assert_eq!(reader.read_uint(4).unwrap(), (0x0102_0304, 4));
        assert_eq!(reader.position(), 8);
    }

    #[test]
    fn test_read_uint_short_read_reports_count() {
        let mut reader = ByteReader::new(Cursor::new(vec![0x00, 0x01]));
        let (_, count) = reader.read_uint(4).unwrap();
        assert_eq!(count, 2);
        assert_eq!(reader.read_uint(1).unwrap(), (0, 0));
    }

    #[test]
    fn test_read_uint_across_partial_reads() {
        let data = [0x00, 0x00, 0x01, 0x00];
        let mut reader = ByteReader::new(Trickle(&data));
        assert_eq!(reader.read_uint(4).unwrap(), (256, 4));
    }

    #[test]
    fn test_read_uint_skip() {
        let mut reader = ByteReader::new(Cursor::new(vec![1, 2, 3, 4, 5]));
        assert_eq!(reader.read_uint_skip(4).unwrap(), 4);
        assert_eq!(reader.read_uint(1).unwrap(), (5, 1));
    }

    #[test]
    fn test_expect_uint_truncated() {
        let mut reader = ByteReader::new(Cursor::new(vec![0xAA, 0xBB, 0xCC]));
        reader.expect_u8("first").unwrap();
        let err = reader.expect_uint(3, "payload size").unwrap_err();
        match err {
            Error::TruncatedStream {
                field,
                offset,
                expected,
                actual,
            } => {
                assert_eq!(field, "payload size");
                assert_eq!(offset, 1);
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_expect_body() {
        let mut reader = ByteReader::new(Cursor::new(vec![9, 8, 7, 6]));
        let body = reader.expect_body(3, "body").unwrap();
        assert_eq!(&body[..], &[9, 8, 7]);
        assert_eq!(reader.position(), 3);

        let err = reader.expect_body(2, "body").unwrap_err();
        assert!(err.is_truncation());
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_expect_body_empty() {
        let mut reader = ByteReader::new(Cursor::new(Vec::new()));
        assert!(reader.expect_body(0, "body").unwrap().is_empty());
    }

    #[test]
    fn test_skip() {
        let mut reader = ByteReader::new(Cursor::new(vec![0u8; 10]));
        reader.skip(6, "padding").unwrap();
        assert_eq!(reader.position(), 6);
        assert!(reader.skip(6, "padding").unwrap_err().is_truncation());
    }
}
