//! FLV file header (the first 9 bytes of the stream).

use crate::reader::ByteReader;
use crate::{Error, Result};
use std::io::Read;

/// Signature every FLV stream starts with.
pub const FLV_SIGNATURE: [u8; 3] = *b"FLV";

/// Size of the header in bytes, and the usual data offset.
pub const FLV_HEADER_SIZE: u32 = 9;

/// Flag bit set when the file contains audio tags.
pub const FLAG_AUDIO_BIT: u8 = 2;

/// Flag bit set when the file contains video tags.
pub const FLAG_VIDEO_BIT: u8 = 0;

/// Parsed FLV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlvHeader {
    /// File format version (1 for every file seen in practice).
    pub version: u8,
    /// Raw type flags byte.
    pub flags: u8,
    /// Offset of the first previous-tag-size field from the start of the file.
    pub data_offset: u32,
}

impl FlvHeader {
    /// Decode the header from the start of the stream.
    ///
    /// The signature is checked before anything else is read, so a foreign
    /// file is rejected as [`Error::Format`] no matter what follows it.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let signature = reader.expect_uint(3, "signature")?;
        let found = [(signature >> 16) as u8, (signature >> 8) as u8, signature as u8];
        if found != FLV_SIGNATURE {
            return Err(Error::Format { found });
        }

        let version = reader.expect_u8("version")?;
        let flags = reader.expect_u8("type flags")?;
        let data_offset = reader.expect_uint(4, "data offset")?;

        let header = Self {
            version,
            flags,
            data_offset,
        };
        tracing::debug!(
            version,
            flags,
            data_offset,
            has_audio = header.has_audio(),
            has_video = header.has_video(),
            "Decoded FLV header"
        );
        Ok(header)
    }

    /// Whether the header announces audio tags.
    pub fn has_audio(&self) -> bool {
        self.flags & (1 << FLAG_AUDIO_BIT) != 0
    }

    /// Whether the header announces video tags.
    pub fn has_video(&self) -> bool {
        self.flags & (1 << FLAG_VIDEO_BIT) != 0
    }

    /// Bytes between the end of the 9-byte header and the declared data
    /// offset. Zero for regular files.
    pub fn extra_header_bytes(&self) -> u32 {
        self.data_offset.saturating_sub(FLV_HEADER_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> Result<FlvHeader> {
        let mut reader = ByteReader::new(Cursor::new(bytes.to_vec()));
        FlvHeader::decode(&mut reader)
    }

    #[test]
    fn test_decode_audio_video_header() {
        let header = decode(&[b'F', b'L', b'V', 1, 0x05, 0, 0, 0, 9]).unwrap();
        assert_eq!(header.version, 1);
        assert!(header.has_audio());
        assert!(header.has_video());
        assert_eq!(header.data_offset, 9);
        assert_eq!(header.extra_header_bytes(), 0);
    }

    #[test]
    fn test_decode_flags() {
        let audio_only = decode(&[b'F', b'L', b'V', 1, 0x04, 0, 0, 0, 9]).unwrap();
        assert!(audio_only.has_audio());
        assert!(!audio_only.has_video());

        let video_only = decode(&[b'F', b'L', b'V', 1, 0x01, 0, 0, 0, 9]).unwrap();
        assert!(!video_only.has_audio());
        assert!(video_only.has_video());
    }

    #[test]
    fn test_decode_consumes_nine_bytes() {
        let mut reader = ByteReader::new(Cursor::new(vec![
            b'F', b'L', b'V', 1, 0x05, 0, 0, 0, 9, 0xEE,
        ]));
        FlvHeader::decode(&mut reader).unwrap();
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn test_bad_signature_rejected() {
        let err = decode(&[b'F', b'L', b'X', 1, 0x05, 0, 0, 0, 9]).unwrap_err();
        assert!(matches!(err, Error::Format { found } if found == *b"FLX"));
    }

    #[test]
    fn test_bad_signature_rejected_without_rest() {
        let err = decode(b"MP4").unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_empty_stream_is_truncated() {
        let err = decode(&[]).unwrap_err();
        assert!(err.is_truncation());
    }

    #[test]
    fn test_short_header_is_truncated() {
        let err = decode(&[b'F', b'L', b'V', 1, 0x05, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedStream {
                field: "data offset",
                ..
            }
        ));
    }

    #[test]
    fn test_large_data_offset() {
        let header = decode(&[b'F', b'L', b'V', 1, 0x05, 0, 0, 0, 13]).unwrap();
        assert_eq!(header.extra_header_bytes(), 4);
    }
}
