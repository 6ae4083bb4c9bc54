//! Tag framing: the 11-byte envelope in front of every payload and the
//! previous-tag-size field in front of every envelope.

use crate::audio::AudioData;
use crate::reader::ByteReader;
use crate::video::VideoData;
use crate::{Error, Result};
use bytes::Bytes;
use std::fmt;
use std::io::Read;

/// Size of the tag envelope (type through stream id).
pub const TAG_HEADER_SIZE: u32 = 11;

const PREVIOUS_TAG_SIZE_LEN: usize = 4;

/// Kind of payload a tag carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Audio,
    Video,
    ScriptData,
}

impl TagType {
    pub fn code(&self) -> u8 {
        match self {
            TagType::Audio => 8,
            TagType::Video => 9,
            TagType::ScriptData => 18,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            8 => Some(TagType::Audio),
            9 => Some(TagType::Video),
            18 => Some(TagType::ScriptData),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TagType::Audio => "Audio data",
            TagType::Video => "Video data",
            TagType::ScriptData => "Script data object",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.label())
    }
}

/// Tag envelope fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagFrame {
    /// Value of the previous-tag-size field read before this tag. Reported,
    /// never checked against the actual previous tag.
    pub previous_tag_size: u32,
    pub tag_type: TagType,
    /// Declared payload length in bytes (24-bit).
    pub payload_size: u32,
    /// Lower 24 bits of the timestamp in milliseconds.
    pub timestamp: u32,
    /// Upper 8 bits of the timestamp.
    pub timestamp_extended: u8,
    /// Stream id (24-bit, always 0 in conforming files).
    pub stream_id: u32,
    /// Stream offset of the tag type byte.
    pub offset: u64,
}

impl TagFrame {
    /// Timestamp with the extension byte applied as bits 24-31.
    pub fn extended_timestamp(&self) -> u32 {
        ((self.timestamp_extended as u32) << 24) | self.timestamp
    }

    /// Bytes this tag occupies in the stream (envelope plus payload), the
    /// value the following previous-tag-size field should hold.
    pub fn tag_size(&self) -> u32 {
        TAG_HEADER_SIZE + self.payload_size
    }
}

/// Type-specific tag payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagBody {
    Audio(AudioData),
    Video(VideoData),
    /// Script data is kept undecoded.
    ScriptData(Bytes),
}

/// One decoded tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub frame: TagFrame,
    pub body: TagBody,
}

impl Tag {
    /// Decode the next tag.
    ///
    /// Returns `Ok(None)` when the stream ends at a tag boundary: anywhere
    /// inside the previous-tag-size field, or before the tag type byte after
    /// it. Running out of bytes once the tag type has been read is
    /// [`Error::TruncatedStream`].
    pub fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Option<Self>> {
        let offset = reader.position();
        let (previous_tag_size, count) = reader.read_uint(PREVIOUS_TAG_SIZE_LEN)?;
        if count < PREVIOUS_TAG_SIZE_LEN {
            if count > 0 {
                tracing::debug!(offset, count, "Stream ends inside trailing previous tag size");
            }
            return Ok(None);
        }

        let offset = reader.position();
        let (code, count) = reader.read_uint(1)?;
        if count == 0 {
            return Ok(None);
        }
        let code = code as u8;

        let payload_size = reader.expect_uint(3, "payload size")?;
        let timestamp = reader.expect_uint(3, "timestamp")?;
        let timestamp_extended = reader.expect_u8("timestamp extension")?;
        let stream_id = reader.expect_uint(3, "stream id")?;

        let tag_type = TagType::from_code(code).ok_or(Error::UnknownTagType {
            tag_type: code,
            offset,
        })?;

        let frame = TagFrame {
            previous_tag_size,
            tag_type,
            payload_size,
            timestamp,
            timestamp_extended,
            stream_id,
            offset,
        };
        tracing::debug!(
            offset,
            tag_type = code,
            payload_size,
            timestamp = frame.extended_timestamp(),
            "Decoding tag"
        );

        let payload_start = reader.position();
        let body = match tag_type {
            TagType::Audio => TagBody::Audio(AudioData::decode(reader, payload_size)?),
            TagType::Video => TagBody::Video(VideoData::decode(reader, payload_size)?),
            TagType::ScriptData => {
                TagBody::ScriptData(reader.expect_body(payload_size as usize, "script data")?)
            }
        };

        let consumed = reader.position() - payload_start;
        if consumed != payload_size as u64 {
            return Err(Error::PayloadSizeMismatch {
                declared: payload_size,
                consumed,
            });
        }

        Ok(Some(Self { frame, body }))
    }

    pub fn tag_type(&self) -> TagType {
        self.frame.tag_type
    }

    pub fn audio(&self) -> Option<&AudioData> {
        match &self.body {
            TagBody::Audio(audio) => Some(audio),
            _ => None,
        }
    }

    pub fn video(&self) -> Option<&VideoData> {
        match &self.body {
            TagBody::Video(video) => Some(video),
            _ => None,
        }
    }

    pub fn script_data(&self) -> Option<&Bytes> {
        match &self.body {
            TagBody::ScriptData(data) => Some(data),
            _ => None,
        }
    }
}
