//! Video tag payloads.
//!
//! The first payload byte holds the frame type (high nibble) and codec id
//! (low nibble). AVC payloads continue with a nested [`AvcPacket`]; every
//! other codec's payload is kept as raw bytes.

use crate::avc::AvcPacket;
use crate::bits::extract_bits;
use crate::codes::{display_code, UNRECOGNIZED};
use crate::reader::ByteReader;
use crate::{Error, Result};
use bytes::Bytes;
use std::io::Read;

/// Video frame type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Seekable frame
    Keyframe,
    /// Non-seekable frame
    InterFrame,
    /// Disposable inter frame (H.263 only)
    DisposableInterFrame,
    /// Generated keyframe (server use only)
    GeneratedKeyframe,
    /// Video info/command frame
    InfoFrame,
    /// Zero or any value past the table
    Unknown(u8),
}

impl From<u8> for FrameType {
    fn from(value: u8) -> Self {
        match value {
            1 => FrameType::Keyframe,
            2 => FrameType::InterFrame,
            3 => FrameType::DisposableInterFrame,
            4 => FrameType::GeneratedKeyframe,
            5 => FrameType::InfoFrame,
            v => FrameType::Unknown(v),
        }
    }
}

impl FrameType {
    pub fn code(&self) -> u8 {
        match self {
            FrameType::Keyframe => 1,
            FrameType::InterFrame => 2,
            FrameType::DisposableInterFrame => 3,
            FrameType::GeneratedKeyframe => 4,
            FrameType::InfoFrame => 5,
            FrameType::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FrameType::Keyframe => "keyframe (for AVC, a seekable frame)",
            FrameType::InterFrame => "inter frame (for AVC, a non-seekable frame)",
            FrameType::DisposableInterFrame => "disposable inter frame (H.263 only)",
            FrameType::GeneratedKeyframe => "generated keyframe (reserved for server use only)",
            FrameType::InfoFrame => "video info/command frame",
            FrameType::Unknown(0) => "not defined by standard",
            FrameType::Unknown(_) => UNRECOGNIZED,
        }
    }

    pub fn is_keyframe(&self) -> bool {
        matches!(self, FrameType::Keyframe | FrameType::GeneratedKeyframe)
    }
}

/// Video codec identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecId {
    Jpeg,
    SorensonH263,
    ScreenVideo,
    On2Vp6,
    On2Vp6Alpha,
    ScreenVideoV2,
    Avc,
    Unknown(u8),
}

impl From<u8> for CodecId {
    fn from(value: u8) -> Self {
        match value {
            1 => CodecId::Jpeg,
            2 => CodecId::SorensonH263,
            3 => CodecId::ScreenVideo,
            4 => CodecId::On2Vp6,
            5 => CodecId::On2Vp6Alpha,
            6 => CodecId::ScreenVideoV2,
            7 => CodecId::Avc,
            v => CodecId::Unknown(v),
        }
    }
}

impl CodecId {
    /// Code that selects the nested AVC packet format.
    pub const AVC_CODE: u8 = 7;

    pub fn code(&self) -> u8 {
        match self {
            CodecId::Jpeg => 1,
            CodecId::SorensonH263 => 2,
            CodecId::ScreenVideo => 3,
            CodecId::On2Vp6 => 4,
            CodecId::On2Vp6Alpha => 5,
            CodecId::ScreenVideoV2 => 6,
            CodecId::Avc => Self::AVC_CODE,
            CodecId::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CodecId::Jpeg => "JPEG (currently unused)",
            CodecId::SorensonH263 => "Sorenson H.263",
            CodecId::ScreenVideo => "Screen video",
            CodecId::On2Vp6 => "On2 VP6",
            CodecId::On2Vp6Alpha => "On2 VP6 with alpha channel",
            CodecId::ScreenVideoV2 => "Screen video version 2",
            CodecId::Avc => "AVC",
            CodecId::Unknown(0) => "not defined by standard",
            CodecId::Unknown(_) => UNRECOGNIZED,
        }
    }
}

display_code!(FrameType, CodecId);

/// What follows the frame/codec byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoBody {
    /// Nested AVC packet (codec id 7).
    Avc(AvcPacket),
    /// Encoded frame data for any other codec.
    Raw(Bytes),
}

/// Decoded video tag payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoData {
    pub frame_type: FrameType,
    pub codec_id: CodecId,
    pub body: VideoBody,
}

impl VideoData {
    /// Decode a video payload of `payload_size` declared bytes.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>, payload_size: u32) -> Result<Self> {
        if payload_size < 1 {
            return Err(Error::InvalidPayloadSize {
                kind: "video",
                declared: payload_size,
                minimum: 1,
            });
        }

        let byte = reader.expect_u8("video parameters")?;
        let frame_type = FrameType::from(extract_bits(byte, 4, 4));
        let codec_id = CodecId::from(extract_bits(byte, 0, 4));
        let remaining = payload_size - 1;

        let body = match codec_id {
            CodecId::Avc => VideoBody::Avc(AvcPacket::decode(reader, remaining)?),
            _ => VideoBody::Raw(reader.expect_body(remaining as usize, "video data")?),
        };

        tracing::trace!(
            frame_type = frame_type.code(),
            codec_id = codec_id.code(),
            "Decoded video payload"
        );

        Ok(Self {
            frame_type,
            codec_id,
            body,
        })
    }

    /// The nested AVC packet, if this is an AVC payload.
    pub fn avc(&self) -> Option<&AvcPacket> {
        match &self.body {
            VideoBody::Avc(packet) => Some(packet),
            VideoBody::Raw(_) => None,
        }
    }

    /// Encoded bytes after all headers: NALU data for AVC, the raw body
    /// otherwise.
    pub fn data(&self) -> &Bytes {
        match &self.body {
            VideoBody::Avc(packet) => &packet.data,
            VideoBody::Raw(data) => data,
        }
    }
}
