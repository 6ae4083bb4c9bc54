//! AVC (H.264) video packets carried inside video tags with codec id 7.

use crate::codes::{display_code, UNRECOGNIZED};
use crate::reader::ByteReader;
use crate::{Error, Result};
use bytes::Bytes;
use std::io::Read;

/// Packet type byte plus the 4-byte composition time field.
pub const AVC_PACKET_HEADER_SIZE: u32 = 5;

const COMPOSITION_TIME_SIZE: usize = 4;

/// Kind of AVC packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvcPacketType {
    /// AVCDecoderConfigurationRecord
    SequenceHeader,
    /// One or more NAL units
    Nalu,
    /// End of sequence
    EndOfSequence,
    /// Out-of-range value, tolerated rather than treated as corruption
    Unknown(u8),
}

impl From<u8> for AvcPacketType {
    fn from(value: u8) -> Self {
        match value {
            0 => AvcPacketType::SequenceHeader,
            1 => AvcPacketType::Nalu,
            2 => AvcPacketType::EndOfSequence,
            v => AvcPacketType::Unknown(v),
        }
    }
}

impl AvcPacketType {
    pub fn code(&self) -> u8 {
        match self {
            AvcPacketType::SequenceHeader => 0,
            AvcPacketType::Nalu => 1,
            AvcPacketType::EndOfSequence => 2,
            AvcPacketType::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AvcPacketType::SequenceHeader => "AVC sequence header",
            AvcPacketType::Nalu => "AVC NALU",
            AvcPacketType::EndOfSequence => "AVC end of sequence",
            AvcPacketType::Unknown(_) => UNRECOGNIZED,
        }
    }
}

display_code!(AvcPacketType);

/// Decoded AVC packet.
///
/// The composition time offset is read past but not kept; only the number of
/// bytes it occupied is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvcPacket {
    pub packet_type: AvcPacketType,
    /// Bytes consumed by the composition time field.
    pub composition_time_len: usize,
    /// NAL unit data (or the decoder configuration record for sequence
    /// headers).
    pub data: Bytes,
}

impl AvcPacket {
    /// Decode an AVC packet occupying `remaining` bytes of the video payload.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>, remaining: u32) -> Result<Self> {
        if remaining < AVC_PACKET_HEADER_SIZE {
            return Err(Error::InvalidPayloadSize {
                kind: "AVC packet",
                declared: remaining,
                minimum: AVC_PACKET_HEADER_SIZE,
            });
        }

        let packet_type = AvcPacketType::from(reader.expect_u8("AVC packet type")?);
        if let AvcPacketType::Unknown(code) = packet_type {
            tracing::warn!(
                code,
                offset = reader.position() - 1,
                "Unrecognized AVC packet type"
            );
        }

        let offset = reader.position();
        let composition_time_len = reader.read_uint_skip(COMPOSITION_TIME_SIZE)?;
        if composition_time_len < COMPOSITION_TIME_SIZE {
            return Err(Error::truncated(
                "AVC composition time",
                offset,
                COMPOSITION_TIME_SIZE,
                composition_time_len,
            ));
        }

        let data = reader.expect_body(
            (remaining - AVC_PACKET_HEADER_SIZE) as usize,
            "AVC NALU data",
        )?;

        Ok(Self {
            packet_type,
            composition_time_len,
            data,
        })
    }

    /// Total payload bytes this packet occupied.
    pub fn encoded_len(&self) -> usize {
        1 + self.composition_time_len + self.data.len()
    }
}
