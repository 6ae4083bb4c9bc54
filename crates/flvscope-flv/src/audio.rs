//! Audio tag payloads.
//!
//! The first payload byte packs four parameters:
//!
//! ```text
//! bits 7-4  sound format
//! bits 3-2  sample rate
//! bit  1    sample size
//! bit  0    channel mode
//! ```
//!
//! The rest of the payload is the encoded audio, kept verbatim.

use crate::bits::extract_bits;
use crate::codes::{display_code, UNRECOGNIZED};
use crate::reader::ByteReader;
use crate::{Error, Result};
use bytes::Bytes;
use std::io::Read;

/// Audio codec (`SoundFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundFormat {
    /// Linear PCM, platform endian
    LinearPcmPlatformEndian,
    /// ADPCM
    Adpcm,
    /// MP3
    Mp3,
    /// Linear PCM, little endian
    LinearPcmLittleEndian,
    /// Nellymoser 16 kHz mono
    Nellymoser16kMono,
    /// Nellymoser 8 kHz mono
    Nellymoser8kMono,
    /// Nellymoser
    Nellymoser,
    /// G.711 A-law
    G711ALaw,
    /// G.711 mu-law
    G711MuLaw,
    /// AAC
    Aac,
    /// Speex
    Speex,
    /// MP3 at 8 kHz
    Mp3_8k,
    /// Device-specific sound
    DeviceSpecific,
    /// Code the format reserves (9, 12, 13)
    Reserved(u8),
    /// Value that does not fit the 4-bit field
    Unknown(u8),
}

impl From<u8> for SoundFormat {
    fn from(value: u8) -> Self {
        match value {
            0 => SoundFormat::LinearPcmPlatformEndian,
            1 => SoundFormat::Adpcm,
            2 => SoundFormat::Mp3,
            3 => SoundFormat::LinearPcmLittleEndian,
            4 => SoundFormat::Nellymoser16kMono,
            5 => SoundFormat::Nellymoser8kMono,
            6 => SoundFormat::Nellymoser,
            7 => SoundFormat::G711ALaw,
            8 => SoundFormat::G711MuLaw,
            10 => SoundFormat::Aac,
            11 => SoundFormat::Speex,
            14 => SoundFormat::Mp3_8k,
            15 => SoundFormat::DeviceSpecific,
            v @ (9 | 12 | 13) => SoundFormat::Reserved(v),
            v => SoundFormat::Unknown(v),
        }
    }
}

impl SoundFormat {
    /// Numeric code as stored in the tag.
    pub fn code(&self) -> u8 {
        match self {
            SoundFormat::LinearPcmPlatformEndian => 0,
            SoundFormat::Adpcm => 1,
            SoundFormat::Mp3 => 2,
            SoundFormat::LinearPcmLittleEndian => 3,
            SoundFormat::Nellymoser16kMono => 4,
            SoundFormat::Nellymoser8kMono => 5,
            SoundFormat::Nellymoser => 6,
            SoundFormat::G711ALaw => 7,
            SoundFormat::G711MuLaw => 8,
            SoundFormat::Aac => 10,
            SoundFormat::Speex => 11,
            SoundFormat::Mp3_8k => 14,
            SoundFormat::DeviceSpecific => 15,
            SoundFormat::Reserved(v) | SoundFormat::Unknown(v) => *v,
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            SoundFormat::LinearPcmPlatformEndian => "Linear PCM, platform endian",
            SoundFormat::Adpcm => "ADPCM",
            SoundFormat::Mp3 => "MP3",
            SoundFormat::LinearPcmLittleEndian => "Linear PCM, little endian",
            SoundFormat::Nellymoser16kMono => "Nellymoser 16-kHz mono",
            SoundFormat::Nellymoser8kMono => "Nellymoser 8-kHz mono",
            SoundFormat::Nellymoser => "Nellymoser",
            SoundFormat::G711ALaw => "G.711 A-law logarithmic PCM",
            SoundFormat::G711MuLaw => "G.711 mu-law logarithmic PCM",
            SoundFormat::Aac => "AAC",
            SoundFormat::Speex => "Speex",
            SoundFormat::Mp3_8k => "MP3 8-kHz",
            SoundFormat::DeviceSpecific => "Device-specific sound",
            SoundFormat::Reserved(_) => "not defined by standard",
            SoundFormat::Unknown(_) => UNRECOGNIZED,
        }
    }
}

/// Sampling rate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundRate {
    Khz5_5,
    Khz11,
    Khz22,
    Khz44,
    Unknown(u8),
}

impl From<u8> for SoundRate {
    fn from(value: u8) -> Self {
        match value {
            0 => SoundRate::Khz5_5,
            1 => SoundRate::Khz11,
            2 => SoundRate::Khz22,
            3 => SoundRate::Khz44,
            v => SoundRate::Unknown(v),
        }
    }
}

impl SoundRate {
    pub fn code(&self) -> u8 {
        match self {
            SoundRate::Khz5_5 => 0,
            SoundRate::Khz11 => 1,
            SoundRate::Khz22 => 2,
            SoundRate::Khz44 => 3,
            SoundRate::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoundRate::Khz5_5 => "5.5-kHz",
            SoundRate::Khz11 => "11-kHz",
            SoundRate::Khz22 => "22-kHz",
            SoundRate::Khz44 => "44-kHz",
            SoundRate::Unknown(_) => UNRECOGNIZED,
        }
    }

    /// Nominal rate in Hz.
    pub fn hz(&self) -> Option<u32> {
        match self {
            SoundRate::Khz5_5 => Some(5512),
            SoundRate::Khz11 => Some(11025),
            SoundRate::Khz22 => Some(22050),
            SoundRate::Khz44 => Some(44100),
            SoundRate::Unknown(_) => None,
        }
    }
}

/// Sample size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundSize {
    Bits8,
    Bits16,
    Unknown(u8),
}

impl From<u8> for SoundSize {
    fn from(value: u8) -> Self {
        match value {
            0 => SoundSize::Bits8,
            1 => SoundSize::Bits16,
            v => SoundSize::Unknown(v),
        }
    }
}

impl SoundSize {
    pub fn code(&self) -> u8 {
        match self {
            SoundSize::Bits8 => 0,
            SoundSize::Bits16 => 1,
            SoundSize::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoundSize::Bits8 => "8 bit",
            SoundSize::Bits16 => "16 bit",
            SoundSize::Unknown(_) => UNRECOGNIZED,
        }
    }
}

/// Channel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundType {
    Mono,
    Stereo,
    Unknown(u8),
}

impl From<u8> for SoundType {
    fn from(value: u8) -> Self {
        match value {
            0 => SoundType::Mono,
            1 => SoundType::Stereo,
            v => SoundType::Unknown(v),
        }
    }
}

impl SoundType {
    pub fn code(&self) -> u8 {
        match self {
            SoundType::Mono => 0,
            SoundType::Stereo => 1,
            SoundType::Unknown(v) => *v,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SoundType::Mono => "Mono",
            SoundType::Stereo => "Stereo",
            SoundType::Unknown(_) => UNRECOGNIZED,
        }
    }
}

display_code!(SoundFormat, SoundRate, SoundSize, SoundType);

/// Decoded audio tag payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioData {
    pub sound_format: SoundFormat,
    pub sound_rate: SoundRate,
    pub sound_size: SoundSize,
    pub sound_type: SoundType,
    /// Encoded audio following the parameter byte.
    pub data: Bytes,
}

impl AudioData {
    /// Decode an audio payload of `payload_size` declared bytes.
    pub fn decode<R: Read>(reader: &mut ByteReader<R>, payload_size: u32) -> Result<Self> {
        if payload_size < 1 {
            return Err(Error::InvalidPayloadSize {
                kind: "audio",
                declared: payload_size,
                minimum: 1,
            });
        }

        let byte = reader.expect_u8("audio parameters")?;
        let sound_format = SoundFormat::from(extract_bits(byte, 4, 4));
        let sound_rate = SoundRate::from(extract_bits(byte, 2, 2));
        let sound_size = SoundSize::from(extract_bits(byte, 1, 1));
        let sound_type = SoundType::from(extract_bits(byte, 0, 1));

        let data = reader.expect_body((payload_size - 1) as usize, "audio data")?;

        tracing::trace!(
            format = sound_format.code(),
            rate = sound_rate.code(),
            size = sound_size.code(),
            channels = sound_type.code(),
            data_len = data.len(),
            "Decoded audio payload"
        );

        Ok(Self {
            sound_format,
            sound_rate,
            sound_size,
            sound_type,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8], payload_size: u32) -> Result<AudioData> {
        let mut reader = ByteReader::new(Cursor::new(bytes.to_vec()));
        AudioData::decode(&mut reader, payload_size)
    }

    #[test]
    fn test_decode_aac_stereo() {
        let audio = decode(&[0xAF, 0x01, 0x21, 0x10], 4).unwrap();
        assert_eq!(audio.sound_format, SoundFormat::Aac);
        assert_eq!(audio.sound_rate, SoundRate::Khz44);
        assert_eq!(audio.sound_size, SoundSize::Bits16);
        assert_eq!(audio.sound_type, SoundType::Stereo);
        assert_eq!(&audio.data[..], &[0x01, 0x21, 0x10]);
    }

    #[test]
    fn test_decode_mp3_mono_8bit() {
        // format 2, rate 1, size 0, mono
        let audio = decode(&[0b0010_0100, 0xFF], 2).unwrap();
        assert_eq!(audio.sound_format, SoundFormat::Mp3);
        assert_eq!(audio.sound_rate, SoundRate::Khz11);
        assert_eq!(audio.sound_size, SoundSize::Bits8);
        assert_eq!(audio.sound_type, SoundType::Mono);
        assert_eq!(audio.data.len(), 1);
    }

    #[test]
    fn test_parameter_byte_only() {
        let audio = decode(&[0xAF], 1).unwrap();
        assert!(audio.data.is_empty());
    }

    #[test]
    fn test_zero_payload_rejected() {
        let err = decode(&[0xAF], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidPayloadSize { minimum: 1, .. }));
    }

    #[test]
    fn test_truncated_body() {
        let err = decode(&[0xAF, 0x01], 10).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedStream {
                field: "audio data",
                expected: 9,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_sound_format_codes_roundtrip() {
        for code in 0..16u8 {
            assert_eq!(SoundFormat::from(code).code(), code);
        }
        assert_eq!(SoundFormat::from(12).label(), "not defined by standard");
        assert_eq!(SoundFormat::from(40).label(), UNRECOGNIZED);
    }

    #[test]
    fn test_display() {
        assert_eq!(SoundFormat::Aac.to_string(), "10 - AAC");
        assert_eq!(SoundRate::Khz5_5.to_string(), "0 - 5.5-kHz");
        assert_eq!(SoundType::from(7).to_string(), "7 - unrecognized");
    }

    #[test]
    fn test_sound_rate_hz() {
        assert_eq!(SoundRate::Khz44.hz(), Some(44100));
        assert_eq!(SoundRate::Unknown(9).hz(), None);
    }
}
