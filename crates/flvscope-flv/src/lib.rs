//! flvscope-flv: sequential FLV container decoding
//!
//! Decodes an FLV byte stream into typed records for inspection: the file
//! header, each tag's envelope, and the audio, video and nested AVC payload
//! fields. Payload bodies are exposed as raw bytes; nothing is decoded past
//! the container level.
//!
//! # Modules
//!
//! - `reader` - big-endian integer reads with position tracking
//! - `bits` - bitfield extraction from payload parameter bytes
//! - `header` - the 9-byte file header
//! - `tag` - tag envelope framing and payload dispatch
//! - `audio`, `video`, `avc` - payload decoders
//! - `demuxer` - the stream driver and the [`TagVisitor`] consumer trait
//!
//! # Stream layout
//!
//! ```text
//! "FLV" | version u8 | flags u8 | data offset u32
//! { previous tag size u32 | type u8 | size u24 | timestamp u24 | ts ext u8 | stream id u24 | payload }*
//! ```
//!
//! Decoding is strictly forward: the stream is never rewound, and any
//! corruption ends the run.
//!
//! # Example
//!
//! ```no_run
//! use flvscope_flv::{FlvDemuxer, TagBody};
//!
//! let mut demuxer = FlvDemuxer::open("stream.flv")?;
//! let header = demuxer.read_header()?;
//! println!("FLV v{} audio={} video={}", header.version, header.has_audio(), header.has_video());
//!
//! for tag in demuxer {
//!     let tag = tag?;
//!     if let TagBody::Video(video) = &tag.body {
//!         println!("{} ms: {} {}", tag.frame.timestamp, video.frame_type, video.codec_id);
//!     }
//! }
//! # Ok::<(), flvscope_flv::Error>(())
//! ```

pub mod audio;
pub mod avc;
pub mod bits;
mod codes;
pub mod demuxer;
pub mod error;
pub mod header;
pub mod reader;
pub mod tag;
pub mod video;

pub use audio::{AudioData, SoundFormat, SoundRate, SoundSize, SoundType};
pub use avc::{AvcPacket, AvcPacketType};
pub use bits::extract_bits;
pub use codes::UNRECOGNIZED;
pub use demuxer::{FlvDemuxer, StreamSummary, TagVisitor};
pub use error::{Error, Result};
pub use header::FlvHeader;
pub use reader::ByteReader;
pub use tag::{Tag, TagBody, TagFrame, TagType};
pub use video::{CodecId, FrameType, VideoBody, VideoData};
