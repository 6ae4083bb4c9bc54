//! Stream driver: decodes the header once, then tags in stream order.

use crate::header::{FlvHeader, FLV_HEADER_SIZE};
use crate::reader::ByteReader;
use crate::tag::{Tag, TagType};
use crate::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Consumer of decoded records.
///
/// Each tag is handed over before the next one is read; at most one tag is
/// alive at a time. Returning an error aborts the run.
pub trait TagVisitor {
    fn visit_header(&mut self, header: &FlvHeader) -> Result<()>;

    fn visit_tag(&mut self, tag: &Tag) -> Result<()>;
}

/// Totals for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub audio_tags: u64,
    pub video_tags: u64,
    pub script_tags: u64,
    /// Bytes consumed from the stream, header included.
    pub bytes_read: u64,
    /// Whether the run stopped at a tag limit before reaching end of stream.
    pub stopped_early: bool,
}

impl StreamSummary {
    pub fn total_tags(&self) -> u64 {
        self.audio_tags + self.video_tags + self.script_tags
    }

    fn record(&mut self, tag_type: TagType) {
        match tag_type {
            TagType::Audio => self.audio_tags += 1,
            TagType::Video => self.video_tags += 1,
            TagType::ScriptData => self.script_tags += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Header,
    Tags,
    Done,
}

/// Sequential FLV demuxer.
pub struct FlvDemuxer<R> {
    reader: ByteReader<R>,
    state: State,
    header: Option<FlvHeader>,
}

impl FlvDemuxer<BufReader<File>> {
    /// Open an FLV file from the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> FlvDemuxer<R> {
    /// Create a demuxer over a stream positioned at the FLV signature.
    pub fn new(reader: R) -> Self {
        Self {
            reader: ByteReader::new(reader),
            state: State::Header,
            header: None,
        }
    }

    /// Bytes consumed from the stream so far.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Decode the file header, or return the already-decoded one.
    ///
    /// Bytes between the 9-byte header and a larger declared data offset are
    /// skipped. Fails with [`Error::StreamTerminated`](crate::Error::StreamTerminated)
    /// once decoding has stopped without a header.
    pub fn read_header(&mut self) -> Result<FlvHeader> {
        if let Some(header) = self.header {
            return Ok(header);
        }
        if self.state == State::Done {
            return Err(crate::Error::StreamTerminated);
        }

        let result = FlvHeader::decode(&mut self.reader).and_then(|header| {
            if header.data_offset < FLV_HEADER_SIZE {
                tracing::warn!(
                    data_offset = header.data_offset,
                    "Data offset smaller than the header; ignoring it"
                );
            }
            let extra = header.extra_header_bytes();
            if extra > 0 {
                tracing::debug!(extra, "Skipping extra header bytes");
                self.reader.skip(extra as u64, "extended header")?;
            }
            Ok(header)
        });

        match result {
            Ok(header) => {
                self.header = Some(header);
                self.state = State::Tags;
                Ok(header)
            }
            Err(e) => {
                self.state = State::Done;
                Err(e)
            }
        }
    }

    /// Decode the next tag.
    ///
    /// Decodes the header first if that has not happened yet. Returns
    /// `Ok(None)` once the stream has ended cleanly; after an error or the
    /// end of stream every further call returns `Ok(None)`.
    pub fn next_tag(&mut self) -> Result<Option<Tag>> {
        match self.state {
            State::Header => {
                self.read_header()?;
            }
            State::Tags => {}
            State::Done => return Ok(None),
        }

        match Tag::decode(&mut self.reader) {
            Ok(Some(tag)) => Ok(Some(tag)),
            Ok(None) => {
                tracing::debug!(position = self.reader.position(), "End of stream");
                self.state = State::Done;
                Ok(None)
            }
            Err(e) => {
                self.state = State::Done;
                Err(e)
            }
        }
    }

    /// Decode the whole stream, handing each record to `visitor`.
    pub fn run<V: TagVisitor>(&mut self, visitor: &mut V) -> Result<StreamSummary> {
        self.run_limited(visitor, None)
    }

    /// Like [`run`](Self::run) but stops after `max_tags` tags.
    pub fn run_limited<V: TagVisitor>(
        &mut self,
        visitor: &mut V,
        max_tags: Option<u64>,
    ) -> Result<StreamSummary> {
        let header = self.read_header()?;
        visitor.visit_header(&header)?;

        let mut summary = StreamSummary::default();
        loop {
            if max_tags.is_some_and(|max| summary.total_tags() >= max) {
                summary.stopped_early = true;
                break;
            }
            let Some(tag) = self.next_tag()? else {
                break;
            };
            summary.record(tag.tag_type());
            visitor.visit_tag(&tag)?;
        }

        summary.bytes_read = self.reader.position();
        tracing::debug!(
            tags = summary.total_tags(),
            bytes = summary.bytes_read,
            "Finished stream"
        );
        Ok(summary)
    }
}

impl<R: Read> Iterator for FlvDemuxer<R> {
    type Item = Result<Tag>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_tag().transpose()
    }
}
