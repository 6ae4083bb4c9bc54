use super::{hex_preview, record_write, Report};
use crate::config::ReportConfig;
use flvscope_flv::{
    AudioData, FlvHeader, StreamSummary, Tag, TagBody, TagVisitor, VideoBody, VideoData,
};
use std::io::{self, Write};

/// Indented plain-text listing, one block per tag.
pub struct TextReport<W> {
    out: W,
    hex_preview: usize,
    show_previous_tag_size: bool,
    write_error: Option<io::Error>,
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W, config: &ReportConfig) -> Self {
        Self {
            out,
            hex_preview: config.hex_preview,
            show_previous_tag_size: config.show_previous_tag_size,
            write_error: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self, header: &FlvHeader) -> io::Result<()> {
        writeln!(self.out, "FLV file version {}", header.version)?;
        writeln!(self.out, "  Contains audio tags: {}", yes_no(header.has_audio()))?;
        writeln!(self.out, "  Contains video tags: {}", yes_no(header.has_video()))?;
        writeln!(self.out, "  Data offset: {}", header.data_offset)
    }

    fn write_tag(&mut self, tag: &Tag) -> io::Result<()> {
        let frame = &tag.frame;
        writeln!(self.out)?;
        if self.show_previous_tag_size {
            writeln!(self.out, "Prev tag size: {}", frame.previous_tag_size)?;
        }
        writeln!(self.out, "Tag type: {}", frame.tag_type)?;
        writeln!(self.out, "  Offset: {}", frame.offset)?;
        writeln!(self.out, "  Data size: {}", frame.payload_size)?;
        writeln!(self.out, "  Timestamp: {}", frame.timestamp)?;
        writeln!(self.out, "  Timestamp extended: {}", frame.timestamp_extended)?;
        writeln!(self.out, "  StreamID: {}", frame.stream_id)?;

        match &tag.body {
            TagBody::Audio(audio) => self.write_audio(audio),
            TagBody::Video(video) => self.write_video(video),
            TagBody::ScriptData(data) => self.write_data("  ", data),
        }
    }

    fn write_audio(&mut self, audio: &AudioData) -> io::Result<()> {
        writeln!(self.out, "  Audio tag:")?;
        writeln!(self.out, "    Sound format: {}", audio.sound_format)?;
        writeln!(self.out, "    Sound rate: {}", audio.sound_rate)?;
        writeln!(self.out, "    Sound size: {}", audio.sound_size)?;
        writeln!(self.out, "    Sound type: {}", audio.sound_type)?;
        writeln!(self.out, "    Data length: {}", audio.data.len())?;
        self.write_data("    ", &audio.data)
    }

    fn write_video(&mut self, video: &VideoData) -> io::Result<()> {
        writeln!(self.out, "  Video tag:")?;
        writeln!(self.out, "    Frame type: {}", video.frame_type)?;
        writeln!(self.out, "    Codec ID: {}", video.codec_id)?;
        match &video.body {
            VideoBody::Avc(packet) => {
                writeln!(self.out, "    AVC video tag:")?;
                writeln!(self.out, "      AVC packet type: {}", packet.packet_type)?;
                writeln!(self.out, "      AVC NALU length: {}", packet.data.len())?;
                self.write_data("      ", &packet.data)
            }
            VideoBody::Raw(data) => {
                writeln!(self.out, "    Data length: {}", data.len())?;
                self.write_data("    ", data)
            }
        }
    }

    fn write_data(&mut self, indent: &str, data: &[u8]) -> io::Result<()> {
        if self.hex_preview == 0 || data.is_empty() {
            return Ok(());
        }
        writeln!(self.out, "{indent}Data: {}", hex_preview(data, self.hex_preview))
    }
}

impl<W: Write> TagVisitor for TextReport<W> {
    fn visit_header(&mut self, header: &FlvHeader) -> flvscope_flv::Result<()> {
        let result = self.write_header(header);
        record_write(&mut self.write_error, result)
    }

    fn visit_tag(&mut self, tag: &Tag) -> flvscope_flv::Result<()> {
        let result = self.write_tag(tag);
        record_write(&mut self.write_error, result)
    }
}

impl<W: Write> Report for TextReport<W> {
    fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    fn finish(&mut self, summary: &StreamSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Tags: {} (audio {}, video {}, script {})",
            summary.total_tags(),
            summary.audio_tags,
            summary.video_tags,
            summary.script_tags
        )?;
        writeln!(self.out, "Bytes read: {}", summary.bytes_read)?;
        if summary.stopped_early {
            writeln!(self.out, "Stopped at tag limit")?;
        }
        writeln!(self.out, "Finished analyzing")?;
        self.out.flush()
    }
}
