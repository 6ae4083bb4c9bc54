use super::{hex_preview, record_write, Report};
use crate::config::ReportConfig;
use flvscope_flv::{
    AudioData, FlvHeader, StreamSummary, Tag, TagBody, TagVisitor, VideoBody, VideoData,
};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// One line of JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum Record {
    Header(HeaderRecord),
    Tag(TagRecord),
    Summary(SummaryRecord),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRecord {
    pub version: u8,
    pub flags: u8,
    pub has_audio: bool,
    pub has_video: bool,
    pub data_offset: u32,
}

impl From<&FlvHeader> for HeaderRecord {
    fn from(header: &FlvHeader) -> Self {
        Self {
            version: header.version,
            flags: header.flags,
            has_audio: header.has_audio(),
            has_video: header.has_video(),
            data_offset: header.data_offset,
        }
    }
}

/// A numeric field code alongside its descriptive label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeField {
    pub code: u8,
    pub label: String,
}

impl CodeField {
    fn new(code: u8, label: &str) -> Self {
        Self {
            code,
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRecord {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous_tag_size: Option<u32>,
    pub offset: u64,
    pub tag_type: CodeField,
    pub data_size: u32,
    pub timestamp: u32,
    pub timestamp_extended: u8,
    pub stream_id: u32,
    #[serde(flatten)]
    pub payload: PayloadRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "payload", rename_all = "snake_case")]
pub enum PayloadRecord {
    Audio {
        sound_format: CodeField,
        sound_rate: CodeField,
        sound_size: CodeField,
        sound_type: CodeField,
        data_length: usize,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        data_preview: Option<String>,
    },
    Video {
        frame_type: CodeField,
        codec_id: CodeField,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        avc_packet_type: Option<CodeField>,
        data_length: usize,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        data_preview: Option<String>,
    },
    ScriptData {
        data_length: usize,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        data_preview: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub audio_tags: u64,
    pub video_tags: u64,
    pub script_tags: u64,
    pub total_tags: u64,
    pub bytes_read: u64,
    pub stopped_early: bool,
}

impl From<&StreamSummary> for SummaryRecord {
    fn from(summary: &StreamSummary) -> Self {
        Self {
            audio_tags: summary.audio_tags,
            video_tags: summary.video_tags,
            script_tags: summary.script_tags,
            total_tags: summary.total_tags(),
            bytes_read: summary.bytes_read,
            stopped_early: summary.stopped_early,
        }
    }
}

/// Newline-delimited JSON, one [`Record`] per line.
pub struct JsonReport<W> {
    out: W,
    hex_preview: usize,
    show_previous_tag_size: bool,
    write_error: Option<io::Error>,
}

impl<W: Write> JsonReport<W> {
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

    fn emit(&mut self, record: &Record) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record).map_err(io::Error::from)?;
        self.out.write_all(b"\n")
    }

    fn preview(&self, data: &[u8]) -> Option<String> {
        (self.hex_preview > 0 && !data.is_empty()).then(|| hex_preview(data, self.hex_preview))
    }

    fn tag_record(&self, tag: &Tag) -> TagRecord {
        let frame = &tag.frame;
        let payload = match &tag.body {
            TagBody::Audio(audio) => self.audio_record(audio),
            TagBody::Video(video) => self.video_record(video),
            TagBody::ScriptData(data) => PayloadRecord::ScriptData {
                data_length: data.len(),
                data_preview: self.preview(data),
            },
        };
        TagRecord {
            previous_tag_size: self.show_previous_tag_size.then_some(frame.previous_tag_size),
            offset: frame.offset,
            tag_type: CodeField::new(frame.tag_type.code(), frame.tag_type.label()),
            data_size: frame.payload_size,
            timestamp: frame.timestamp,
            timestamp_extended: frame.timestamp_extended,
            stream_id: frame.stream_id,
            payload,
        }
    }

    fn audio_record(&self, audio: &AudioData) -> PayloadRecord {
        PayloadRecord::Audio {
            sound_format: CodeField::new(audio.sound_format.code(), audio.sound_format.label()),
            sound_rate: CodeField::new(audio.sound_rate.code(), audio.sound_rate.label()),
            sound_size: CodeField::new(audio.sound_size.code(), audio.sound_size.label()),
            sound_type: CodeField::new(audio.sound_type.code(), audio.sound_type.label()),
            data_length: audio.data.len(),
            data_preview: self.preview(&audio.data),
        }
    }

    fn video_record(&self, video: &VideoData) -> PayloadRecord {
        let avc_packet_type = match &video.body {
            VideoBody::Avc(packet) => Some(CodeField::new(
                packet.packet_type.code(),
                packet.packet_type.label(),
            )),
            VideoBody::Raw(_) => None,
        };
        let data = video.data();
        PayloadRecord::Video {
            frame_type: CodeField::new(video.frame_type.code(), video.frame_type.label()),
            codec_id: CodeField::new(video.codec_id.code(), video.codec_id.label()),
            avc_packet_type,
            data_length: data.len(),
            data_preview: self.preview(data),
        }
    }
}

impl<W: Write> TagVisitor for JsonReport<W> {
    fn visit_header(&mut self, header: &FlvHeader) -> flvscope_flv::Result<()> {
        let result = self.emit(&Record::Header(header.into()));
        record_write(&mut self.write_error, result)
    }

    fn visit_tag(&mut self, tag: &Tag) -> flvscope_flv::Result<()> {
        let record = Record::Tag(self.tag_record(tag));
        let result = self.emit(&record);
        record_write(&mut self.write_error, result)
    }
}

impl<W: Write> Report for JsonReport<W> {
    fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    fn finish(&mut self, summary: &StreamSummary) -> io::Result<()> {
        self.emit(&Record::Summary(summary.into()))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flvscope_flv::{SoundFormat, SoundRate, SoundSize, SoundType, TagFrame, TagType};

    fn audio_tag() -> Tag {
        Tag {
            frame: TagFrame {
                previous_tag_size: 0,
                tag_type: TagType::Audio,
                payload_size: 4,
                timestamp: 0,
                timestamp_extended: 0,
                stream_id: 0,
                offset: 13,
            },
            body: TagBody::Audio(AudioData {
                sound_format: SoundFormat::Aac,
                sound_rate: SoundRate::Khz44,
                sound_size: SoundSize::Bits16,
                sound_type: SoundType::Stereo,
                data: vec![0x00, 0x12, 0x10].into(),
            }),
        }
    }

    fn lines(report: JsonReport<Vec<u8>>) -> Vec<serde_json::Value> {
        String::from_utf8(report.into_inner())
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_audio_tag_record() {
        let mut report = JsonReport::new(Vec::new(), &ReportConfig::default());
        report.visit_tag(&audio_tag()).unwrap();
        let lines = lines(report);
        assert_eq!(lines.len(), 1);
        let tag = &lines[0];
        assert_eq!(tag["record"], "tag");
        assert_eq!(tag["payload"], "audio");
        assert_eq!(tag["previous_tag_size"], 0);
        assert_eq!(tag["tag_type"]["code"], 8);
        assert_eq!(tag["sound_format"]["label"], "AAC");
        assert_eq!(tag["sound_rate"]["code"], 3);
        assert_eq!(tag["data_length"], 3);
        assert!(tag.get("data_preview").is_none());
    }

    #[test]
    fn test_preview_and_hidden_previous_size() {
        let config = ReportConfig {
            hex_preview: 2,
            show_previous_tag_size: false,
            ..ReportConfig::default()
        };
        let mut report = JsonReport::new(Vec::new(), &config);
        report.visit_tag(&audio_tag()).unwrap();
        let tag = &lines(report)[0];
        assert!(tag.get("previous_tag_size").is_none());
        assert_eq!(tag["data_preview"], "00 12 ...");
    }

    #[test]
    fn test_header_and_summary_records() {
        let mut report = JsonReport::new(Vec::new(), &ReportConfig::default());
        report
            .visit_header(&FlvHeader {
                version: 1,
                flags: 0x05,
                data_offset: 9,
            })
            .unwrap();
        report
            .finish(&StreamSummary {
                audio_tags: 1,
                video_tags: 0,
                script_tags: 0,
                bytes_read: 28,
                stopped_early: false,
            })
            .unwrap();
        let text = String::from_utf8(report.into_inner()).unwrap();
        let records: Vec<Record> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(
            records[0],
            Record::Header(HeaderRecord {
                version: 1,
                flags: 0x05,
                has_audio: true,
                has_video: true,
                data_offset: 9,
            })
        );
        match &records[1] {
            Record::Summary(summary) => {
                assert_eq!(summary.total_tags, 1);
                assert_eq!(summary.bytes_read, 28);
            }
            other => panic!("expected summary, got {other:?}"),
        }
    }
}
