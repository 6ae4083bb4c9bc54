//! Report consumers for decoded FLV records.
//!
//! Both reports implement [`TagVisitor`] and write synchronously as each tag
//! arrives, so only the tag being printed is held in memory.

mod json;
mod text;

pub use json::{
    CodeField, HeaderRecord, JsonReport, PayloadRecord, Record, SummaryRecord, TagRecord,
};
pub use text::TextReport;

use crate::config::{ReportConfig, ReportFormat};
use anyhow::{Context, Result};
use flvscope_flv::{FlvDemuxer, StreamSummary, TagVisitor};
use std::io::{self, Read, Write};

/// A visitor that also writes a closing section once the stream is done.
pub trait Report: TagVisitor {
    fn finish(&mut self, summary: &StreamSummary) -> io::Result<()>;

    /// The output error that made a visit fail, if any.
    fn take_write_error(&mut self) -> Option<io::Error>;
}

/// Decode `input` and write the configured report to `out`.
pub fn analyze<R: Read, W: Write>(
    input: R,
    out: W,
    config: &ReportConfig,
) -> Result<StreamSummary> {
    match config.format {
        ReportFormat::Text => run(input, &mut TextReport::new(out, config), config),
        ReportFormat::Json => run(input, &mut JsonReport::new(out, config), config),
    }
}

fn run<R: Read, V: Report>(
    input: R,
    report: &mut V,
    config: &ReportConfig,
) -> Result<StreamSummary> {
    let mut demuxer = FlvDemuxer::new(input);
    let summary = match demuxer.run_limited(report, config.max_tags) {
        Ok(summary) => summary,
        Err(e) => {
            if let Some(write_error) = report.take_write_error() {
                return Err(anyhow::Error::new(write_error).context("Failed to write report"));
            }
            return Err(anyhow::Error::new(e).context(format!(
                "Failed to decode FLV stream at offset {}",
                demuxer.position()
            )));
        }
    };
    report.finish(&summary).context("Failed to write report")?;
    Ok(summary)
}

/// Hand an output result back to the demuxer, keeping the original error in
/// `slot` so it is not reported as a decode failure.
pub(crate) fn record_write(
    slot: &mut Option<io::Error>,
    result: io::Result<()>,
) -> flvscope_flv::Result<()> {
    result.map_err(|e| {
        let forwarded = io::Error::new(e.kind(), e.to_string());
        slot.get_or_insert(e);
        flvscope_flv::Error::Io(forwarded)
    })
}

/// Space-separated hex of the first `limit` bytes, with a trailing ellipsis
/// when the data is longer.
pub(crate) fn hex_preview(data: &[u8], limit: usize) -> String {
    let shown = &data[..data.len().min(limit)];
    let mut out = shown
        .iter()
        .map(|byte| hex::encode([*byte]))
        .collect::<Vec<_>>()
        .join(" ");
    if data.len() > limit {
        out.push_str(" ...");
    }
    out
}
