use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

/// Output encoding of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Indented human-readable listing
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// Leading payload bytes to show as hex for each tag (0 = none)
    #[serde(default)]
    pub hex_preview: usize,

    /// Include the previous-tag-size field in the report
    #[serde(default = "default_show_previous_tag_size")]
    pub show_previous_tag_size: bool,

    /// Stop after this many tags
    #[serde(default)]
    pub max_tags: Option<u64>,
}

fn default_show_previous_tag_size() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            hex_preview: 0,
            show_previous_tag_size: default_show_previous_tag_size(),
            max_tags: None,
        }
    }
}
