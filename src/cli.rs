use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flvscope")]
#[command(author, version, about = "Inspect the header and tags of an FLV stream")]
pub struct Cli {
    /// FLV file to analyze (reads stdin when omitted or "-")
    pub input: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output one JSON object per line instead of text
    #[arg(long)]
    pub json: bool,

    /// Stop after this many tags
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_tags: Option<u64>,
}

impl Cli {
    /// The input path, or `None` when reading from stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}
