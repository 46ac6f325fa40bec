use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "deckgen")]
#[command(about = "Generate a slide deck from a topic via the generation backend")]
pub struct Cli {
    /// Presentation topic, e.g. "Machine Learning Basics"
    pub topic: String,

    /// Number of slides (3-20)
    #[arg(short, long, default_value_t = 5)]
    pub slides: u8,

    /// Directory the artifact is saved into
    #[arg(short, long, default_value = "output")]
    pub out: PathBuf,

    /// Generation backend endpoint
    #[arg(long, default_value = deck_engine::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Hand the artifact to a download step instead of saving right away
    #[arg(long)]
    pub deferred: bool,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogArg::File)]
    pub log: LogArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogArg {
    File,
    Term,
    Both,
}

impl Cli {
    pub fn log_destination(&self) -> LogDestination {
        match self.log {
            LogArg::File => LogDestination::File,
            LogArg::Term => LogDestination::Terminal,
            LogArg::Both => LogDestination::Both,
        }
    }
}
