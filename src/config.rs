use std::path::PathBuf;

use clap::Parser;

use crate::data::model::Reaction;
use crate::data::rank::DEFAULT_TOP_N;

/// Startup configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "rt-explorer", version, about = "Explore engagement of RT articles by search term")]
pub struct Cli {
    /// Dataset to open at startup (.parquet, .json or .csv).
    #[arg(env = "RT_EXPLORER_DATA")]
    pub data: Option<PathBuf>,

    /// Initial search term.
    #[arg(long, default_value = "grün")]
    pub term: String,

    /// Initial reaction used to rank the top posts.
    #[arg(long, default_value = "haha", value_parser = parse_reaction)]
    pub reaction: Reaction,

    /// Number of posts in the ranking.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
}

fn parse_reaction(s: &str) -> Result<Reaction, String> {
    Reaction::from_column(s).ok_or_else(|| {
        let names: Vec<&str> = Reaction::ALL.iter().map(|r| r.column()).collect();
        format!("unknown reaction '{s}', expected one of: {}", names.join(", "))
    })
}
