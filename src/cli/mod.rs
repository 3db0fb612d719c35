//! Command-line parsing for the marketing report generator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline/export code.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::RunConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mkr",
    version,
    about = "Campaign metrics, summary charts, and a paginated PDF report"
)]
pub struct Cli {
    /// Input CSV with columns: date, campaign, impressions, clicks, cost, conversions.
    #[arg(short = 'i', long, default_value = "data/marketing_data.csv")]
    pub input: PathBuf,

    /// Output directory for the spreadsheet, chart PNGs, and the PDF report.
    #[arg(short = 'o', long = "out-dir", default_value = "charts")]
    pub out_dir: PathBuf,

    /// Report title (first line of the title page).
    #[arg(long, default_value = "Marketing Report")]
    pub title: String,

    /// Author line on the title page.
    #[arg(long, default_value = "Marketing Analytics")]
    pub author: String,

    /// Do not open the finished report in the default viewer.
    #[arg(long)]
    pub no_open: bool,

    /// How many rows of the loaded table to echo before processing.
    #[arg(long, default_value_t = 5)]
    pub head: usize,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        RunConfig {
            input: self.input.clone(),
            out_dir: self.out_dir.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            open_viewer: !self.no_open,
            head: self.head,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_layout() {
        let cli = Cli::parse_from(["mkr"]);
        let config = cli.to_config();
        assert_eq!(config.input, PathBuf::from("data/marketing_data.csv"));
        assert_eq!(config.out_dir, PathBuf::from("charts"));
        assert!(config.open_viewer);
        assert_eq!(config.head, 5);
    }

    #[test]
    fn no_open_disables_the_viewer() {
        let cli = Cli::parse_from(["mkr", "--no-open"]);
        assert!(!cli.to_config().open_viewer);
    }
}
