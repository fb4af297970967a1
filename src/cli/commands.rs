//! CLI arguments

use clap::Parser;
use std::path::PathBuf;

/// Export Figma library analytics to CSV
#[derive(Parser, Debug)]
#[command(name = "figma-library-analytics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library file key (overrides FILE_KEY)
    #[arg(long)]
    pub file_key: Option<String>,

    /// First day of the range, YYYY-MM-DD (overrides START_DATE)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last day of the range, YYYY-MM-DD (overrides END_DATE)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Directory for CSV reports (overrides OUTPUT_DIR)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Maximum pages fetched per report (overrides MAX_PAGES)
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Only run the named report(s), e.g. `--report usages_by_file`
    #[arg(short, long = "report", value_name = "NAME")]
    pub reports: Vec<String>,

    /// List the built-in reports and exit
    #[arg(long)]
    pub list: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
