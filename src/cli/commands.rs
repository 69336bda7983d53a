//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Skip/take windowing over lines of text
#[derive(Parser, Debug)]
#[command(name = "rowlimit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the lines of the input that fall inside a window
    Apply {
        /// Number of lines to skip
        #[arg(long, allow_negative_numbers = true)]
        skip: Option<i64>,

        /// Max number of lines to print (0 = no limit)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Window config file (YAML or JSON); explicit flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Print one page of the input lines
    Page {
        /// Zero-based page number
        #[arg(long)]
        page: u32,

        /// Lines per page (0 = no limit)
        #[arg(long)]
        page_size: u32,

        /// Input file ("-" for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Show how a window is interpreted
    Describe {
        /// Number of items to skip
        #[arg(long, allow_negative_numbers = true)]
        skip: Option<i64>,

        /// Max number of items (0 = no limit)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Window config file (YAML or JSON); explicit flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one object per invocation)
    Json,
    /// Human-readable output
    Pretty,
}
