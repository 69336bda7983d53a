//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::load_limit_config;
use crate::error::{Error, Result, ResultExt};
use crate::limit::{Limit, LimitConfig, Page};
use serde::Serialize;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Apply {
                skip,
                limit,
                config,
                input,
            } => {
                let config = resolve_config(*skip, *limit, config.as_deref())?;
                self.apply(config, input).await
            }
            Commands::Page {
                page,
                page_size,
                input,
            } => {
                let config = LimitConfig::for_page(*page, *page_size);
                self.apply(config, input).await
            }
            Commands::Describe {
                skip,
                limit,
                config,
            } => {
                let config = resolve_config(*skip, *limit, config.as_deref())?;
                println!("{}", render_window(&config.build(), self.cli.format)?);
                Ok(())
            }
        }
    }

    async fn apply(&self, config: LimitConfig, input: &Path) -> Result<()> {
        info!("Windowing {} ({})", input.display(), config);
        let page = read_page(input, config.build()).await?;
        info!(
            "Collected {} lines, more available: {}",
            page.len(),
            page.has_more
        );
        println!("{}", render_page(&page, self.cli.format)?);
        Ok(())
    }
}

/// Merge a config file with explicit flags, flags winning
pub fn resolve_config(
    skip: Option<i64>,
    limit: Option<i64>,
    path: Option<&Path>,
) -> Result<LimitConfig> {
    let base = match path {
        Some(path) => load_limit_config(path)?,
        None => LimitConfig::default(),
    };
    Ok(LimitConfig::new(
        skip.unwrap_or(base.skip),
        limit.or(base.limit),
    ))
}

/// Collect the lines of `reader` that fall inside the window.
///
/// Reading stops as soon as the window is closed, so at most one line past the window is read.
pub async fn window_lines<R>(reader: R, mut limit: Limit) -> Result<Page<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut items = Vec::new();
    let mut read = 0_u64;

    while let Some(line) = lines.next_line().await? {
        read += 1;
        limit.next_row();
        if limit.should_output() {
            items.push(line);
        }
        if !limit.should_continue() {
            debug!("Window filled after reading {} lines", read);
            break;
        }
    }

    Ok(Page {
        items,
        skip: limit.items_to_skip(),
        max_items: limit.max_items(),
        has_more: !limit.should_continue(),
    })
}

async fn read_page(input: &Path, limit: Limit) -> Result<Page<String>> {
    if input == Path::new("-") {
        return window_lines(BufReader::new(tokio::io::stdin()), limit)
            .await
            .context("Failed to read stdin");
    }

    let file = match tokio::fs::File::open(input).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::file_not_found(input.display().to_string()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open '{}'", input.display()));
        }
    };
    window_lines(BufReader::new(file), limit)
        .await
        .with_context(|| format!("Failed to read '{}'", input.display()))
}

/// Render a collected page
pub fn render_page(page: &Page<String>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(page)?),
        OutputFormat::Pretty => {
            let mut out = String::new();
            for item in &page.items {
                out.push_str(item);
                out.push('\n');
            }
            let more = if page.has_more {
                ", more available"
            } else {
                ""
            };
            out.push_str(&format!("# {} lines{}", page.len(), more));
            Ok(out)
        }
    }
}

#[derive(Debug, Serialize)]
struct WindowDescription {
    skip: u64,
    max_items: u64,
    total_items: u64,
    unlimited: bool,
}

/// Render how a limit interprets its parameters
pub fn render_window(limit: &Limit, format: OutputFormat) -> Result<String> {
    let description = WindowDescription {
        skip: limit.items_to_skip(),
        max_items: limit.max_items(),
        total_items: limit.total_items(),
        unlimited: limit.is_unlimited(),
    };
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&description)?),
        OutputFormat::Pretty => Ok(format!(
            "Window: {}\nTotal items: {}",
            limit.config(),
            description.total_items
        )),
    }
}
