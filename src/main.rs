//! sitemap-urls is a CLI tool that extracts the page URLs listed by a sitemap.xml
//! and exports them as CSV or as a fresh sitemap XML file.
//!
//! The tool has four commands:
//! 1. `extract` - Loads a sitemap and writes its URLs, one per line
//! 2. `export` - Turns a URL list (edited or not) into `sitemap-urls.csv` or `sitemap.xml`
//! 3. `copy` - Copies a URL list to the clipboard as it is
//! 4. `run` - Extracts and exports in one go

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, info, warn};

use sitemap_urls::{
    ExportFormat, ExtractionError, Session, Transport, UrlBuffer, clipboard::SystemClipboard,
    clipboard::copy_buffer, config::ExtractorConfig, export::render,
};

/// A CLI tool to extract page URLs from sitemap.xml
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The command to execute
    #[command(subcommand)]
    command: Command,

    #[arg(long, short, action = clap::ArgAction::Count, help = "Output v(v...)erbosity: error (0), warn (1), info (2), debug (3), trace (4)", global = true, default_value_t = 2)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Load a sitemap and write the URLs it lists, one per line
    Extract {
        /// The sitemap URL to load
        url: String,
        /// How to reach the sitemap: "direct", "relay" or "service"
        #[arg(long, short)]
        transport: Option<Transport>,
        /// Relay or extraction service endpoint
        #[arg(long, short)]
        endpoint: Option<String>,
        /// File to write the URL list to (default: stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Export a URL list as CSV or sitemap XML
    Export {
        /// Export format: "csv" or "xml"
        format: ExportFormat,
        /// File holding the URL list, one per line (default: stdin)
        #[arg(long, short)]
        input: Option<PathBuf>,
        /// Directory to save the export to under its default name
        #[arg(long, short, default_value = ".")]
        dir: PathBuf,
        /// Explicit path of the exported file, overrides --dir
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Copy a URL list to the clipboard as it is
    Copy {
        /// File holding the URL list (default: stdin)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
    /// Load a sitemap and export its URLs straight away
    Run {
        /// The sitemap URL to load
        url: String,
        /// Export format: "csv" (default) or "xml"
        #[arg(long, short, default_value = "csv")]
        format: ExportFormat,
        /// How to reach the sitemap: "direct", "relay" or "service"
        #[arg(long, short)]
        transport: Option<Transport>,
        /// Relay or extraction service endpoint
        #[arg(long, short)]
        endpoint: Option<String>,
        /// Directory to save the export to
        #[arg(long, short, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Error,
            1 => LevelFilter::Warn,
            2 => LevelFilter::Info,
            3 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    match cli.command {
        Command::Extract {
            url,
            transport,
            endpoint,
            output,
        } => handle_extract_command(url, transport, endpoint, output).await,
        Command::Export {
            format,
            input,
            dir,
            output,
        } => handle_export_command(format, input, &dir, output),
        Command::Copy { input } => {
            let buffer = read_buffer(input.as_deref())?;
            copy_buffer(&buffer, &mut SystemClipboard)?;
            Ok(())
        }
        Command::Run {
            url,
            format,
            transport,
            endpoint,
            dir,
        } => handle_run_command(url, format, transport, endpoint, &dir).await,
    }
}

/// Loads the sitemap into a fresh session. An empty sitemap is reported and
/// yields `None` rather than an error.
async fn load_session(
    url: String,
    transport: Option<Transport>,
    endpoint: Option<String>,
) -> Result<Option<Session>> {
    let extractor = ExtractorConfig::from_env()?
        .with_overrides(transport, endpoint)
        .build()?;

    let mut session = Session::new();
    session.set_source(url);

    match session.load(&extractor).await {
        Ok(_) => Ok(Some(session)),
        Err(ExtractionError::EmptyResult) => {
            warn!("{}", ExtractionError::EmptyResult);
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

async fn handle_extract_command(
    url: String,
    transport: Option<Transport>,
    endpoint: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(session) = load_session(url, transport, endpoint).await? else {
        return Ok(());
    };

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", session.buffer()))
                .context(format!("Failed to write {}", path.display()))?;
            info!("URL list written to {}", path.display());
        }
        None => println!("{}", session.buffer()),
    }

    Ok(())
}

fn handle_export_command(
    format: ExportFormat,
    input: Option<PathBuf>,
    dir: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let buffer = read_buffer(input.as_deref())?;
    let download = render(format, &buffer, chrono::Local::now().date_naive())?;

    match output {
        Some(path) => download.save_as(&path)?,
        None => {
            download.save(dir)?;
        }
    }

    Ok(())
}

async fn handle_run_command(
    url: String,
    format: ExportFormat,
    transport: Option<Transport>,
    endpoint: Option<String>,
    dir: &Path,
) -> Result<()> {
    let Some(session) = load_session(url, transport, endpoint).await? else {
        return Ok(());
    };

    render(format, session.buffer(), chrono::Local::now().date_naive())?.save(dir)?;
    Ok(())
}

/// Reads the URL list from a file, or from stdin when no file is given.
fn read_buffer(input: Option<&Path>) -> Result<UrlBuffer> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .context(format!("Failed to read URL list: {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read URL list from stdin")?;
            text
        }
    };

    Ok(UrlBuffer::new(text))
}
