//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `page_audit` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::io::Write;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use page_audit::app::{render_json, render_plain};
use page_audit::config::{Command, Opt};
use page_audit::initialization::init_logger_with;
use page_audit::{AuditError, Config, OutputFormat, PageAuditor, ProcessingStats};

#[tokio::main]
async fn main() -> Result<()> {
    // PAGESPEED_API_KEY may live in .env; try the current directory first,
    // then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let stats = Arc::new(ProcessingStats::new());
    let auditor = match PageAuditor::new(config, Arc::clone(&stats)) {
        Ok(auditor) => Arc::new(auditor),
        Err(e) => {
            eprintln!("page_audit error: {e}");
            process::exit(1);
        }
    };

    match opt.command {
        Command::Audit { urls, format } => {
            let mut rejected = 0usize;
            for url in &urls {
                if url == "-" {
                    audit_stdin(&auditor, format).await?;
                } else if !audit_one(&auditor, url, format).await? {
                    rejected += 1;
                }
            }
            stats.log_summary();
            if rejected > 0 {
                process::exit(1);
            }
            Ok(())
        }
        Command::Serve { port } => {
            let result = page_audit::server::start_server(port, auditor).await;
            stats.log_summary();
            result
        }
    }
}

/// Audits one URL and prints the report. Returns `false` if the submission
/// was rejected.
async fn audit_one(auditor: &PageAuditor, url: &str, format: OutputFormat) -> Result<bool> {
    match auditor.audit(url).await {
        Ok(report) => {
            match format {
                OutputFormat::Plain => println!("{}", render_plain(&report)),
                OutputFormat::Json => println!(
                    "{}",
                    render_json(&report).context("Failed to serialize report")?
                ),
            }
            Ok(true)
        }
        Err(e @ AuditError::InvalidInput) => {
            eprintln!("❌ {e}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Interactive session: one URL per line until end of input. An empty line
/// is answered with the input prompt error and the session continues.
async fn audit_stdin(auditor: &PageAuditor, format: OutputFormat) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::warn!("Failed to read line from input: {e}");
                break;
            }
        };
        audit_one(auditor, &line, format).await?;
    }
    Ok(())
}

fn prompt() {
    eprint!("URL to audit> ");
    let _ = std::io::stderr().flush();
}
