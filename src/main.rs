//! `u-dispatch <execute|compare> <file.xlsx> <RULE>...`
//!
//! Uploads a dataset to the scheduling service and prints the results.

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use u_dispatch::client::HttpTransport;
use u_dispatch::config::ClientConfig;
use u_dispatch::logging::init_logging;
use u_dispatch::models::{FileCandidate, Mode, RuleCatalog, SPREADSHEET_MIME};
use u_dispatch::presenter::render_text;
use u_dispatch::session::{Session, UiState};

const USAGE: &str = "usage: u-dispatch <execute|compare> <file.xlsx> <RULE>...";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let config = ClientConfig::load()?;
    init_logging(&config.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, path, rules) = parse_args(&args)?;
    info!(base_url = %config.service.base_url, %mode, "starting");

    let transport = HttpTransport::new(&config.service)?;
    let mut session = Session::new(Arc::new(transport));

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    if session.accept_file(Some(candidate(path, bytes))).is_err() {
        return Ok(report(&session));
    }
    if let Some(label) = session.file_label() {
        eprintln!("{label}");
    }

    for rule in rules {
        session.select_named(rule)?;
    }

    let state = match mode {
        Mode::Execute => session.execute().await,
        Mode::Compare => session.compare().await,
    };
    match state {
        UiState::Succeeded(results) if session.notice().is_none() => {
            print!("{}", render_text(&results));
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(report(&session)),
    }
}

fn parse_args(args: &[String]) -> Result<(Mode, &Path, &[String])> {
    let [mode, path, rules @ ..] = args else {
        bail!(USAGE);
    };
    let mode = match mode.as_str() {
        "execute" => Mode::Execute,
        "compare" => Mode::Compare,
        other => return Err(anyhow!("unknown mode {other:?}\n{USAGE}")),
    };
    if rules.is_empty() {
        let names: Vec<_> = RuleCatalog::order().iter().map(|r| r.name()).collect();
        eprintln!("no rules given; available: {}", names.join(", "));
    }
    Ok((mode, Path::new(path), rules))
}

/// Declares a media type from the extension, as a browser picker would.
fn candidate(path: &Path, bytes: Vec<u8>) -> FileCandidate {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    let media_type = if is_xlsx {
        SPREADSHEET_MIME
    } else {
        "application/octet-stream"
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileCandidate::new(bytes, media_type, name)
}

fn report(session: &Session) -> ExitCode {
    if let Some(message) = session.message() {
        eprintln!("error: {message}");
    }
    ExitCode::FAILURE
}
