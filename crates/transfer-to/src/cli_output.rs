//! Terminal-facing output for the host shell.
//!
//! Machine-readable results go to stdout; user alerts go to stderr.

use eyre::Context as _;
use serde::Serialize;
use std::io::Write as _;
use transfer_to::navigation::{AmountRequest, ErrorPresenter, Navigator};

fn stderr_writeln(s: &str) {
    let mut stderr = std::io::stderr().lock();
    if stderr.write_all(s.as_bytes()).is_err() {
        return;
    }
    if stderr.write_all(b"\n").is_err() {
        return;
    }
    let _flush = stderr.flush();
}

pub fn print_json<T: Serialize>(value: &T) -> eyre::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize output")?;
    writeln!(std::io::stdout().lock(), "{s}").context("write output")?;
    Ok(())
}

pub fn print_line(line: &str) -> eyre::Result<()> {
    writeln!(std::io::stdout().lock(), "{line}").context("write output")?;
    Ok(())
}

/// Holds the navigation payload until the command prints it.
#[derive(Debug, Default)]
pub struct CapturedNavigation {
    pub request: Option<AmountRequest>,
}

impl Navigator for CapturedNavigation {
    fn push_amount(&mut self, request: AmountRequest) {
        self.request = Some(request);
    }
}

#[derive(Debug, Default)]
pub struct StderrAlerts;

impl ErrorPresenter for StderrAlerts {
    fn alert(&mut self, message: &str) {
        stderr_writeln(&format!("transfer-to: {message}"));
    }
}
