//! Aggregator: walks the credential list in order, verifies each entry,
//! streams rendered results to the console, tallies the run summary, and
//! optionally saves everything to a text file.
//!
//! Typical usage:
//!
//! ```no_run
//! use credcheck::{aggregator::Aggregator, config::CheckerConfig, verifier::HttpVerifier};
//! # fn main() -> anyhow::Result<()> {
//! let config = CheckerConfig::new("https://id.example.test/users/@me".parse()?)?;
//! let verifier = HttpVerifier::new(&config)?;
//! let creds = credcheck::io::load_credentials("Token.txt")?;
//! let report = Aggregator::new(verifier, &config).run(&creds, None)?;
//! println!("{}", report.summary.success_rate);
//! # Ok(())
//! # }
//! ```
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use colored::Colorize;
use log::{error, info};

use crate::config::CheckerConfig;
use crate::credential::Credential;
use crate::export::save_results_txt;
use crate::report::{colorize_block, colorize_summary, render_outcome, render_summary};
use crate::stats::RunSummary;
use crate::verifier::Verify;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("no credentials to check")]
    NoCredentials,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One block per credential in input order, then the summary block.
    pub results: Vec<String>,
    pub summary: RunSummary,
    /// Set when the results file was written successfully.
    pub saved_to: Option<PathBuf>,
}

pub struct Aggregator<V> {
    verifier: V,
    delay: Duration,
    preview_len: usize,
}

impl<V: Verify> Aggregator<V> {
    pub fn new(verifier: V, config: &CheckerConfig) -> Self {
        Self {
            verifier,
            delay: config.delay,
            preview_len: config.preview_len,
        }
    }

    /// Override the pause between lookups.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Run against stdout.
    pub fn run(
        &self,
        credentials: &[Credential],
        output: Option<&Path>,
    ) -> Result<RunReport, AggregateError> {
        let stdout = std::io::stdout();
        let mut console = stdout.lock();
        self.run_with_console(credentials, output, &mut console)
    }

    /// Process every credential, writing progress and rendered blocks to
    /// `console` as they complete. Per-credential failures and a failed
    /// results write never abort the run.
    pub fn run_with_console<W: Write>(
        &self,
        credentials: &[Credential],
        output: Option<&Path>,
        console: &mut W,
    ) -> Result<RunReport, AggregateError> {
        if credentials.is_empty() {
            return Err(AggregateError::NoCredentials);
        }
        let total = credentials.len();
        let mut results: Vec<String> = Vec::with_capacity(total + 1);
        let mut summary = RunSummary::default();

        // Console write failures are ignored; the run must still complete.
        let _ = writeln!(console, "\n{}\n", "Starting credential validation...".cyan());
        for (idx, cred) in credentials.iter().enumerate() {
            let _ = writeln!(
                console,
                "{}",
                format!("Processing credential {}/{}", idx + 1, total).yellow()
            );
            let outcome = self.verifier.verify(cred);
            summary.record(&outcome);
            let block = render_outcome(cred, &outcome, self.preview_len);
            let _ = writeln!(console, "{}\n", colorize_block(&block, &outcome));
            results.push(block);

            if idx + 1 < total && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        let summary = summary.finish();
        let rendered = render_summary(&summary);
        let _ = writeln!(console, "{}", colorize_summary(&rendered));
        results.push(rendered);

        let saved_to = output.and_then(|path| match save_results_txt(&results, path) {
            Ok(()) => {
                info!("results saved to {}", path.display());
                Some(path.to_path_buf())
            }
            Err(e) => {
                error!("failed to write output: {}", e);
                None
            }
        });

        Ok(RunReport {
            results,
            summary,
            saved_to,
        })
    }
}
