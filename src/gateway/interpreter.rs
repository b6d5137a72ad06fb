//! External interpreter invocation
//!
//! Runs a CGI-style interpreter (by default `php-cgi`) for a script and
//! turns its standard output into a response.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::Command;
use tokio::time::timeout;

use crate::config::InterpreterConfig;
use crate::error::{GatewayError, HttpError};
use crate::files::transfer::ensure_readable;
use crate::gateway::output::CgiOutput;
use crate::http::response::Response;

/// Spawns the interpreter for one script at a time.
#[derive(Debug, Clone)]
pub struct Interpreter {
    /// Program to run
    command: String,

    /// Arguments passed before anything else
    args: Vec<String>,

    /// How long the interpreter may take to close its output
    timeout: Duration,
}

impl Interpreter {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &InterpreterConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone(), config.timeout())
    }

    /// Runs `script` with `query` and forwards the interpreter's headers and
    /// body with status 200.
    ///
    /// An unreadable script is a 403. A spawn failure, a timeout or output
    /// without a header/body separator is a 500. The exit status is only
    /// logged.
    pub async fn respond(&self, script: &Path, query: &str) -> Result<Response, HttpError> {
        ensure_readable(script).await?;

        let stdout = self.run(script, query).await?;
        let output = CgiOutput::parse(stdout)?;

        Ok(output.into_response())
    }

    /// Runs the interpreter and returns everything it wrote to stdout.
    ///
    /// The interpreter sees three variables: `QUERY_STRING`,
    /// `REDIRECT_STATUS=200` and `SCRIPT_FILENAME`. Its stdin is closed. It is
    /// killed if it outlives the timeout. A non-zero exit is logged with the
    /// captured stderr and its stdout is still returned.
    pub async fn run(&self, script: &Path, query: &str) -> Result<Vec<u8>, GatewayError> {
        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .env("QUERY_STRING", query)
            .env("REDIRECT_STATUS", "200")
            .env("SCRIPT_FILENAME", script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|source| GatewayError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        tracing::debug!(
            interpreter = %self.command,
            script = %script.display(),
            query,
            "Spawned interpreter"
        );

        let started = Instant::now();
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GatewayError::Timeout(self.timeout))??;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            // `exit(n)` and fatal errors still leave a full response on stdout
            let exit = GatewayError::Exit {
                status: output.status,
                stderr,
            };
            tracing::warn!(script = %script.display(), error = %exit, "Interpreter failed");
        } else if !stderr.is_empty() {
            tracing::warn!(script = %script.display(), %stderr, "Interpreter wrote to stderr");
        }

        tracing::debug!(
            script = %script.display(),
            bytes = output.stdout.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Interpreter finished"
        );

        Ok(output.stdout)
    }
}
