use std::env;
use std::fs;
use std::net::SocketAddrV4;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;
use tracing::Level;

/// Server configuration.
///
/// Every field has a default, so an empty YAML document is valid. Environment
/// variables override whatever the file or the defaults say:
///
/// | Variable | Field |
/// |---|---|
/// | `LISTEN` | `listen_addr` |
/// | `ROOT` | `root` |
/// | `LISTING` | `listing` |
/// | `LOG_LEVEL` | `log_level` |
/// | `CGI_INTERPRETER` | `interpreter.command` |
/// | `CGI_TIMEOUT` | `interpreter.timeout_secs` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IPv4 address and port to listen on.
    pub listen_addr: String,
    /// Directory every request path is resolved under.
    pub root: PathBuf,
    /// Render a listing for directories that have no index file.
    pub listing: bool,
    pub log_level: String,
    pub limits: Limits,
    pub interpreter: InterpreterConfig,
}

/// Size limits on a request's header block.
///
/// The defaults follow Apache's `LimitRequestLine`, `LimitRequestFields` and
/// `LimitRequestFieldSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Longest accepted request-line, CRLF included.
    pub request_line: usize,
    /// Most header fields accepted.
    pub field_count: usize,
    /// Longest accepted header field, CRLF included.
    pub field_size: usize,
}

/// External interpreter used for `.php` resources.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            root: PathBuf::from("."),
            listing: true,
            log_level: "info".to_string(),
            limits: Limits::default(),
            interpreter: InterpreterConfig::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            request_line: 8190,
            field_count: 50,
            field_size: 4094,
        }
    }
}

impl Limits {
    /// Largest header block read before giving up on finding its terminator.
    ///
    /// Saturates at `usize::MAX`; configuration loading rejects limits for
    /// which [`Limits::checked_ceiling`] overflows.
    pub fn ceiling(&self) -> usize {
        self.checked_ceiling().unwrap_or(usize::MAX)
    }

    pub fn checked_ceiling(&self) -> Option<usize> {
        self.field_count
            .checked_mul(self.field_size)?
            .checked_add(self.request_line)?
            .checked_add(4)
    }
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            command: "php-cgi".to_string(),
            args: Vec::new(),
            timeout_secs: 30,
        }
    }
}

impl InterpreterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Defaults plus environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_env()?;
        Ok(cfg)
    }

    /// Reads a YAML file, then applies environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let mut cfg: Config = serde_yaml::from_str(text).context("invalid configuration")?;
        if cfg.limits.checked_ceiling().is_none() {
            bail!("request limits are too large: {:?}", cfg.limits);
        }
        cfg.apply_env()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) -> anyhow::Result<()> {
        if let Ok(addr) = env::var("LISTEN") {
            self.listen_addr = addr;
        }
        if let Ok(root) = env::var("ROOT") {
            self.root = PathBuf::from(root);
        }
        if let Ok(listing) = env::var("LISTING") {
            self.listing = match listing.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => bail!("LISTING must be on or off, got {listing:?}"),
            };
        }
        if let Ok(level) = env::var("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(command) = env::var("CGI_INTERPRETER") {
            self.interpreter.command = command;
        }
        if let Ok(timeout) = env::var("CGI_TIMEOUT") {
            self.interpreter.timeout_secs = timeout
                .parse()
                .with_context(|| format!("CGI_TIMEOUT must be whole seconds, got {timeout:?}"))?;
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddrV4> {
        self.listen_addr
            .parse()
            .with_context(|| format!("invalid IPv4 listen address {:?}", self.listen_addr))
    }

    /// Keeps the configured interface and replaces the port.
    pub fn set_port(&mut self, port: u16) -> anyhow::Result<()> {
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.listen_addr = addr.to_string();
        Ok(())
    }

    /// Canonical form of `root`; it must be an existing directory.
    pub fn resolve_root(&self) -> anyhow::Result<PathBuf> {
        let root = fs::canonicalize(&self.root)
            .with_context(|| format!("cannot resolve root {}", self.root.display()))?;
        if !root.is_dir() {
            bail!("root {} is not a directory", root.display());
        }
        Ok(root)
    }

    pub fn log_level(&self) -> anyhow::Result<Level> {
        self.log_level
            .parse()
            .with_context(|| format!("unknown log level {:?}", self.log_level))
    }
}
