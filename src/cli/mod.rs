//! CLI module for the student registry
//!
//! Command-line flags for the `student-registry` binary. Every flag is
//! optional and overrides the matching environment variable.

/// Colored terminal output.
pub mod output;

use crate::utils::config::Config;
use clap::Parser;

/// Student registry server
#[derive(Parser, Debug, Default)]
#[command(
    name = "student-registry",
    version,
    about = "Student account service with bearer-token authentication",
    after_help = "ENVIRONMENT:\n    \
                  JWT_SECRET            token signing secret (required)\n    \
                  DATABASE_URL          :memory:, a file path, or a libsql:// URL\n    \
                  DATABASE_AUTH_TOKEN   auth token for remote databases\n    \
                  HOST, PORT            bind address (default 127.0.0.1:3000)\n    \
                  REQUIRE_DATABASE      exit if the database can't be opened\n    \
                  RUST_LOG              log filter (default info)"
)]
pub struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Exit at startup if the database can't be opened
    #[arg(long)]
    pub require_database: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Applies flag overrides on top of the environment configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.require_database {
            config.database.required = true;
        }
    }

    /// Default tracing filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug,student_registry=trace"
        } else {
            "info"
        }
    }
}
