//! The nscrestc crate queries the REST API of an NSClient++ agent and turns the answer into
//! nagios/icinga plugin output.
//!
//! The whole run is a single pass: build the query URL from the command line, issue one GET,
//! decode the JSON answer and print one line of plugin output before exiting with the matching
//! exit code.
//!
//! ```rust
//! # use nscrestc::{PluginOutput, QueryResponse};
//! let body = br#"{"payload":[{"result":"WARNING","lines":[{"message":"disk low",
//!     "perf":[{"alias":"used","int_value":{"value":95.5,"unit":"%","warning":80,"critical":90}}]}]}]}"#;
//! let output = PluginOutput::from_response(&QueryResponse::from_slice(body)).unwrap();
//!
//! assert_eq!(&output.to_nagios_string(), "disk low|'used'=95.5%;80;90");
//! assert_eq!(output.exit_code(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

#[macro_use]
mod macros;

pub mod check;
pub mod cli;
pub mod config_generator;
mod error;
pub mod perf;
pub mod query;
pub mod request;
mod runner;
pub mod transport;

pub use crate::check::{execute, PluginOutput};
pub use crate::cli::{Cli, Config};
pub use crate::error::Error;
pub use crate::perf::{PerfTag, ToPerfString};
pub use crate::query::QueryResponse;
pub use crate::request::QueryRequest;
pub use crate::runner::{safe_run, RunnerResult};
pub use crate::transport::{Exchange, HttpTransport, Transport};

/// Represents a service state from nagios.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// The agent reported a result code outside of OK, WARNING, CRITICAL and UNKNOWN.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized result code {0:?}")]
pub struct UnrecognizedResultCode(pub String);

/// Parses the `result` field of a payload. The match is exact and case sensitive.
impl FromStr for ServiceState {
    type Err = UnrecognizedResultCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(ServiceState::Ok),
            "WARNING" => Ok(ServiceState::Warning),
            "CRITICAL" => Ok(ServiceState::Critical),
            "UNKNOWN" => Ok(ServiceState::Unknown),
            other => Err(UnrecognizedResultCode(other.to_owned())),
        }
    }
}
