use std::time::Duration;

use clap::Parser;

use crate::transport::timeout_from_secs;
use crate::Error;

/// Nagios/Icinga check plugin for the NSClient++ REST API.
///
/// Without a query the plugin only checks that the API answers.
#[derive(Debug, Parser)]
#[command(name = "nscrestc", version)]
pub struct Cli {
    /// NSClient++ URL, for example https://10.1.2.3:8443.
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// NSClient++ webserver password.
    #[arg(short = 'p', long = "password")]
    pub password: Option<String>,

    /// Connection timeout in seconds, 0 disables it.
    #[arg(short = 't', long = "timeout", default_value_t = 10)]
    pub timeout: u64,

    /// Enable verbose output.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Insecure mode - skip TLS verification.
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Query command followed by its arguments as key=value or key.
    #[arg(value_name = "QUERY", num_args = 1.., trailing_var_arg = true)]
    pub query: Vec<String>,
}

/// Settings of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub url: String,
    pub password: String,
    pub timeout: Option<Duration>,
    pub verbose: bool,
    pub insecure: bool,
    pub query: Vec<String>,
}

impl TryFrom<Cli> for Config {
    type Error = Error;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let url = cli.url.ok_or(Error::MissingArgument('u'))?;
        let password = cli.password.ok_or(Error::MissingArgument('p'))?;

        Ok(Config {
            url,
            password,
            timeout: timeout_from_secs(cli.timeout),
            verbose: cli.verbose,
            insecure: cli.insecure,
            query: cli.query,
        })
    }
}
