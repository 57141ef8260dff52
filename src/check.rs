use std::process;

use crate::query::QueryResponse;
use crate::{Config, Error, PerfTag, QueryRequest, ServiceState, ToPerfString, Transport};

/// The single line a nagios plugin prints, together with the state that decides the exit code.
///
/// ```rust
/// # use nscrestc::{PerfTag, PluginOutput, ServiceState};
/// let output = PluginOutput::new(ServiceState::Ok, " all fine ")
///     .with_perf(PerfTag::new("load", 0.5));
/// assert_eq!(&output.to_nagios_string(), "all fine|'load'=0.5");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PluginOutput {
    state: ServiceState,
    message: String,
    perf: Vec<PerfTag>,
}

impl PluginOutput {
    pub fn new(state: ServiceState, message: &str) -> Self {
        PluginOutput {
            state,
            message: message.to_owned(),
            perf: Vec::new(),
        }
    }

    /// Output of a probe run, which only checks that the agent answers at all.
    pub fn reachable(url: &str) -> Self {
        PluginOutput::new(
            ServiceState::Ok,
            &format!("OK: NSClient API reachable on {}", url),
        )
    }

    /// Interprets the first payload entry of a query response.
    ///
    /// The message is the one of the last line; perfdata of every line is kept in order.
    /// A result code the agent should never send is treated as OK.
    pub fn from_response(response: &QueryResponse) -> Result<Self, Error> {
        let payload = response.first_payload().ok_or(Error::EmptyPayload)?;

        let state = payload.result.parse::<ServiceState>().unwrap_or_else(|e| {
            log::warn!("{}, treating it as OK", e);
            ServiceState::Ok
        });

        let mut output = PluginOutput::new(state, "");
        for line in &payload.lines {
            output.message = line.message.trim().to_owned();
            output.perf.extend(line.perf.iter().filter_map(PerfTag::from_perf));
        }

        Ok(output)
    }

    pub fn with_perf(mut self, tag: PerfTag) -> Self {
        self.perf.push(tag);
        self
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn perf(&self) -> &[PerfTag] {
        &self.perf
    }

    pub fn to_nagios_string(&self) -> String {
        let mut s = self.message.trim().to_owned();

        if !self.perf.is_empty() {
            let tags: Vec<String> = self.perf.iter().map(|t| t.to_perf_string()).collect();
            s.push('|');
            s.push_str(tags.join(" ").trim());
        }

        s
    }

    pub fn exit_code(&self) -> i32 {
        self.state.exit_code()
    }

    /// Will print Self::to_nagios_string and exit with the exit code from Self::exit_code
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        process::exit(self.exit_code());
    }
}

/// Runs one query against the agent and interprets the answer.
pub fn execute<T: Transport>(config: &Config, transport: &T) -> Result<PluginOutput, Error> {
    let request = QueryRequest::new(&config.url, &config.query)?;
    let exchange = transport.get(&request, &config.password)?;

    if request.is_probe() {
        return Ok(PluginOutput::reachable(&config.url));
    }

    let response = QueryResponse::from_slice(&exchange.body);
    if response.first_payload().is_none() && config.verbose {
        println!("QUERY RESULT:\n{:?}", response);
    }

    PluginOutput::from_response(&response)
}
