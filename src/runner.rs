use std::fmt::Display;

use crate::{PluginOutput, ServiceState};

/// Runs the given closure and turns an error into an [ServiceState::Unknown] result carrying the
/// error message.
pub fn safe_run<E: Display>(f: impl FnOnce() -> Result<PluginOutput, E>) -> RunnerResult<E> {
    match f() {
        Ok(output) => RunnerResult::Ok(output),
        Err(err) => RunnerResult::Err(ServiceState::Unknown, err),
    }
}

pub enum RunnerResult<E> {
    Ok(PluginOutput),
    Err(ServiceState, E),
}

impl<E: Display> RunnerResult<E> {
    pub fn to_nagios_string(&self) -> String {
        match self {
            RunnerResult::Ok(output) => output.to_nagios_string(),
            RunnerResult::Err(state, err) => format!("{}: {}", state, err),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            RunnerResult::Ok(output) => output.exit_code(),
            RunnerResult::Err(state, _) => state.exit_code(),
        }
    }

    pub fn print_and_exit(self) -> ! {
        println!("{}", self.to_nagios_string());
        std::process::exit(self.exit_code());
    }
}
