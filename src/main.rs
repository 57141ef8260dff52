use std::process;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use nscrestc::config_generator::print_icinga_command_config_if_env_and_exit;
use nscrestc::{execute, safe_run, Cli, Config, Error, HttpTransport, ServiceState};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = print_icinga_command_config_if_env_and_exit("nscrestc", &Cli::command()) {
        println!("{}: {}", ServiceState::Unknown, e);
        process::exit(ServiceState::Unknown.exit_code());
    }

    let config = parse_config();
    log::debug!("querying {} with a timeout of {:?}", config.url, config.timeout);

    safe_run(|| {
        let transport = HttpTransport::new(&config)?;
        execute(&config, &transport)
    })
    .print_and_exit()
}

/// Parses the command line. Usage problems end the process with UNKNOWN, except for explicit
/// requests for help or version.
fn parse_config() -> Config {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprint!("{}: {}", ServiceState::Unknown, e);
            process::exit(ServiceState::Unknown.exit_code());
        }
    };

    match Config::try_from(cli) {
        Ok(config) => config,
        Err(e @ Error::MissingArgument(_)) => {
            eprintln!("{}: {}", ServiceState::Unknown, e);
            eprintln!("{}", Cli::command().render_help());
            process::exit(ServiceState::Unknown.exit_code());
        }
        Err(e) => {
            println!("{}: {}", ServiceState::Unknown, e);
            process::exit(ServiceState::Unknown.exit_code());
        }
    }
}
