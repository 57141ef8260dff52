//! Generates an Icinga2 `CheckCommand` object for this plugin out of its clap definition.

use clap::ArgAction;

pub struct CommandDescription {
    arguments: Vec<ArgumentDescription>,
}

pub struct ArgumentDescription {
    key: String,
    var: String,
    description: Option<String>,
    is_flag: bool,
    is_positional: bool,
    default_value: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToIcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
    #[error("error converting to command description: {0}")]
    CommandDescriptionFromError(#[from] CommandDescriptionFromError),
}

impl CommandDescription {
    /// Renders the command object. Custom variables are named `<name>_<argument id>`.
    pub fn to_icinga_command(&self, name: &str) -> Result<String, ToIcingaCommandError> {
        let mut out = format!("object CheckCommand \"{name}\" {{\n");
        let current_exe = std::env::current_exe()?
            .to_str()
            .ok_or(ToIcingaCommandError::InvalidExecutablePath)?
            .to_owned();

        out.push_str(&format!("  command = [ \"{current_exe}\" ]\n"));
        out.push_str("  arguments = {\n");
        for arg in &self.arguments {
            let var = format!("{}_{}", name, arg.var);
            out.push_str(&format!("    \"{}\" = {{\n", arg.key));

            if arg.is_flag {
                out.push_str(&format!("      set_if = \"${var}$\"\n"));
            } else {
                out.push_str(&format!("      value = \"${var}$\"\n"));
            }

            if arg.is_positional {
                out.push_str("      skip_key = true\n");
                out.push_str("      order = 1\n");
            }

            if let Some(description) = &arg.description {
                out.push_str(&format!(
                    "      description = \"{}\"\n",
                    escape_string(description)
                ));
            }

            out.push_str("    }\n");
        }
        out.push_str("  }\n");

        out.push('\n');

        for arg in &self.arguments {
            if let Some(default_value) = &arg.default_value {
                out.push_str(&format!(
                    "  vars.{}_{} = \"{}\"\n",
                    name,
                    arg.var,
                    escape_string(default_value)
                ));
            }
        }

        out.push_str("}\n");
        Ok(out)
    }
}

fn escape_string(s: &str) -> String {
    ["\"", "$"]
        .iter()
        .fold(s.to_string(), |acc, c| acc.replace(c, &format!("\\{}", c)))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandDescriptionFromError {
    #[error("missing short option for argument {0:?}")]
    MissingShortArgument(String),
}

impl TryFrom<&clap::Command> for CommandDescription {
    type Error = CommandDescriptionFromError;

    fn try_from(cmd: &clap::Command) -> Result<Self, Self::Error> {
        let mut arguments = Vec::new();

        for arg in cmd.get_arguments() {
            let id = arg.get_id().as_str();
            if matches!(id, "help" | "version") {
                continue;
            }

            let is_positional = arg.is_positional();
            let key = if is_positional {
                id.to_owned()
            } else {
                let short = arg
                    .get_short()
                    .ok_or_else(|| CommandDescriptionFromError::MissingShortArgument(id.to_owned()))?;
                format!("-{short}")
            };

            let description = arg.get_help().map(|s| s.to_string());
            let is_flag = matches!(arg.get_action(), ArgAction::SetTrue);

            let default_value = if is_flag {
                None
            } else {
                arg.get_default_values()
                    .first()
                    .and_then(|v| v.to_str())
                    .map(|s| s.to_string())
            };

            arguments.push(ArgumentDescription {
                key,
                var: id.replace('-', "_"),
                description,
                is_flag,
                is_positional,
                default_value,
            });
        }

        Ok(CommandDescription { arguments })
    }
}

/// Print the Icinga command configuration if the GENERATE_ICINGA_COMMAND environment variable is set
/// and exit the process.
pub fn print_icinga_command_config_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), ToIcingaCommandError> {
    if std::env::var_os("GENERATE_ICINGA_COMMAND").is_none() {
        return Ok(());
    }

    let description = CommandDescription::try_from(cmd)?;
    let out = description.to_icinga_command(name)?;

    println!("{}", out.trim());
    std::process::exit(0);
}
