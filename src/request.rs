use url::Url;

use crate::Error;

/// The GET request sent to the agent, built from the base URL and the positional arguments.
///
/// * no arguments: `<base>/`, only checks that the agent answers
/// * `<command>`: `<base>/query/<command>`
/// * `<command> key=value key ...`: the same path with the remaining arguments as query
///   parameters, sorted by key
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    url: Url,
    command: Option<String>,
}

impl QueryRequest {
    pub fn new(base: &str, args: &[String]) -> Result<Self, Error> {
        let mut url = Url::parse(base).map_err(|source| Error::InvalidUrl {
            url: base.to_owned(),
            source,
        })?;

        let command = args.first().cloned();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::NotABaseUrl(base.to_owned()))?;
            segments.pop_if_empty();
            match &command {
                Some(command) => {
                    segments.push("query").push(command);
                }
                None => {
                    segments.push("");
                }
            }
        }

        if args.len() > 1 {
            let mut parameters: Vec<(&str, &str)> =
                args[1..].iter().map(|a| parse_parameter(a)).collect();
            parameters.sort_by(|a, b| a.0.cmp(b.0));

            url.set_query(None);
            url.query_pairs_mut().extend_pairs(parameters);
        }

        Ok(QueryRequest { url, command })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// True when no command was given and the request only probes the agent.
    pub fn is_probe(&self) -> bool {
        self.command.is_none()
    }
}

/// Splits a `key=value` argument on the first `=`. A bare `key` gets an empty value.
pub fn parse_parameter(arg: &str) -> (&str, &str) {
    arg.split_once('=').unwrap_or((arg, ""))
}
