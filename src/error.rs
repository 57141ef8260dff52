/// Everything that ends a run with an UNKNOWN state. The display text is what follows
/// `UNKNOWN: ` in the plugin output.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing required -{0} argument")]
    MissingArgument(char),
    #[error("parse {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("parse {0:?}: cannot be used as a base URL")]
    NotABaseUrl(String),
    #[error("{0}")]
    Client(#[source] reqwest::Error),
    #[error("{0}")]
    Request(#[source] reqwest::Error),
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    #[error("The resultpayload size is 0")]
    EmptyPayload,
}
