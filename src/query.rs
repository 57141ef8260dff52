//! The JSON document returned by the `/query/<command>` endpoint of the agent.
//!
//! Missing keys and `null` values fall back to empty defaults, except for the numeric fields of
//! [IntValue] which stay `None` so an absent threshold is never mistaken for a zero one.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    #[serde(deserialize_with = "nullable")]
    pub header: Header,
    #[serde(deserialize_with = "nullable")]
    pub payload: Vec<Payload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Header {
    #[serde(deserialize_with = "nullable")]
    pub source_id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Payload {
    #[serde(deserialize_with = "nullable")]
    pub command: String,
    #[serde(deserialize_with = "nullable")]
    pub lines: Vec<Line>,
    #[serde(deserialize_with = "nullable")]
    pub result: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Line {
    #[serde(deserialize_with = "nullable")]
    pub message: String,
    #[serde(deserialize_with = "nullable")]
    pub perf: Vec<Perf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Perf {
    #[serde(deserialize_with = "nullable")]
    pub alias: String,
    #[serde(deserialize_with = "nullable")]
    pub int_value: IntValue,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IntValue {
    pub value: Option<f64>,
    pub unit: Option<String>,
    pub warning: Option<f64>,
    pub critical: Option<f64>,
    /// The agent spells this key `mininum`; a `minimum` key is ignored.
    #[serde(rename = "mininum")]
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

impl QueryResponse {
    /// Decodes the first JSON value of the response body; anything after it is not read.
    ///
    /// A body that is not a query response decodes to the empty response; the decode error is
    /// only logged. Callers then see an empty payload.
    pub fn from_slice(body: &[u8]) -> Self {
        match serde_json::Deserializer::from_slice(body)
            .into_iter::<QueryResponse>()
            .next()
        {
            Some(Ok(response)) => response,
            Some(Err(e)) => {
                log::warn!("failed to decode query response: {}", e);
                QueryResponse::default()
            }
            None => {
                log::warn!("query response body is empty");
                QueryResponse::default()
            }
        }
    }

    /// Only the first payload entry is ever consulted.
    pub fn first_payload(&self) -> Option<&Payload> {
        self.payload.first()
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
