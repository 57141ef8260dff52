use std::time::Duration;

use reqwest::blocking::{Client, Request, Response};
use reqwest::header::HeaderMap;

use crate::{Config, Error, QueryRequest};

/// The raw answer of the agent. The body is already read completely.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs the single GET of a run.
pub trait Transport {
    fn get(&self, request: &QueryRequest, password: &str) -> Result<Exchange, Error>;
}

pub struct HttpTransport {
    client: Client,
    verbose: bool,
}

impl HttpTransport {
    /// Builds a client with the configured timeout applied to the whole request as well as to
    /// connection setup including the TLS handshake. Proxies from the environment are ignored.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .danger_accept_invalid_certs(config.insecure)
            .no_proxy()
            .build()
            .map_err(Error::Client)?;

        Ok(HttpTransport {
            client,
            verbose: config.verbose,
        })
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &QueryRequest, password: &str) -> Result<Exchange, Error> {
        let req = self
            .client
            .get(request.url().clone())
            .header("password", password)
            .build()
            .map_err(Error::Request)?;

        if self.verbose {
            println!("REQUEST:\n{:?}", dump_request(&req));
        }

        log::debug!("GET {}", req.url());
        let res = self.client.execute(req).map_err(Error::Transport)?;
        let exchange = read_response(res, self.verbose)?;

        if !(200..300).contains(&exchange.status) {
            log::warn!("agent answered with HTTP status {}", exchange.status);
        }

        Ok(exchange)
    }
}

/// Consumes the response. The body is dropped together with the response on every path.
fn read_response(res: Response, verbose: bool) -> Result<Exchange, Error> {
    let status = res.status();
    let head = format!(
        "{:?} {}\r\n{}\r\n",
        res.version(),
        status,
        dump_headers(res.headers())
    );
    let body = res.bytes().map_err(Error::Transport)?.to_vec();

    if verbose {
        println!(
            "RESPONSE:\n{:?}",
            format!("{}{}", head, String::from_utf8_lossy(&body))
        );
    }

    Ok(Exchange {
        status: status.as_u16(),
        body,
    })
}

/// Serializes the request the way it goes on the wire, minus the headers added by the
/// connection itself.
pub fn dump_request(req: &Request) -> String {
    let url = req.url();
    let mut target = url.path().to_owned();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_owned(),
        (None, _) => String::new(),
    };

    format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\n{}\r\n",
        req.method(),
        target,
        host,
        dump_headers(req.headers())
    )
}

fn dump_headers(headers: &HeaderMap) -> String {
    let mut s = String::new();
    for (name, value) in headers {
        s.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    s
}

pub(crate) fn timeout_from_secs(secs: u64) -> Option<Duration> {
    match secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    }
}
