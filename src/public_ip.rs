use std::io::{self, Write};
use std::sync::Mutex;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::LookupError;

/// Default address used to retrieve the public IP of this machine.
pub const IP_LOOKUP_ENDPOINT: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Resolves the public IP of the machine this process runs on through an
/// external lookup service, and announces where the process is listening.
///
/// Every lookup is a fresh round trip to the configured endpoint; nothing is
/// cached or retried. A shared reporter is safe to call from multiple tasks.
pub struct PublicIpReporter {
    client: reqwest::Client,
    endpoint: String,
    sink: Mutex<Box<dyn Write + Send>>,
}

pub struct PublicIpReporterBuilder {
    client: Option<reqwest::Client>,
    endpoint: Option<String>,
    sink: Option<Box<dyn Write + Send>>,
}

impl PublicIpReporterBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            endpoint: None,
            sink: None,
        }
    }

    /// Use a caller-supplied HTTP client instead of a fresh default one.
    /// Timeouts and proxies configured on the client apply to every lookup.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Point the reporter at a different lookup service. The endpoint must
    /// answer GET with a JSON body of the shape `{"ip": "<address>"}`.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Write the listening line to `sink` instead of stderr.
    pub fn log_to(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> PublicIpReporter {
        PublicIpReporter {
            client: self.client.unwrap_or_default(),
            endpoint: self
                .endpoint
                .unwrap_or_else(|| IP_LOOKUP_ENDPOINT.to_string()),
            sink: Mutex::new(self.sink.unwrap_or_else(|| Box::new(io::stderr()))),
        }
    }
}

impl Default for PublicIpReporterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PublicIpReporter {
    /// Reporter with the default client, endpoint and stderr sink.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PublicIpReporterBuilder {
        PublicIpReporterBuilder::new()
    }

    /// Resolve the public IP address by querying the lookup service.
    ///
    /// Returns the `ip` field of the service's JSON body, untouched.
    pub async fn resolve_ip(&self) -> Result<String, LookupError> {
        let res = self.client.get(&self.endpoint).send().await.map_err(|err| {
            if err.is_builder() {
                LookupError::RequestBuild(err)
            } else {
                LookupError::Transport(err)
            }
        })?;

        let body = res.bytes().await.map_err(LookupError::Transport)?;
        if body.is_empty() {
            return Err(LookupError::EmptyResponse);
        }

        let parsed: IpResponse = serde_json::from_slice(&body).map_err(LookupError::Decode)?;
        debug!("resolved public ip {}", parsed.ip);
        Ok(parsed.ip)
    }

    /// Resolve the public IP and write a `Listening on <ip>[:<port>]` line
    /// to the configured sink. A `port` of 0 omits the suffix.
    pub async fn log_listening(&self, port: u16) -> Result<(), LookupError> {
        let ip = self.resolve_ip().await?;
        let line = format_listening(&ip, port);

        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(err) = writeln!(sink, "{line}") {
            warn!("failed to write listening line: {err}");
        }
        Ok(())
    }
}

impl Default for PublicIpReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the public IP address of the current machine.
pub async fn get_public_ip() -> Result<String, LookupError> {
    PublicIpReporter::new().resolve_ip().await
}

fn format_listening(ip: &str, port: u16) -> String {
    // Lookup services sometimes hand back a trailing newline
    let ip = ip.trim_end_matches(['\n', '\r']);
    if port == 0 {
        format!("Listening on {ip}")
    } else {
        format!("Listening on {ip}:{port}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listening_with_port() {
        let result = format_listening("203.0.113.5", 8080);
        assert_eq!(result, "Listening on 203.0.113.5:8080");
    }

    #[test]
    fn test_format_listening_without_port() {
        let result = format_listening("203.0.113.5", 0);
        assert_eq!(result, "Listening on 203.0.113.5");
    }

    #[test]
    fn test_format_listening_trims_trailing_newline() {
        assert_eq!(
            format_listening("203.0.113.5\n", 8080),
            "Listening on 203.0.113.5:8080"
        );
        assert_eq!(
            format_listening("203.0.113.5\r\n", 0),
            "Listening on 203.0.113.5"
        );
    }
}
