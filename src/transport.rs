//! The HTTP GET collaborator used by [crate::Client]
use crate::TransportError;
use bytes::Bytes;

/// Fetches the body at an url
///
/// Implementations decide about timeouts and TLS. A non 2xx HTTP status must still
/// return the body: the API reports its errors inside the JSON envelope.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Bytes, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<Bytes, TransportError>,
{
    fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        self(url)
    }
}

/// Blocking transport backed by reqwest
///
/// The library must be built with the read-url feature
#[cfg(feature = "read-url")]
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "read-url")]
impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an already configured client (timeouts, proxy, user agent...)
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        HttpTransport { client }
    }
}

#[cfg(feature = "read-url")]
impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        let res = self.client.get(url).send()?;
        log::debug!("{} answered HTTP {}", res.url().path(), res.status());
        Ok(res.bytes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_transport() {
        let transport = |url: &str| -> Result<Bytes, TransportError> {
            if url.starts_with("http://") {
                Ok(Bytes::from_static(b"{}"))
            } else {
                Err(format!("unsupported url {}", url).into())
            }
        };
        assert_eq!(&b"{}"[..], &transport.get("http://localhost/x.json").unwrap()[..]);
        assert_eq!(
            "unsupported url ftp://x",
            transport.get("ftp://x").unwrap_err().to_string()
        );
    }
}
