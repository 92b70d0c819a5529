//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `EsaClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` (or any other host) performs the actual exchange. The API is
//! read-only, so GET is the only method.

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the access token and any encoded
/// query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpRequest {
    pub fn get(url: String) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
        }
    }

    /// The request URL with the `access_token` value masked, for logging.
    pub fn redacted_url(&self) -> String {
        redact_token(&self.url)
    }
}

fn redact_token(url: &str) -> String {
    const KEY: &str = "access_token=";
    let Some(start) = url.find(KEY).map(|i| i + KEY.len()) else {
        return url.to_string();
    };
    let end = url[start..].find('&').map_or(url.len(), |i| start + i);
    format!("{}***{}", &url[..start], &url[end..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_token_in_middle() {
        let req = HttpRequest::get("https://api.esa.io/v1/teams?access_token=secret&q=".into());
        assert_eq!(req.redacted_url(), "https://api.esa.io/v1/teams?access_token=***&q=");
    }

    #[test]
    fn redacts_token_at_end() {
        let req = HttpRequest::get("https://api.esa.io/v1/teams?access_token=secret".into());
        assert_eq!(req.redacted_url(), "https://api.esa.io/v1/teams?access_token=***");
    }

    #[test]
    fn leaves_url_without_token() {
        let req = HttpRequest::get("http://localhost/v1/teams".into());
        assert_eq!(req.redacted_url(), "http://localhost/v1/teams");
    }
}
