//! Blocking execution of `HttpRequest` values.
//!
//! `Transport` is the seam between the pure client and the network. The
//! production implementation wraps a ureq agent configured to hand back
//! every status as data, so status interpretation stays in `EsaClient`.

use crate::error::EsaError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP round trip.
///
/// Implementations must release the connection before returning, on both
/// success and error paths. Only a 200 body is ever decoded, so others may
/// be left empty.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, EsaError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, EsaError> {
        (**self).execute(request)
    }
}

/// `Transport` backed by a shared `ureq::Agent`.
///
/// Timeouts are whatever the agent is configured with; none are imposed
/// here.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, EsaError> {
        let mut response = match request.method {
            HttpMethod::Get => self.agent.get(&request.url).call(),
        }
        .map_err(|e| EsaError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            // Dropping the response releases the connection unread.
            return Ok(HttpResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| EsaError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
