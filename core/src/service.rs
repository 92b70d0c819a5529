//! Network-backed services: `Esa` pairs an `EsaClient` with a `Transport`
//! and exposes the team and post read operations as single round trips.

use crate::client::EsaClient;
use crate::config::ClientConfig;
use crate::error::EsaError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::FilterMap;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Post, PostPage, TeamPage};

/// esa API client bound to a transport.
///
/// Holds no per-call state, so a shared reference can serve concurrent
/// callers when `T` is `Sync`.
#[derive(Clone)]
pub struct Esa<T = UreqTransport> {
    client: EsaClient,
    transport: T,
}

impl Esa<UreqTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(EsaClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> Esa<T> {
    pub fn new(client: EsaClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Execute `request` and hand the response to `parse`. Transport errors
    /// are returned before `parse` runs.
    pub fn send<R>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(&EsaClient, HttpResponse) -> Result<R, EsaError>,
    ) -> Result<R, EsaError> {
        tracing::debug!(url = %request.redacted_url(), "GET");
        let response = self.transport.execute(&request)?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "response");
        parse(&self.client, response)
    }

    pub fn teams(&self) -> TeamService<'_, T> {
        TeamService { esa: self }
    }

    pub fn posts(&self) -> PostService<'_, T> {
        PostService { esa: self }
    }
}

/// Team endpoints.
pub struct TeamService<'a, T> {
    esa: &'a Esa<T>,
}

impl<T: Transport> TeamService<'_, T> {
    pub fn list_teams(&self) -> Result<TeamPage, EsaError> {
        let request = self.esa.client.build_list_teams();
        self.esa.send(request, EsaClient::parse_list_teams)
    }
}

/// Post endpoints.
pub struct PostService<'a, T> {
    esa: &'a Esa<T>,
}

impl<T: Transport> PostService<'_, T> {
    pub fn get_post(&self, team: &str, number: u64) -> Result<Post, EsaError> {
        let request = self.esa.client.build_get_post(team, number);
        self.esa.send(request, EsaClient::parse_get_post)
    }

    /// One page of posts matching `filters`. Further pages are fetched by
    /// calling again with `filters.for_page(cursor)`.
    pub fn list_posts(&self, team: &str, filters: &FilterMap) -> Result<PostPage, EsaError> {
        let request = self.esa.client.build_list_posts(team, filters);
        self.esa.send(request, EsaClient::parse_list_posts)
    }
}
