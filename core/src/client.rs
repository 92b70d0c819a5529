//! Stateless HTTP request builder and response parser for the esa API.
//!
//! # Design
//! `EsaClient` holds only the base URL and access token and carries no
//! mutable state between calls. Each read operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The round trip in between belongs to a
//! `Transport` (see `Esa`) or to whatever host embeds this crate.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::EsaError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{translate, FilterMap};
use crate::types::{Post, PostPage, TeamPage};

pub const TEAMS_PATH: &str = "/v1/teams";

/// Synchronous, stateless client for the esa read API.
#[derive(Debug, Clone)]
pub struct EsaClient {
    base_url: String,
    access_token: String,
}

impl EsaClient {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.access_token)
    }

    /// `{base}{path}?access_token={token}` followed by `&` and the encoded
    /// `query` pairs when there are any. The token is not escaped.
    pub fn build_url(&self, path: &str, query: &[(String, String)]) -> String {
        let mut url = format!("{}{path}?access_token={}", self.base_url, self.access_token);
        let encoded = encode_query(query);
        if !encoded.is_empty() {
            url.push('&');
            url.push_str(&encoded);
        }
        url
    }

    pub fn build_list_teams(&self) -> HttpRequest {
        HttpRequest::get(self.build_url(TEAMS_PATH, &[]))
    }

    /// `number` is forwarded as-is; the server rejects posts that do not exist.
    pub fn build_get_post(&self, team: &str, number: u64) -> HttpRequest {
        HttpRequest::get(self.build_url(&post_path(team, number), &[]))
    }

    pub fn build_list_posts(&self, team: &str, filters: &FilterMap) -> HttpRequest {
        let query = translate(filters).into_pairs();
        HttpRequest::get(self.build_url(&posts_path(team), &query))
    }

    pub fn parse_list_teams(&self, response: HttpResponse) -> Result<TeamPage, EsaError> {
        parse_json(response)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Post, EsaError> {
        parse_json(response)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<PostPage, EsaError> {
        parse_json(response)
    }
}

fn posts_path(team: &str) -> String {
    format!("{TEAMS_PATH}/{team}/posts")
}

fn post_path(team: &str, number: u64) -> String {
    format!("{TEAMS_PATH}/{team}/posts/{number}")
}

fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Require exactly 200, then decode the body. The body of any other status
/// is dropped.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, EsaError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| {
        tracing::warn!(error = %e, "response body did not match expected schema");
        EsaError::Decode(e.to_string())
    })
}

fn check_status(response: &HttpResponse) -> Result<(), EsaError> {
    if response.status == 200 {
        return Ok(());
    }
    tracing::warn!(status = response.status, "unexpected response status");
    Err(EsaError::from_status(response.status))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EsaClient {
        EsaClient::new("http://localhost:3000", "tok")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn build_url_without_query() {
        assert_eq!(
            client().build_url("/v1/teams", &[]),
            "http://localhost:3000/v1/teams?access_token=tok"
        );
    }

    #[test]
    fn build_url_encodes_query_values() {
        let query = vec![
            ("page".to_string(), "2".to_string()),
            ("q".to_string(), "tag:a in:dev/ops".to_string()),
        ];
        assert_eq!(
            client().build_url("/v1/teams/x/posts", &query),
            "http://localhost:3000/v1/teams/x/posts?access_token=tok&page=2&q=tag%3Aa%20in%3Adev%2Fops"
        );
    }

    #[test]
    fn build_url_does_not_escape_token() {
        let client = EsaClient::new("http://h", "a%2Bb");
        assert_eq!(client.build_url("/p", &[]), "http://h/p?access_token=a%2Bb");
    }

    #[test]
    fn build_list_teams_produces_correct_request() {
        let req = client().build_list_teams();
        assert_eq!(req.method, crate::http::HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/v1/teams?access_token=tok");
    }

    #[test]
    fn build_get_post_produces_correct_request() {
        let req = client().build_get_post("myteam", 42);
        assert_eq!(req.url, "http://localhost:3000/v1/teams/myteam/posts/42?access_token=tok");
    }

    #[test]
    fn build_list_posts_always_sends_q() {
        let req = client().build_list_posts("myteam", &FilterMap::new());
        assert_eq!(req.url, "http://localhost:3000/v1/teams/myteam/posts?access_token=tok&q=");
    }

    #[test]
    fn build_list_posts_translates_filters() {
        let filters = FilterMap::new()
            .with("tag", "a")
            .with("page", "2")
            .with("", "free");
        let req = client().build_list_posts("myteam", &filters);
        assert_eq!(
            req.url,
            "http://localhost:3000/v1/teams/myteam/posts?access_token=tok&page=2&q=tag%3Aa%20free"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = EsaClient::new("http://localhost:3000/", "tok");
        assert_eq!(
            client.build_list_teams().url,
            "http://localhost:3000/v1/teams?access_token=tok"
        );
    }

    #[test]
    fn parse_get_post_success() {
        let post = client().parse_get_post(ok(r#"{"number":42,"name":"Hello"}"#)).unwrap();
        assert_eq!(post.number, 42);
        assert_eq!(post.name, "Hello");
        assert_eq!(post.body_md, "");
        assert!(post.tags.is_empty());
    }

    #[test]
    fn parse_non_200_is_status_error_regardless_of_body() {
        for status in [201, 204, 301, 401, 404, 500] {
            let response = HttpResponse {
                status,
                body: br#"{"number":1}"#.to_vec(),
            };
            let err = client().parse_get_post(response).unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn parse_not_found_reason() {
        let response = HttpResponse {
            status: 404,
            body: br#"{"error":"not_found"}"#.to_vec(),
        };
        let err = client().parse_list_posts(response).unwrap_err();
        assert!(matches!(
            err,
            EsaError::HttpStatus { status: 404, ref reason } if reason == "Not Found"
        ));
    }

    #[test]
    fn parse_list_teams_bad_json() {
        let err = client().parse_list_teams(ok("not json")).unwrap_err();
        assert!(matches!(err, EsaError::Decode(_)));
    }

    #[test]
    fn parse_list_posts_success() {
        let page = client()
            .parse_list_posts(ok(
                r#"{"posts":[{"number":1,"tags":["a"]},{"number":2}],"prev_page":null,"next_page":null,"total_count":2}"#,
            ))
            .unwrap();
        assert_eq!(page.posts.len(), 2);
        assert_eq!(page.posts[0].tags, vec!["a"]);
        assert_eq!(page.total_count, 2);
        assert!(!page.has_next_page());
    }
}
