use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

pub const DEFAULT_TOKEN: &str = "test-token";

const DEFAULT_PER_PAGE: usize = 20;
const MAX_PER_PAGE: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub privacy: String,
    pub description: String,
    pub icon: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub screen_name: String,
    pub icon: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Post {
    pub number: u64,
    pub name: String,
    pub full_name: String,
    pub category: Option<String>,
    pub wip: bool,
    pub body_md: String,
    pub body_html: String,
    pub message: String,
    pub tags: Vec<String>,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: Author,
    pub updated_by: Author,
    pub revision_number: u64,
}

/// Fixed dataset served by the router.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub token: String,
    pub teams: Vec<Team>,
    /// `(team name, post)` pairs.
    pub posts: Vec<(String, Post)>,
}

#[derive(Serialize)]
struct Page<T: Serialize> {
    #[serde(flatten)]
    items: T,
    prev_page: Option<usize>,
    next_page: Option<usize>,
    total_count: usize,
    page: usize,
    per_page: usize,
    max_per_page: usize,
}

type Db = Arc<Dataset>;

pub fn app() -> Router {
    app_with(Dataset::sample())
}

pub fn app_with(data: Dataset) -> Router {
    Router::new()
        .route("/v1/teams", get(list_teams))
        .route("/v1/teams/{team}/posts", get(list_posts))
        .route("/v1/teams/{team}/posts/{number}", get(get_post))
        .with_state(Arc::new(data))
}

pub async fn run_with(listener: TcpListener, data: Dataset) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(data)).await
}

impl Dataset {
    /// Two teams; `docs` holds four posts, `ops` holds none.
    pub fn sample() -> Self {
        Self::sample_with_token(DEFAULT_TOKEN)
    }

    pub fn sample_with_token(token: &str) -> Self {
        let team = |name: &str, privacy: &str| Team {
            name: name.to_string(),
            privacy: privacy.to_string(),
            description: format!("{name} team"),
            icon: format!("https://img.esa.io/{name}.png"),
            url: format!("https://{name}.esa.io/"),
        };
        let alice = Author {
            name: "Alice".to_string(),
            screen_name: "alice".to_string(),
            icon: "https://img.esa.io/alice.png".to_string(),
        };
        let post = |number: u64, name: &str, category: Option<&str>, tags: &[&str], wip: bool| {
            let full_name = match category {
                Some(c) => format!("{c}/{name}"),
                None => name.to_string(),
            };
            Post {
                number,
                name: name.to_string(),
                full_name,
                category: category.map(str::to_string),
                wip,
                body_md: format!("# {name}\nbody of post {number}"),
                body_html: format!("<h1>{name}</h1>\n<p>body of post {number}</p>"),
                message: "Update post.".to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                url: format!("https://docs.esa.io/posts/{number}"),
                created_at: "2024-01-01T09:00:00+09:00".to_string(),
                updated_at: "2024-01-02T09:00:00+09:00".to_string(),
                created_by: alice.clone(),
                updated_by: alice.clone(),
                revision_number: 1,
            }
        };
        Self {
            token: token.to_string(),
            teams: vec![team("docs", "closed"), team("ops", "open")],
            posts: vec![
                ("docs".to_string(), post(1, "Hello", None, &[], false)),
                ("docs".to_string(), post(2, "Deploy guide", Some("dev/ops"), &["deploy", "ops"], false)),
                ("docs".to_string(), post(3, "Rust notes", Some("dev/lang"), &["rust"], true)),
                ("docs".to_string(), post(4, "Rollback", Some("dev/ops"), &["deploy"], false)),
            ],
        }
    }

    fn has_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t.name == team)
    }

    fn posts_of<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a Post> + 'a {
        self.posts
            .iter()
            .filter(move |(t, _)| t == team)
            .map(|(_, p)| p)
    }
}

fn error(status: StatusCode, code: &str) -> Response {
    let body = json!({ "error": code, "message": status.canonical_reason().unwrap_or("") });
    (status, Json(body)).into_response()
}

fn first<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

fn authorize(db: &Dataset, params: &[(String, String)]) -> Result<(), Response> {
    match first(params, "access_token") {
        Some(token) if token == db.token => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "unauthorized")),
    }
}

fn paginate<T: Clone>(
    items: &[T],
    params: &[(String, String)],
) -> Result<(Vec<T>, usize, usize, Option<usize>, Option<usize>), Response> {
    let parse = |key: &str, default: usize| match first(params, key) {
        None | Some("") => Ok(default),
        Some(v) => v
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "bad_request")),
    };
    let page = parse("page", 1)?;
    let per_page = parse("per_page", DEFAULT_PER_PAGE)?.min(MAX_PER_PAGE);

    let start = (page - 1).saturating_mul(per_page);
    let slice: Vec<T> = items.iter().skip(start).take(per_page).cloned().collect();
    let prev = (page > 1).then(|| page - 1);
    let next = (start.saturating_add(per_page) < items.len()).then(|| page + 1);
    Ok((slice, page, per_page, prev, next))
}

async fn list_teams(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, Response> {
    authorize(&db, &params)?;
    let (teams, page, per_page, prev_page, next_page) = paginate(&db.teams, &params)?;
    Ok(Json(Page {
        items: json!({ "teams": teams }),
        prev_page,
        next_page,
        total_count: db.teams.len(),
        page,
        per_page,
        max_per_page: MAX_PER_PAGE,
    })
    .into_response())
}

async fn list_posts(
    State(db): State<Db>,
    Path(team): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, Response> {
    authorize(&db, &params)?;
    if !db.has_team(&team) {
        return Err(error(StatusCode::NOT_FOUND, "not_found"));
    }

    let tokens: Vec<&str> = params
        .iter()
        .filter(|(k, _)| k == "q")
        .flat_map(|(_, v)| v.split_whitespace())
        .collect();
    let matched: Vec<Post> = db
        .posts_of(&team)
        .filter(|post| tokens.iter().all(|token| matches_token(post, token)))
        .cloned()
        .collect();

    let (posts, page, per_page, prev_page, next_page) = paginate(&matched, &params)?;
    Ok(Json(Page {
        items: json!({ "posts": posts }),
        prev_page,
        next_page,
        total_count: matched.len(),
        page,
        per_page,
        max_per_page: MAX_PER_PAGE,
    })
    .into_response())
}

async fn get_post(
    State(db): State<Db>,
    Path((team, number)): Path<(String, u64)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Post>, Response> {
    authorize(&db, &params)?;
    db.posts_of(&team)
        .find(|p| p.number == number)
        .cloned()
        .map(Json)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not_found"))
}

/// Subset of the esa search syntax: `tag:`, `wip:`, `category:` and bare
/// words. Other qualifiers match everything.
fn matches_token(post: &Post, token: &str) -> bool {
    match token.split_once(':') {
        Some(("tag", tag)) => post.tags.iter().any(|t| t == tag),
        Some(("wip", wip)) => wip.parse::<bool>().map_or(true, |w| post.wip == w),
        Some(("category", prefix)) => post
            .category
            .as_deref()
            .is_some_and(|c| c.starts_with(prefix)),
        Some(_) => true,
        None => post.name.contains(token) || post.body_md.contains(token),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(number: u64) -> Post {
        Dataset::sample()
            .posts
            .into_iter()
            .map(|(_, p)| p)
            .find(|p| p.number == number)
            .unwrap()
    }

    #[test]
    fn post_serializes_null_category() {
        let json = serde_json::to_value(sample_post(1)).unwrap();
        assert_eq!(json["number"], 1);
        assert!(json["category"].is_null());
        assert_eq!(json["tags"], serde_json::json!([]));
    }

    #[test]
    fn tag_token_matches() {
        let post = sample_post(2);
        assert!(matches_token(&post, "tag:deploy"));
        assert!(!matches_token(&post, "tag:rust"));
    }

    #[test]
    fn wip_and_category_tokens() {
        let post = sample_post(3);
        assert!(matches_token(&post, "wip:true"));
        assert!(!matches_token(&post, "wip:false"));
        assert!(matches_token(&post, "category:dev"));
        assert!(!matches_token(&post, "category:ops"));
        assert!(!matches_token(&sample_post(1), "category:dev"));
    }

    #[test]
    fn bare_word_and_unknown_qualifier() {
        let post = sample_post(3);
        assert!(matches_token(&post, "Rust"));
        assert!(!matches_token(&post, "Python"));
        assert!(matches_token(&post, "user:bob"));
    }

    #[test]
    fn paginate_reports_cursors() {
        let items: Vec<u32> = (1..=5).collect();
        let params = vec![
            ("page".to_string(), "2".to_string()),
            ("per_page".to_string(), "2".to_string()),
        ];
        let (slice, page, per_page, prev, next) = paginate(&items, &params).unwrap();
        assert_eq!(slice, vec![3, 4]);
        assert_eq!((page, per_page), (2, 2));
        assert_eq!(prev, Some(1));
        assert_eq!(next, Some(3));
    }

    #[test]
    fn paginate_last_page_has_no_next() {
        let items: Vec<u32> = (1..=5).collect();
        let params = vec![
            ("page".to_string(), "3".to_string()),
            ("per_page".to_string(), "2".to_string()),
        ];
        let (slice, _, _, _, next) = paginate(&items, &params).unwrap();
        assert_eq!(slice, vec![5]);
        assert_eq!(next, None);
    }

    #[test]
    fn paginate_rejects_zero_page() {
        let params = vec![("page".to_string(), "0".to_string())];
        assert!(paginate(&[1u32], &params).is_err());
    }
}
