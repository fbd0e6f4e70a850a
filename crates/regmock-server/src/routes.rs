//! HTTP route handlers.
//!
//! Each request flows parse → match → serialize against the shared
//! read-only dataset; there is no cross-request state. Success bodies
//! are JSON; error bodies are plain text because the consuming test
//! suites substring-match them.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use regmock_common::types::{Catalog, SearchRecord, TagsList};

use crate::dataset::RegistryDataset;
use crate::query::{apply_result_limit, find_best_match, paginate_tags, parse_limit};

/// Builds the router serving the v1 search and v2 catalog/tags APIs.
pub fn router(dataset: Arc<RegistryDataset>) -> Router {
    Router::new()
        .route("/v1/search", get(v1_search))
        .route("/v2/", get(v2_root))
        .route("/v2/*path", get(v2_dispatch))
        .with_state(dataset)
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
    n: Option<String>,
}

/// Legacy v1 search endpoint.
///
/// `n` is optional, but when present it must parse as an integer or the
/// request is rejected with 400. A non-positive value is accepted and
/// ignored, matching the registry being emulated.
async fn v1_search(
    State(dataset): State<Arc<RegistryDataset>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();

    let limit = match params.n.as_deref() {
        None => None,
        Some(raw) => {
            let Ok(n) = raw.parse::<i64>() else {
                tracing::debug!(n = raw, "rejecting unparsable search limit");
                return (StatusCode::BAD_REQUEST, "Invalid limit parameter").into_response();
            };
            usize::try_from(n).ok().filter(|limit| *limit > 0)
        }
    };

    tracing::debug!(query = %query, limit = ?limit, "v1 search");

    match find_best_match(&dataset, &query) {
        Some(record) => Json(apply_result_limit(record, limit)).into_response(),
        // No match is a normal outcome: a zero-result payload echoing
        // the query, not an error.
        None => Json(SearchRecord::empty(query)).into_response(),
    }
}

async fn v2_root() -> Response {
    Json(json!({})).into_response()
}

#[derive(Debug, Deserialize)]
struct TagsParams {
    n: Option<String>,
    last: Option<String>,
}

/// Dispatches everything under `/v2/` that is not the bare root:
/// the catalog, tags lists, and the empty-object fallback for
/// endpoints the mock does not emulate.
async fn v2_dispatch(
    State(dataset): State<Arc<RegistryDataset>>,
    Path(path): Path<String>,
    Query(params): Query<TagsParams>,
) -> Response {
    if path == "_catalog" {
        return catalog(&dataset);
    }

    if path == "tags/list" || path.ends_with("/tags/list") {
        return match parse_repository_path(&path) {
            Some(repository) => tags_list(&dataset, repository, &params),
            None => (StatusCode::BAD_REQUEST, "Invalid tags list path").into_response(),
        };
    }

    Json(json!({})).into_response()
}

/// Recovers the repository name from the path segments between the v2
/// prefix and the trailing `tags/list` marker. Repository names may
/// themselves contain slashes.
fn parse_repository_path(path: &str) -> Option<&str> {
    if path == "tags/list" {
        return Some("");
    }
    path.strip_suffix("/tags/list")
}

fn tags_list(dataset: &RegistryDataset, repository: &str, params: &TagsParams) -> Response {
    let Some(tags) = dataset.tags(repository) else {
        tracing::debug!(repository, "tags list for unknown repository");
        return (
            StatusCode::NOT_FOUND,
            format!("repository {repository} not found"),
        )
            .into_response();
    };

    // Both parameters are tolerated when malformed, unlike the search
    // route's strict limit check.
    let limit = params.n.as_deref().and_then(parse_limit);
    let last = params.last.as_deref().unwrap_or_default();

    tracing::debug!(repository, limit = ?limit, last, "v2 tags list");

    let page = paginate_tags(dataset.continuations(), repository, tags, limit, last);
    Json(TagsList {
        name: repository.to_string(),
        tags: page.to_vec(),
    })
    .into_response()
}

fn catalog(dataset: &RegistryDataset) -> Response {
    Json(Catalog {
        repositories: dataset.repositories(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_path_with_nested_name_is_recovered() {
        assert_eq!(
            parse_repository_path("libpod/alpine/tags/list"),
            Some("libpod/alpine")
        );
        assert_eq!(
            parse_repository_path("a/b/c/tags/list"),
            Some("a/b/c")
        );
    }

    #[test]
    fn repository_path_without_repository_is_empty() {
        assert_eq!(parse_repository_path("tags/list"), Some(""));
    }

    #[test]
    fn repository_path_with_mangled_marker_is_rejected() {
        assert_eq!(parse_repository_path("xtags/list"), None);
    }
}
