//! Wire payload types served by the mock registry.
//!
//! The v1 search API has grown two incompatible result shapes over its
//! lifetime; both appear in the fixture data and both are modeled here as
//! explicit variants so a mis-shaped fixture fails to construct instead of
//! silently mis-serializing.

use serde::{Deserialize, Serialize};

/// One canned result set for a v1 search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Query string echoed back to the client.
    pub query: String,
    /// Advertised result count. May disagree with `results.len()` in the
    /// fixtures; after truncation it always equals the returned length.
    pub num_results: usize,
    /// Total page count, present only for paginated fixtures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<u32>,
    /// Current page number, present only for paginated fixtures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size, present only for paginated fixtures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Ordered result entries.
    pub results: Vec<RepositoryHit>,
}

impl SearchRecord {
    /// Builds the well-formed zero-result record the search route returns
    /// when no fixture matches a query. The query is echoed back even on
    /// empty results, as real registries do.
    #[must_use]
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            num_results: 0,
            num_pages: None,
            page: None,
            page_size: None,
            results: Vec::new(),
        }
    }
}

/// One entry in a search result set, in either of the two wire shapes.
///
/// Serialized untagged: the shape is determined by which fields are
/// present, matching what the emulated registries emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryHit {
    /// The `is_public`/`href` shape used by most fixtures.
    Modern(ModernHit),
    /// The older `star_count`/`is_official` shape.
    Legacy(LegacyHit),
}

impl RepositoryHit {
    /// Repository name of this hit, regardless of shape.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Modern(hit) => &hit.name,
            Self::Legacy(hit) => &hit.name,
        }
    }
}

/// Search hit in the `is_public`/`href` shape.
///
/// `description` is always emitted, as JSON `null` when absent — clients
/// distinguish a null description from an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModernHit {
    /// Fully qualified repository name.
    pub name: String,
    /// Repository description; `None` serializes as `null`.
    pub description: Option<String>,
    /// Whether the repository is publicly pullable.
    pub is_public: bool,
    /// Relative link to the repository page.
    pub href: String,
    /// Star count, omitted when the fixture carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    /// Official-image flag, omitted when the fixture carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<bool>,
    /// Automated-build flag, omitted when the fixture carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_automated: Option<bool>,
}

/// Search hit in the legacy `star_count`/`is_official` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyHit {
    /// Fully qualified repository name.
    pub name: String,
    /// Repository description.
    pub description: String,
    /// Star count.
    pub star_count: u32,
    /// Official-image flag.
    pub is_official: bool,
    /// Automated-build flag.
    pub is_automated: bool,
}

/// Body of a v2 tags-list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsList {
    /// Repository name the tags belong to.
    pub name: String,
    /// One page of tags, in catalog order.
    pub tags: Vec<String>,
}

/// Body of a v2 catalog response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All repository names known to the tag catalog.
    pub repositories: Vec<String>,
}
