//! Seeded registry fixtures.
//!
//! The dataset is built once at startup and shared read-only behind an
//! `Arc`; handlers never mutate it. Search entries keep their seeding
//! order, which is the stable order [`crate::query::find_best_match`]
//! scans them in. Tag lists keep insertion order, which defines
//! pagination order.

use std::collections::BTreeMap;

use regmock_common::types::{LegacyHit, ModernHit, RepositoryHit, SearchRecord};

/// One registered pagination continuation.
///
/// Real registries sometimes serve a fresh, disjoint continuation set at a
/// page boundary instead of a contiguous slice of the same backing list.
/// That quirk is reproduced for exactly the `(repository, limit, last)`
/// triples registered here and nowhere else.
#[derive(Debug, Clone)]
pub struct ContinuationOverride {
    /// Repository the continuation belongs to.
    pub repository: String,
    /// Page size the client must request.
    pub limit: usize,
    /// Cursor the client must resume after.
    pub last: String,
    /// Literal tag sequence served for the matching request.
    pub tags: Vec<String>,
}

/// Immutable in-memory tables backing every response the mock serves.
#[derive(Debug, Default)]
pub struct RegistryDataset {
    search: Vec<(String, SearchRecord)>,
    tags: BTreeMap<String, Vec<String>>,
    continuations: Vec<ContinuationOverride>,
}

impl RegistryDataset {
    /// Creates an empty dataset. Useful for tests that need a handful of
    /// purpose-built entries instead of the full seed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a search result set under the given query key.
    #[must_use]
    pub fn with_search(mut self, key: impl Into<String>, record: SearchRecord) -> Self {
        self.search.push((key.into(), record));
        self
    }

    /// Registers a repository's full ordered tag list.
    ///
    /// Tag lists are append-only fixtures; a list must not contain
    /// duplicate tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, repository: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let _ = self
            .tags
            .insert(repository.into(), tags.into_iter().map(Into::into).collect());
        self
    }

    /// Registers a pagination continuation override.
    #[must_use]
    pub fn with_continuation(mut self, continuation: ContinuationOverride) -> Self {
        self.continuations.push(continuation);
        self
    }

    /// Search entries in seeding order.
    #[must_use]
    pub fn search_entries(&self) -> &[(String, SearchRecord)] {
        &self.search
    }

    /// Full tag list for a repository, or `None` if the repository is not
    /// in the catalog.
    #[must_use]
    pub fn tags(&self, repository: &str) -> Option<&[String]> {
        self.tags.get(repository).map(Vec::as_slice)
    }

    /// All repository names known to the tag catalog.
    #[must_use]
    pub fn repositories(&self) -> Vec<String> {
        self.tags.keys().cloned().collect()
    }

    /// Registered continuation overrides.
    #[must_use]
    pub fn continuations(&self) -> &[ContinuationOverride] {
        &self.continuations
    }

    /// Builds the standard seed data the CLI test scenarios rely on.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new()
            .with_search("alpine", alpine_record())
            .with_search("busybox", busybox_record())
            .with_search("skopeo/stable:latest", skopeo_record())
            .with_search("podman/stable", podman_record())
            .with_search("testdigest_v2s1", testdigest_v2s1_record())
            .with_search("testdigest_v2s2", testdigest_v2s2_record())
            .with_tags(
                "libpod/alpine",
                ["3.10.2", "3.2", "latest", "withbogusseccomp", "withseccomp"],
            )
            .with_tags("podman/stable", PODMAN_STABLE_TAGS)
            .with_continuation(ContinuationOverride {
                repository: "podman/stable".into(),
                limit: 100,
                last: "v5.4".into(),
                tags: PODMAN_STABLE_CONTINUATION
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
    }
}

/// Shorthand for a plain modern-shape hit with derived `href` and no
/// optional flags.
fn modern(name: &str, description: Option<&str>) -> RepositoryHit {
    RepositoryHit::Modern(ModernHit {
        name: name.to_string(),
        description: description.map(str::to_string),
        is_public: true,
        href: format!("/repository/{name}"),
        stars: None,
        official: None,
        is_automated: None,
    })
}

fn alpine_record() -> SearchRecord {
    SearchRecord {
        query: "alpine".into(),
        num_results: 25,
        num_pages: Some(2),
        page: Some(1),
        page_size: Some(25),
        results: vec![
            modern("cilium/alpine-curl", Some("")),
            RepositoryHit::Modern(ModernHit {
                name: "libpod/alpine".into(),
                description: Some(
                    "This image is used for testing purposes only. Do NOT use it in production!"
                        .into(),
                ),
                is_public: true,
                href: "/repository/libpod/alpine".into(),
                stars: Some(11),
                official: Some(true),
                is_automated: None,
            }),
            RepositoryHit::Modern(ModernHit {
                name: "openshifttest/alpine".into(),
                description: None,
                is_public: true,
                href: "/repository/openshifttest/alpine".into(),
                stars: Some(5),
                official: Some(false),
                is_automated: Some(true),
            }),
            modern("openshifttest/base-alpine", None),
            modern("astronomer/ap-alpine", Some("")),
            modern("almworks/alpine-curl", Some("")),
            modern("jitesoft/alpine", Some("# Alpine linux")),
            modern("dougbtv/alpine", None),
            modern("tccr/alpine", None),
            modern(
                "aptible/alpine",
                Some("Alpine base image, borrowed from gliderlabs/alpine"),
            ),
            modern("openshifttest/nginx-alpine", None),
            modern("wire/alpine-git", Some("")),
            modern("ditto/alpine-non-root", Some("")),
            modern("kubevirt/alpine-ext-kernel-boot-demo", Some("")),
            modern("ansible/alpine321-test-container", Some("")),
            modern("crio/alpine", None),
            modern("ansible/alpine-test-container", Some("")),
            modern("ansible/alpine322-test-container", Some("")),
            modern("bedrock/alpine", Some("")),
            modern("ansible/alpine3-test-container", Some("")),
            modern("openshift-psap-qe/nginx-alpine", None),
            modern("startx/alpine", Some("")),
            modern("pcc3202/alpine_multi", Some("")),
            modern("nvlab/alpine", None),
            modern(
                "kubevirt/alpine-container-disk-demo",
                Some("Part of kubevirt/kubevirt artifacts"),
            ),
        ],
    }
}

fn busybox_record() -> SearchRecord {
    SearchRecord {
        query: "busybox".into(),
        num_results: 2,
        num_pages: None,
        page: None,
        page_size: None,
        results: vec![
            RepositoryHit::Legacy(LegacyHit {
                name: "busybox".into(),
                description: "Busybox base image".into(),
                star_count: 80,
                is_official: true,
                is_automated: false,
            }),
            RepositoryHit::Legacy(LegacyHit {
                name: "progrium/busybox".into(),
                description: "Custom busybox build".into(),
                star_count: 15,
                is_official: false,
                is_automated: true,
            }),
        ],
    }
}

fn skopeo_record() -> SearchRecord {
    SearchRecord {
        query: "skopeo/stable:latest".into(),
        num_results: 3,
        num_pages: Some(1),
        page: Some(1),
        page_size: Some(25),
        results: vec![
            modern("skopeo/stable", Some("Stable Skopeo Image")),
            modern("skopeo/testing", Some("Testing Skopeo Image")),
            modern("skopeo/upstream", Some("Upstream Skopeo Image")),
        ],
    }
}

fn podman_record() -> SearchRecord {
    SearchRecord {
        query: "podman/stable".into(),
        num_results: 3,
        num_pages: Some(1),
        page: Some(1),
        page_size: Some(25),
        results: vec![
            modern("podman/stable", Some("Stable Podman Image")),
            modern("podman/testing", Some("Testing Podman Image")),
            modern("podman/upstream", Some("Upstream Podman Image")),
        ],
    }
}

fn testdigest_v2s1_record() -> SearchRecord {
    SearchRecord {
        query: "testdigest_v2s1".into(),
        num_results: 2,
        num_pages: Some(1),
        page: Some(1),
        page_size: Some(25),
        results: vec![
            modern(
                "libpod/testdigest_v2s1",
                Some("Test image used by buildah regression tests"),
            ),
            modern(
                "libpod/testdigest_v2s1_with_dups",
                Some(
                    "This is a specially crafted test-only image used in buildah CI and gating tests.",
                ),
            ),
        ],
    }
}

fn testdigest_v2s2_record() -> SearchRecord {
    SearchRecord {
        query: "testdigest_v2s2".into(),
        num_results: 1,
        num_pages: Some(1),
        page: Some(1),
        page_size: Some(25),
        results: vec![modern(
            "libpod/testdigest_v2s2",
            Some("This is a specially crafted test-only image used in buildah CI and gating tests."),
        )],
    }
}

const PODMAN_STABLE_TAGS: [&str; 100] = [
    "latest",
    "v1.4.2",
    "v1.4.4",
    "v1.5.0",
    "v1.5.1",
    "v1.6",
    "v1.6.2",
    "v1.9.0",
    "v1.9.1",
    "v2.0.2",
    "v2.0.6",
    "v2.1.1",
    "v2.2.1",
    "v3",
    "v3.1.2",
    "v3.2.0",
    "v3.2.1",
    "v3.2.2",
    "v3.2.3",
    "v3.3.0",
    "v3.3.1",
    "v3.4",
    "v3.4.0",
    "v3.4.1",
    "v3.4.2",
    "v3.4.4",
    "v3.4.7",
    "v4",
    "v4.1",
    "v4.1.0",
    "v4.1.1",
    "v4.2",
    "v4.2.0",
    "v4.2.1",
    "v4.3",
    "v4.3.0",
    "v4.3.1",
    "v4.4",
    "v4.4.1",
    "v4.4.2",
    "v4.4.4",
    "v4.5",
    "v4.5.0",
    "v4.5.1",
    "v4.6",
    "v4.6.1",
    "v4.6.2",
    "v4.7",
    "v4.7.0",
    "v4.7.2",
    "v4.8",
    "v4.8.0",
    "v4.8.1",
    "v4.8.2",
    "v4.8.3",
    "v4.9",
    "v4.9.0",
    "v4.9.3",
    "v4.9.4",
    "v4.9.4-immutable",
    "v4.9-immutable",
    "v4-immutable",
    "v5",
    "v5.0",
    "v5.0.1",
    "v5.0.1-immutable",
    "v5.0.2",
    "v5.0.2-immutable",
    "v5.0.3",
    "v5.0.3-immutable",
    "v5.0-immutable",
    "v5.1",
    "v5.1.0",
    "v5.1.0-immutable",
    "v5.1.1",
    "v5.1.1-immutable",
    "v5.1.2",
    "v5.1.2-immutable",
    "v5.1-immutable",
    "v5.2",
    "v5.2.0",
    "v5.2.0-immutable",
    "v5.2.1",
    "v5.2.1-immutable",
    "v5.2.2",
    "v5.2.2-immutable",
    "v5.2.3",
    "v5.2.3-immutable",
    "v5.2.5",
    "v5.2.5-immutable",
    "v5.2-immutable",
    "v5.3",
    "v5.3.0",
    "v5.3.0-immutable",
    "v5.3.1",
    "v5.3.1-immutable",
    "v5.3.2",
    "v5.3.2-immutable",
    "v5.3-immutable",
    "v5.4",
];

/// Tags served after `v5.4` when the client asks for the exact
/// `(limit=100, last=v5.4)` continuation page.
const PODMAN_STABLE_CONTINUATION: [&str; 24] = [
    "v5.4.0",
    "v5.4.0-immutable",
    "v5.4.1",
    "v5.4.1-immutable",
    "v5.4.2",
    "v5.4.2-immutable",
    "v5.4-immutable",
    "v5.5",
    "v5.5.0",
    "v5.5.0-immutable",
    "v5.5.1",
    "v5.5.1-immutable",
    "v5.5.2",
    "v5.5.2-immutable",
    "v5.5-immutable",
    "v5.6",
    "v5.6.0",
    "v5.6.0-immutable",
    "v5.6.1",
    "v5.6.1-immutable",
    "v5.6.2",
    "v5.6.2-immutable",
    "v5.6-immutable",
    "v5-immutable",
];
