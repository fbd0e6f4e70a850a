//! # regmock-server
//!
//! A mock container-image registry used to drive CLI search and
//! tag-listing test scenarios without a real network registry.
//!
//! The server emulates two wire protocol families behaviorally:
//! the legacy v1 search API (`GET /v1/search`) and the v2 catalog and
//! tags-list APIs (`GET /v2/_catalog`, `GET /v2/<repo>/tags/list`).
//! Responses come from a seeded, immutable [`dataset::RegistryDataset`];
//! every request is handled independently with no cross-request state.
//!
//! Typical use from a test:
//!
//! ```no_run
//! # async fn demo() -> regmock_common::error::Result<()> {
//! let registry = regmock_server::MockRegistry::start_default().await?;
//! let url = format!("http://{}/v1/search?q=alpine", registry.addr());
//! // ... drive the CLI under test against `url` ...
//! registry.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod query;
pub mod routes;
pub mod server;

pub use server::MockRegistry;
