// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for gnn crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Schema and subgraph builders, plus the citation-graph fixture
//! - [`logging`] - One-shot `tracing` subscriber for test output

pub mod config;
pub mod fixtures;
pub mod logging;

pub use config::InMemoryConfigStore;
pub use fixtures::{
    citation_schema, citation_subgraph, SchemaBuilder, SubgraphBuilder, NO_FEATURES,
};
pub use logging::init_test_tracing;
