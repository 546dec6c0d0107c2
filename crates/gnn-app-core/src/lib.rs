// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for gnn tools.
//! Storage adapters implement [`config::ConfigStore`]; callers go through
//! [`config::ConfigService`] and never touch raw bytes.
#![forbid(unsafe_code)]

pub mod config;
