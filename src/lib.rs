//! Publish Go release metadata as a static JSON API.
//!
//! The Go downloads page lists every release with its downloadable
//! artifacts. This crate scrapes that page, validates every artifact against
//! a fixed schema, orders releases newest-first, and renders a small set of
//! JSON and text documents that can be served as static files.
//!
//! A run either publishes a complete, valid data set or nothing at all.
//!
//! # Modules
//!
//! - [`release`]: the domain model and the pure pipeline stages.
//! - [`fetch`]: retrieval of the downloads page.
//! - [`publish`]: writing rendered documents to disk.
//! - [`pipeline`]: wiring of the stages into a run.
//! - [`config`] and [`cli`]: run configuration.
//! - [`error`]: the top-level error type.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod publish;
pub mod release;

pub use config::{Config, Settings};
pub use error::PipelineError;
pub use pipeline::{RunMode, RunReport, build_publication, run};
