//! Release domain model and the pure stages of the publishing pipeline.
//!
//! Data flows through the stages as distinct types, so only validated and
//! ordered data can reach the publication model:
//!
//! [`markup::Markup`] → [`extraction::extract`] → [`catalog::Catalog`] →
//! [`validation::validate`] → [`validation::ValidatedCatalog`] →
//! [`ordering::order_releases`] → [`ordering::OrderedReleases`] →
//! [`publication::Publication::build`].
//!
//! # Sub-modules
//!
//! - [`artifact`]: the downloadable artifact record and its wire format.
//! - [`catalog`]: versions discovered on the page with their artifacts.
//! - [`checksum`]: checksum cell classification and handling policy.
//! - [`columns`]: column layout of the download tables.
//! - [`extraction`]: section and row extraction from the parsed page.
//! - [`kind`]: the recognised artifact kinds.
//! - [`markup`]: decoding and parsing of the raw page.
//! - [`ordering`]: newest-first ordering and latest selection.
//! - [`publication`]: projection into published documents.
//! - [`validation`]: whole-batch artifact validation.
//! - [`version`]: tolerant version token parsing.

pub mod artifact;
pub mod catalog;
pub mod checksum;
pub mod columns;
pub mod extraction;
pub mod kind;
pub mod markup;
pub mod ordering;
pub mod publication;
pub mod validation;
pub mod version;
