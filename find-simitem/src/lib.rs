//! Item-to-item similarity search over co-rated user sets.
#![deny(missing_docs)]

pub mod catalog;
pub mod errors;
pub mod index;
pub mod pairs;
pub mod pipeline;
pub mod query;
pub mod ratings;
pub mod scores;

pub use pipeline::SimilarityPipeline;
pub use query::QueryParams;
