//! Hades Core Library
//!
//! Similarity scoring, all-pairs comparison and top-K ranking for
//! near-duplicate detection across a corpus of text documents.

pub mod config;
pub mod corpus;
pub mod error;
pub mod format;
pub mod logging;
pub mod normalize;
pub mod pairs;
pub mod pipeline;
pub mod rank;
pub mod report;
pub mod scheduler;
pub mod similarity;
