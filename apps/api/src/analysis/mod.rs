//! Job posting analysis: prompt construction plus the result-normalization
//! and confidence-enrichment pipeline applied to raw model output.
//!
//! Pipeline order matters: deep default-fill, one-shot score rescaling,
//! confidence derivation, then legacy projection synthesis. See `normalize`.

pub mod confidence;
pub mod dates;
pub mod extract;
pub mod handlers;
pub mod legacy;
pub mod models;
pub mod normalize;
pub mod prompt;
