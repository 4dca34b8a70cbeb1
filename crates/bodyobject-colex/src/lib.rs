//! Body-part/object colexification features
//!
//! Turns admitted CLDF wordlists into a structure dataset:
//!
//! ```text
//!  wordlists ──► filter ──► ConceptFormIndex ──► FormConceptIndex
//!                                  │                    │
//!                                  │                    ▼
//!                                  │           ColexificationCount
//!                                  │                    │
//!                                  ▼                    ▼
//!                            materialize ◄──────── select (top N)
//!                                  │
//!                                  ▼
//!                             post-filter ──► CldfTables
//! ```
//!
//! Everything here is deterministic: indices are ordered maps and ranking ties
//! are broken by the lexical order of the gloss pair.

pub mod config;
pub mod filter;
pub mod index;
pub mod materialize;
pub mod model;
pub mod pipeline;
pub mod postfilter;
pub mod select;
pub mod slug;

pub use config::*;
pub use filter::*;
pub use index::*;
pub use materialize::*;
pub use model::*;
pub use pipeline::*;
pub use postfilter::*;
pub use select::*;
pub use slug::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColexError {
    #[error("empty identifier for {kind}")]
    EmptyIdentifier { kind: &'static str },
    #[error("feature needs two distinct glosses, got `{gloss}` twice")]
    DegenerateFeature { gloss: String },
    #[error("gloss `{gloss}` has no ASCII letters or digits to build an identifier from")]
    UnsluggableGloss { gloss: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ColexError>;
