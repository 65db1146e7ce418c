//! Search engine
//!
//! One generic filter/sort/paginate implementation shared by all four
//! resource families, parameterized by a per-kind [`SearchProfile`].

pub mod engine;
pub mod profiles;

pub use engine::{SearchEngine, SearchOutcome, SearchParams};
pub use profiles::SearchProfile;
