//! Pattern matching module

pub mod codeowners;
pub mod matcher;

pub use codeowners::parse_codeowners_like;
pub use matcher::PatternMatcher;
