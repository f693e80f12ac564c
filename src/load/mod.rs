//! Loading raw tables into keyed feature tables.

mod normalize;

pub use normalize::{canonical_text, feature_key, normalize};
