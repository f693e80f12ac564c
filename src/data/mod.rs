//! Data structures for feature-intensity tables.

mod feature_table;
mod groups;
mod raw_table;

pub use feature_table::{FeatureTable, FEATURE_KEY_COLUMN};
pub use groups::{PrefixMode, PrefixSet};
pub(crate) use raw_table::parse_cell;
pub use raw_table::{is_missing_token, RawTable};
