//! Export of cleaned feature tables.

mod writer;

pub use writer::{cleaned_path, finalize, write_atomic, write_csv, CLEANED_SUFFIX};
