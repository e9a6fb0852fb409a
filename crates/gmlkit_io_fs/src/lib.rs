//! `gmlkit_io_fs` v1:
//! Rust-side flattening copier for `.gml` trees.
//!
//! Module layout:
//! - `flatten` : traversal and copy orchestration
//! - `spec`    : options/constants/errors
//! - `report`  : run-time report model
//! - `util`    : shared helper functions

pub mod flatten;
pub mod report;
pub mod spec;
mod util;

pub use flatten::flatten_copy;
pub use report::{ReportFlatten, ReportFlattenBuilder};
pub use spec::{
    C_EXT_SOURCE, C_EXT_TARGET, FlattenError, SpecFlattenError, SpecFlattenOptions,
};
pub use util::is_same_directory;
