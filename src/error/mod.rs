//! Error types shared by every rowpack module.

mod types;

pub use types::{LayoutError, Result};
