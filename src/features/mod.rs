//! Feature encoding
//!
//! Converts team identity into model-ready one-hot vectors.

pub mod encoding;

pub use encoding::{OneHotEncoder, OneHotTable};
