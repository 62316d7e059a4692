//! Straightforward encoder that writes every object uncompressed, followed by
//! a classic cross-reference table.

pub(crate) mod indirect;
pub(crate) mod object;
pub(crate) mod section;

pub use section::{write_document, Section};

pub struct SimpleEncoder;
