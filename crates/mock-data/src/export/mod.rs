//! Export of generated data.
//!
//! The [`UserExporter`] writes a user with its whole schedule as one JSON
//! document and can read such a document back.

mod writer;

pub use writer::{OutputError, UserExporter};
