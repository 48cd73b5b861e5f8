//! commentgate - Tag-based visibility for stored comments
//!
//! Comments are nested documents whose root and protected sub-objects each
//! carry tags. Reads are projected through a field whitelist and redacted
//! against the caller's roles; lifecycle operations assign and toggle tags.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::GateError;
