//! Commands module - CLI command implementations.
//!
//! Commands write to the given output and return whether the checked input
//! was acceptable. Errors come back as `Failure`s for `main` to render.

pub mod explain;
pub mod validate;
