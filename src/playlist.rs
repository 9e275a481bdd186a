//! Track descriptors and the loaders that produce them.
//!
//! The rest of the program treats the descriptor list as immutable input:
//! either a TOML manifest (curated order, fallback durations, accent
//! colors, possibly-missing files) or a plain directory scan.

mod manifest;
mod model;
mod scan;

pub use manifest::load_manifest;
pub use model::TrackDescriptor;
pub use scan::scan;

#[cfg(test)]
mod tests;
