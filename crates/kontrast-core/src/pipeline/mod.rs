//! Measurement pipeline components.
//!
//! - **discovery**: Find candidate image files in a directory tree
//! - **decode**: Decode an image into a normalized grayscale map
//! - **processor**: Measure files and run the skip-and-continue batch loop

pub mod decode;
pub mod discovery;
pub mod processor;

// Re-exports for convenient access
pub use decode::{decode_gray01, to_gray01, GrayMap};
pub use discovery::{DiscoveredFile, FileDiscovery};
pub use processor::ContrastProcessor;
