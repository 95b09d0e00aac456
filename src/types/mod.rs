//! Core types used throughout the library.

pub mod image;
pub mod prompt;
pub mod request;

// Re-export commonly used types
pub use image::*;
pub use prompt::*;
pub use request::*;
