//! mdconvert Processing Library
//!
//! This crate turns a file on disk into Markdown text. The actual conversion is done
//! by a [`Converter`] backend; [`ConversionGateway`] invokes it once and classifies
//! the outcome so callers can tell a failure from an empty result.

pub mod gateway;
pub mod markitdown;
pub mod native;
pub mod traits;

// Re-export commonly used types
pub use gateway::{ConversionError, ConversionGateway, ConversionResult};
pub use markitdown::MarkItDownConverter;
pub use native::NativeConverter;
pub use traits::{Converter, ConverterOutput};
