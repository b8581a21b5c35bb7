//! Trait definitions for LLM backends used by Novelcraft.
//!
//! The story pipeline only ever talks to a [`NovelcraftDriver`]; concrete
//! providers live in `novelcraft_models`, and tests substitute scripted mocks.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{NovelcraftDriver, TokenCounting};
pub use types::{ModelMetadata, ModelMetadataBuilder, ModelMetadataBuilderError};
