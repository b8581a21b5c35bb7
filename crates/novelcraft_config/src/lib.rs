//! Layered configuration for Novelcraft.
//!
//! The configuration system supports:
//! - Bundled defaults (`include_str!` from `novelcraft.toml`)
//! - User overrides (`~/.config/novelcraft/novelcraft.toml`, then `./novelcraft.toml`)
//! - An explicit file passed by the caller, merged over the bundled defaults

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{
    GenerationConfig, GenerationParams, MemoryConfig, NovelcraftConfig, ProviderConfig,
};
