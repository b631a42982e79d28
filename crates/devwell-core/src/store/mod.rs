pub mod blob;
pub mod document;
pub mod identity;
mod rest;
pub mod write_queue;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use document::{DocumentStore, MemoryDocumentStore, RestDocumentStore};
pub use identity::{Identity, IdentityProvider, MemoryIdentityProvider, RestIdentityClient};
pub use write_queue::WriteQueue;

use std::path::PathBuf;

/// Returns `~/.config/devwell[-dev]/` based on DEVWELL_ENV.
///
/// Set DEVWELL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DEVWELL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("devwell-dev")
    } else {
        base_dir.join("devwell")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
