//! Shared helpers for CLI commands.
//!
//! The CLI is a thin shell: each invocation hydrates the engine from the
//! snapshot, applies one command, and persists. The in-flight break and the
//! signed-in identity are shell-level continuations kept under their own
//! blob keys, since the core deliberately excludes them from its snapshot.

use std::error::Error;

use devwell_core::{
    ActivityEngine, BlobStore, BreakRecord, Config, FileBlobStore, Identity, RestDocumentStore,
    RestIdentityClient,
};

pub const CURRENT_BREAK_KEY: &str = "devwell_current_break";
pub const IDENTITY_KEY: &str = "devwell_identity";

/// Engine hydrated from the snapshot, plus any staged in-flight break.
pub fn open_engine(config: &Config) -> Result<ActivityEngine, Box<dyn Error>> {
    let store = FileBlobStore::open_default()?;
    let mut engine = ActivityEngine::new(Box::new(store), config.engine.clone());
    engine.load_snapshot();
    if let Some(record) = load_current_break()? {
        engine.resume_break(record)?;
    }
    Ok(engine)
}

pub fn load_current_break() -> Result<Option<BreakRecord>, Box<dyn Error>> {
    let store = FileBlobStore::open_default()?;
    match store.get_item(CURRENT_BREAK_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_current_break(record: Option<&BreakRecord>) -> Result<(), Box<dyn Error>> {
    let mut store = FileBlobStore::open_default()?;
    match record {
        Some(record) => store.set_item(CURRENT_BREAK_KEY, &serde_json::to_string(record)?)?,
        None => store.remove_item(CURRENT_BREAK_KEY)?,
    }
    Ok(())
}

pub fn load_identity() -> Result<Option<Identity>, Box<dyn Error>> {
    let store = FileBlobStore::open_default()?;
    match store.get_item(IDENTITY_KEY)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

pub fn save_identity(identity: Option<&Identity>) -> Result<(), Box<dyn Error>> {
    let mut store = FileBlobStore::open_default()?;
    match identity {
        Some(identity) => store.set_item(IDENTITY_KEY, &serde_json::to_string(identity)?)?,
        None => store.remove_item(IDENTITY_KEY)?,
    }
    Ok(())
}

/// Remote clients from `[remote]` config. Errors when no backend is set.
pub fn remote_clients(
    config: &Config,
) -> Result<(RestIdentityClient, RestDocumentStore), Box<dyn Error>> {
    let base_url = config
        .remote
        .base_url
        .as_deref()
        .ok_or("no remote backend configured; set remote.base_url in config.toml")?;
    let timeout = config.remote.request_timeout_secs;
    let identity = RestIdentityClient::new(base_url, config.remote.api_key.clone(), timeout)?;
    let documents = RestDocumentStore::new(base_url, config.remote.api_key.clone(), timeout)?;
    Ok((identity, documents))
}

/// Print a serializable value as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
