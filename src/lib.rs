pub mod config;
pub mod directory;
pub mod error;
pub mod storage;

pub use config::DirectoryConfig;
pub use directory::{Directory, DirectoryStats};
pub use error::DirectoryError;
pub use storage::{KeyValueStore, MemoryStore, SledStore};

/// Install the global tracing subscriber. Call once from the embedding
/// application; `level` is a fallback when RUST_LOG is unset.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
