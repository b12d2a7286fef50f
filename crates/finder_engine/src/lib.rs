//! Movie finder engine: catalog client and background request execution.
mod config;
mod engine;
mod fetch;
mod types;

pub use config::{ApiConfig, ConfigError, API_KEY_VAR, BASE_URL_VAR, DEFAULT_BASE_URL};
pub use engine::{EngineError, EngineHandle};
pub use fetch::{Catalog, FetchSettings, TmdbCatalog};
pub use types::{EngineCommand, EngineEvent, FailureKind, FetchError};
