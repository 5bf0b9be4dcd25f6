//! Data-file backed dex for the evochain engine.
//!
//! Loads species and evolution records from RON, JSON, or TOML files and
//! exposes them through [`DexCatalog`], an
//! [`EdgeProvider`](evochain_core::provider::EdgeProvider). Also loads
//! [`EngineConfig`](evochain_core::config::EngineConfig) files.

pub mod catalog;
pub mod config;
pub mod loader;
pub mod schema;

pub use catalog::{DexCatalog, load_dex};
pub use config::load_engine_config;
pub use loader::DataLoadError;
