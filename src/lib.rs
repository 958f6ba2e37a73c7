pub mod api;
pub mod choices;
pub mod config;
pub mod entity;
pub mod error;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;

pub use api::{create_router, AppState};
pub use config::SearchSettings;
pub use entity::{Entity, EntityRegistry, EntitySource, FieldValue, MemorySource};
pub use error::{Result, SiftError};
pub use schema::{Choice, FieldDescriptor, FieldKind, SearchConfig};
pub use service::{SearchRequest, SearchService};
pub use store::ConfigStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
