pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod net;
pub mod push;
pub mod runtime;
pub mod search;
pub mod secure_storage;
pub mod session;
pub mod store;
pub mod streaming;
pub mod tracing_setup;

pub use config::CoreConfig;
pub use error::ApiError;
pub use net::{ApiClient, ClientCommand, DataChange, Resource};
pub use runtime::{CoreHandle, CoreRuntime};
pub use session::Session;
