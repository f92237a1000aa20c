//! Infrastructure layer: platform persistence and outbound service clients.

pub mod command_client;
pub mod store;

pub use command_client::{CommandClient, CommandClientError, HttpCommandClient};
pub use store::{InMemoryPlatformStore, PlatformStore, PostgresPlatformStore, StoreError};
