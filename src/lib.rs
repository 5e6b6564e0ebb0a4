pub mod common;
pub mod ports;
pub mod action;
pub mod options;
pub mod gateway;
pub mod hydrate;
pub mod sync;
pub mod store;
pub mod adapters;

pub use common::LogFormat;
pub use action::Action;
pub use options::{Options, SyncErrorHandler};
pub use gateway::Gateway;
pub use hydrate::{Hydrate, HydrateHandle};
pub use sync::{StorageSync, SyncReducer};
pub use store::Store;
pub use adapters::{FileStorage, MemoryStorage};

pub use ports::required::StorageClient;
pub use ports::provided::{OptionsError, Reducer, SyncError};
