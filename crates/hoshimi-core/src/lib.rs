pub mod actions;
pub mod cdn;
pub mod config;
pub mod error;
pub mod getters;
pub mod models;
pub mod mutation;
pub mod plugin;
pub mod seed;
pub mod state;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use actions::CatalogParams;
pub use cdn::Cdn;
pub use error::HoshimiError;
pub use getters::Getters;
pub use mutation::Mutation;
pub use state::{State, WindowMode};
pub use store::{Store, StoreBuilder};
