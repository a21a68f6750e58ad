pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::MasteraniClient;
pub use error::ApiError;
pub use traits::CatalogApi;
