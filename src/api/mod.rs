pub mod catalog;
pub mod client;
pub mod error;
mod sse;
pub mod types;

pub use catalog::{ProviderDescriptor, provider, providers};
pub use client::{CompletionClient, ImageOptions};
pub use error::ClientError;
