//! HTTP access to the remote CodeBridge service.

pub mod http_client;

pub use http_client::HttpApiClient;
