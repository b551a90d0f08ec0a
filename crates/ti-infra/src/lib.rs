//! # ti-infra
//!
//! Infrastructure adapters for TryItOn: the HTTP clients implementing the
//! remote ports and the configuration file loader.

pub mod config;
pub mod http;

pub use config::load_config;
pub use http::{
    HttpAssetUploader, HttpGalleryClient, HttpModelGenerator, HttpTryOnInvoker, RemoteEndpoint,
};
