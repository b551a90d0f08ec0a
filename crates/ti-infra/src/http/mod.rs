//! HTTP adapters for the remote ports.
//!
//! Every adapter sends its request through [`RemoteEndpoint`], which turns the
//! raw response into a [`ti_core::ClassifiedResponse`]. Adapters only inspect
//! the classified payload, never the status or body.

mod client;
mod gallery;
mod model_generator;
mod try_on;
mod uploader;

pub use client::RemoteEndpoint;
pub use gallery::HttpGalleryClient;
pub use model_generator::HttpModelGenerator;
pub use try_on::HttpTryOnInvoker;
pub use uploader::HttpAssetUploader;
