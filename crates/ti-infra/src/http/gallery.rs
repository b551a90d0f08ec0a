use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info_span, warn, Instrument};

use ti_core::ports::GalleryPort;
use ti_core::{EditRecord, GalleryKind, ModelRecord, RemoteCallError, UploadRecord};

use super::client::RemoteEndpoint;

const LISTING_FALLBACK: &str = "could not load gallery";

/// Reads the backend's listing endpoints.
pub struct HttpGalleryClient {
    endpoint: RemoteEndpoint,
}

impl HttpGalleryClient {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }

    async fn list<T: DeserializeOwned>(&self, kind: GalleryKind) -> Result<Vec<T>, RemoteCallError> {
        let span = info_span!("infra.http.gallery", kind = %kind);

        async {
            let payload = self
                .endpoint
                .get(kind.endpoint())
                .await?
                .into_payload(LISTING_FALLBACK)?;
            parse_listing(kind, payload)
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl GalleryPort for HttpGalleryClient {
    async fn list_uploads(&self) -> Result<Vec<UploadRecord>, RemoteCallError> {
        self.list(GalleryKind::Uploads).await
    }

    async fn list_edits(&self) -> Result<Vec<EditRecord>, RemoteCallError> {
        self.list(GalleryKind::Edits).await
    }

    async fn list_models(&self) -> Result<Vec<ModelRecord>, RemoteCallError> {
        self.list(GalleryKind::Models).await
    }
}

/// A non-array payload is an empty listing; malformed entries are a decode error.
fn parse_listing<T: DeserializeOwned>(
    kind: GalleryKind,
    payload: Value,
) -> Result<Vec<T>, RemoteCallError> {
    if !payload.is_array() {
        warn!(kind = %kind, "listing payload is not an array, treating as empty");
        return Ok(Vec::new());
    }
    serde_json::from_value(payload).map_err(|e| RemoteCallError::DecodeError(e.to_string()))
}
