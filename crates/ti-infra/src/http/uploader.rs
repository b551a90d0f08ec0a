use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use ti_core::ports::AssetUploadPort;
use ti_core::{LocalImageHandle, RemoteCallError, RemoteImageUrl, UploadedAsset};

use super::client::{string_field, RemoteEndpoint};

pub(crate) const UPLOAD_PATH: &str = "/upload";
const UPLOAD_FALLBACK: &str = "upload failed";

/// Uploads local images to the backend's `/upload` endpoint as multipart forms.
pub struct HttpAssetUploader {
    endpoint: RemoteEndpoint,
    field_name: String,
}

impl HttpAssetUploader {
    pub fn new(endpoint: RemoteEndpoint, field_name: impl Into<String>) -> Self {
        Self {
            endpoint,
            field_name: field_name.into(),
        }
    }

    async fn build_form(&self, image: &LocalImageHandle) -> Result<Form, RemoteCallError> {
        let path = image.path();
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            RemoteCallError::ImageUnreadable(format!("{}: {e}", path.display()))
        })?;
        debug!(bytes = bytes.len(), mime = image.mime_type(), "image read");

        let part = Part::bytes(bytes)
            .file_name(image.upload_file_name())
            .mime_str(image.mime_type())
            .map_err(|e| RemoteCallError::ImageUnreadable(e.to_string()))?;

        Ok(Form::new().part(self.field_name.clone(), part))
    }
}

#[async_trait]
impl AssetUploadPort for HttpAssetUploader {
    async fn upload(&self, image: &LocalImageHandle) -> Result<UploadedAsset, RemoteCallError> {
        let span = info_span!("infra.http.upload", image = %image);

        async {
            let form = self.build_form(image).await?;
            let payload = self
                .endpoint
                .post_multipart(UPLOAD_PATH, form)
                .await?
                .into_payload(UPLOAD_FALLBACK)?;
            parse_uploaded(&payload)
        }
        .instrument(span)
        .await
    }
}

fn parse_uploaded(payload: &Value) -> Result<UploadedAsset, RemoteCallError> {
    let url = string_field(payload, "url")
        .ok_or_else(|| RemoteCallError::MissingField("upload url missing".to_string()))?;

    Ok(UploadedAsset {
        url: RemoteImageUrl::new(url),
        public_id: string_field(payload, "public_id"),
    })
}
