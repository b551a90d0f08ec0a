use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info_span, Instrument};

use ti_core::ports::ModelGenerationPort;
use ti_core::{ModelResult, RemoteCallError, RemoteImageUrl};

use super::client::{string_field, RemoteEndpoint};

pub(crate) const GENERATE_3D_PATH: &str = "/generate_3d";
const MESH_MISSING: &str = "mesh missing";

/// Calls the 3D-reconstruction endpoint.
pub struct HttpModelGenerator {
    endpoint: RemoteEndpoint,
}

impl HttpModelGenerator {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl ModelGenerationPort for HttpModelGenerator {
    async fn generate(&self, edited_url: &RemoteImageUrl) -> Result<ModelResult, RemoteCallError> {
        let span = info_span!("infra.http.generate_3d");
        let body = json!({ "image_url": edited_url.as_str() });

        async {
            let payload = self
                .endpoint
                .post_json(GENERATE_3D_PATH, &body)
                .await?
                .into_payload(MESH_MISSING)?;
            parse_model(&payload)
        }
        .instrument(span)
        .await
    }
}

fn parse_model(payload: &Value) -> Result<ModelResult, RemoteCallError> {
    let mesh_url = string_field(payload, "mesh_url")
        .ok_or_else(|| RemoteCallError::MissingField(MESH_MISSING.to_string()))?;

    Ok(ModelResult {
        mesh_url,
        preview_url: string_field(payload, "render_preview"),
    })
}
