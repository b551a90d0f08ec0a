use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{info_span, Instrument};

use ti_core::ports::TryOnPort;
use ti_core::{RemoteCallError, RemoteImageUrl, TryOnResult};

use super::client::{string_field, RemoteEndpoint};

pub(crate) const TRY_ON_PATH: &str = "/tryon_flux";
const TRY_ON_FALLBACK: &str = "try-on failed";

/// Calls the composite-generation endpoint.
pub struct HttpTryOnInvoker {
    endpoint: RemoteEndpoint,
}

impl HttpTryOnInvoker {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl TryOnPort for HttpTryOnInvoker {
    async fn invoke(
        &self,
        person_url: &RemoteImageUrl,
        cloth_url: &RemoteImageUrl,
    ) -> Result<TryOnResult, RemoteCallError> {
        let span = info_span!("infra.http.try_on");
        let body = json!({
            "person_url": person_url.as_str(),
            "cloth_url": cloth_url.as_str(),
        });

        async {
            let payload = self
                .endpoint
                .post_json(TRY_ON_PATH, &body)
                .await?
                .into_payload(TRY_ON_FALLBACK)?;
            parse_try_on(&payload)
        }
        .instrument(span)
        .await
    }
}

fn parse_try_on(payload: &Value) -> Result<TryOnResult, RemoteCallError> {
    let edited_url = string_field(payload, "edited_url").ok_or_else(|| {
        RemoteCallError::MissingField("no edited image returned".to_string())
    })?;

    Ok(TryOnResult {
        edited_url: RemoteImageUrl::new(edited_url),
    })
}
