use std::sync::Arc;

use ti_core::{gallery::GalleryListing, ports::GalleryPort, GalleryKind, RemoteCallError};
use tracing::{info, info_span, Instrument};

/// Use case for listing assets produced by earlier runs.
pub struct ListGallery {
    gallery: Arc<dyn GalleryPort>,
}

impl ListGallery {
    pub fn new(gallery: Arc<dyn GalleryPort>) -> Self {
        Self { gallery }
    }

    /// Execute the use case.
    pub async fn execute(&self, kind: GalleryKind) -> Result<GalleryListing, RemoteCallError> {
        let span = info_span!("usecase.list_gallery.execute", kind = %kind);

        async {
            let listing = match kind {
                GalleryKind::Uploads => GalleryListing::Uploads(self.gallery.list_uploads().await?),
                GalleryKind::Edits => GalleryListing::Edits(self.gallery.list_edits().await?),
                GalleryKind::Models => GalleryListing::Models(self.gallery.list_models().await?),
            };
            info!(count = listing.len(), "gallery listed");
            Ok(listing)
        }
        .instrument(span)
        .await
    }
}
