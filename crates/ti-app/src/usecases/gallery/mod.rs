mod list_gallery;

pub use list_gallery::ListGallery;
