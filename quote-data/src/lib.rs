//! Inputs for the quote engine: material catalogs, order sheets and named
//! print sizes.

pub mod catalog_loader;
pub mod order_loader;
pub mod presets;

pub use catalog_loader::{CatalogLoadError, CatalogLoader};
pub use order_loader::{OrderBatch, OrderLoadError};
pub use presets::{PresetBook, PresetError, PresetGroup, SizePreset};
