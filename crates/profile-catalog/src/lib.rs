//! Profile catalog: loading, lookup and filtering of catalog entries.
//!
//! The catalog file is a JSON array of entries:
//!
//! ```json
//! [{"id": "GB-4040", "name": "4040", "standard": "GB", "series": "40",
//!   "section_params": {"width": 40, "height": 40, "slot_width": 8, "wall_thickness": 2.2},
//!   "default_length": 1000}]
//! ```

pub mod catalog;
pub mod errors;
pub mod load;

pub use catalog::{Catalog, CatalogFilter};
pub use errors::CatalogError;
pub use load::parse_profiles;
