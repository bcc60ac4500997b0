mod module_size;
mod placement;

#[doc(inline)]
pub use module_size::ModuleId;
#[doc(inline)]
pub use module_size::ModuleSize;
#[doc(inline)]
pub use module_size::SizeCatalog;

#[doc(inline)]
pub use placement::PlacementRecord;
#[doc(inline)]
pub use placement::PlacementSet;
