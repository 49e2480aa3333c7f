pub mod bom;
pub mod compose;
pub mod config;
pub mod cutters;
pub mod generate;
pub mod guard;
pub mod types;

pub use bom::{bill_of_materials, BillOfMaterials, BomLine};
pub use compose::{compose_profile, subtract_cutters, Composition, CompositionError};
pub use config::{ConfigError, GeneratorConfig, KernelBackend};
pub use cutters::{base_box, slot_cutters, BoxSpec, CutterBox, SlotFace};
pub use generate::{generate_profile, generate_profile_in, generate_profile_with_config};
pub use guard::{guard_dimensions, ClampRecord, GuardOutcome, GuardedDimensions};
pub use types::*;
