pub mod cell_kernel;
pub mod mesh;
pub mod primitives;
pub mod stl;
pub mod tessellation;
pub mod traits;
pub mod truck_kernel;
pub mod types;

pub use cell_kernel::CellKernel;
pub use mesh::{EdgeReport, MeshFace, SolidMesh};
pub use stl::{export_ascii_stl, export_binary_stl, StlError};
pub use traits::*;
pub use truck_kernel::TruckKernel;
pub use types::*;
