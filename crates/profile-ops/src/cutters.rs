//! Base box and slot cutter construction in the profile's local frame.
//!
//! The local frame is centered on the profile: X = width, Y = height,
//! Z = length. Pure arithmetic; nothing here can fail.

use serde::{Deserialize, Serialize};
use solid_kernel::{Aabb, SolidMesh};

use crate::guard::GuardedDimensions;

/// Axis-aligned box given by center and full size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub center: [f64; 3],
    pub size: [f64; 3],
}

impl BoxSpec {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }

    /// Direct 8-vertex, 6-quad mesh of this box.
    pub fn mesh(&self) -> SolidMesh {
        SolidMesh::cuboid(&self.bounds())
    }
}

/// Side face of the profile that carries a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotFace {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl SlotFace {
    pub const ALL: [SlotFace; 4] = [SlotFace::PosX, SlotFace::NegX, SlotFace::PosY, SlotFace::NegY];

    /// Axis of the outward face normal (0 = X, 1 = Y).
    pub fn normal_axis(&self) -> usize {
        match self {
            SlotFace::PosX | SlotFace::NegX => 0,
            SlotFace::PosY | SlotFace::NegY => 1,
        }
    }

    /// In-plane axis across which the slot width is measured.
    pub fn tangent_axis(&self) -> usize {
        1 - self.normal_axis()
    }

    pub fn sign(&self) -> f64 {
        match self {
            SlotFace::PosX | SlotFace::PosY => 1.0,
            SlotFace::NegX | SlotFace::NegY => -1.0,
        }
    }
}

/// One slot cutter: the box removed from the base under `face`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutterBox {
    pub face: SlotFace,
    pub spec: BoxSpec,
}

/// The solid outer box: width × height × length, centered on the origin.
pub fn base_box(dims: &GuardedDimensions) -> BoxSpec {
    BoxSpec {
        center: [0.0; 3],
        size: [dims.width, dims.height, dims.length],
    }
}

/// The four slot cutters, in +X, −X, +Y, −Y order.
///
/// Each slot is `cutter_width` wide along the face tangent and has its floor
/// `wall_thickness` below the outer face. The cutter box runs from that floor
/// out past the face by `cutter_overshoot`, and past both ends of the
/// profile by the same amount, so the slot mouth is open and no cutter face
/// is coplanar with a base face.
pub fn slot_cutters(dims: &GuardedDimensions) -> [CutterBox; 4] {
    let extents = [dims.width, dims.height];
    SlotFace::ALL.map(|face| {
        let normal = face.normal_axis();
        let tangent = face.tangent_axis();

        let half = extents[normal] * 0.5;
        let floor = half - dims.wall_thickness;
        let outer = half + dims.cutter_overshoot;

        let mut center = [0.0; 3];
        center[normal] = face.sign() * (floor + outer) * 0.5;

        let mut size = [0.0, 0.0, dims.length + 2.0 * dims.cutter_overshoot];
        size[normal] = outer - floor;
        size[tangent] = dims.cutter_width;

        CutterBox {
            face,
            spec: BoxSpec { center, size },
        }
    })
}
