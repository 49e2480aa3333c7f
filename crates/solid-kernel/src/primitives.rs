//! Box primitive on top of truck's sweep API.
//!
//! truck has no built-in box; a box is a vertex swept three times.

use truck_modeling::builder;
use truck_modeling::topology::Solid;
use truck_modeling::{Point3, Vector3};

/// Create a box solid via successive translational sweeps.
/// One corner at `min`, extends by `size` along +X, +Y and +Z.
pub fn make_box_at(min: [f64; 3], size: [f64; 3]) -> Solid {
    let v = builder::vertex(Point3::new(min[0], min[1], min[2]));
    let edge = builder::tsweep(&v, Vector3::new(size[0], 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, size[1], 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, size[2]))
}
