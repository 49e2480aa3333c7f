pub mod profile;
pub mod tags;

pub use profile::*;
pub use tags::*;
