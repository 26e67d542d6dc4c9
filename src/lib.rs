// Library crate root.
//
// The transform core (`vec3`, `mat3`) has no dependencies beyond error types.
// `rig` builds articulated limbs on top of it, and `rig_desc` (feature
// `rig-json`) reads rig descriptions for the demo binary in src/main.rs.

pub mod error;
pub mod mat3;
pub mod rig;
#[cfg(feature = "rig-json")]
pub mod rig_desc;
pub mod vec3;

pub use error::{XformError, XformResult};
pub use mat3::{SINGULAR_EPSILON, Transform3x3};
pub use rig::{Limb, LimbId, Rig};
pub use vec3::Vector3;

#[cfg(test)]
pub mod test_helpers;
