//! Articulated limbs posed with [`Transform3x3`].
//!
//! A [`Rig`] is a forest of limbs. Each limb owns its vertices and a joint
//! (the pivot it rotates and scales about). Any transform applied to a limb
//! is applied with the same matrix to all of its descendants, so a forearm
//! follows the upper arm it hangs from.
//!
//! Vertices are moved with [`Transform3x3::transform_point_preserve_z`];
//! their `z` is a draw depth and never changes.

use tracing::debug;

use crate::error::{XformError, XformResult};
use crate::mat3::Transform3x3;
use crate::vec3::Vector3;

/// Angle difference (radians) under which [`Rig::rotate_towards`] snaps to
/// the target.
pub const ANGLE_SNAP: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LimbId(pub usize);

#[derive(Debug, Clone)]
pub struct Limb {
    name: String,
    vertices: Vec<Vector3>,
    joint: Vector3,
    // Angle (radians) and uniform scale currently applied about the joint.
    angle: f32,
    scale: f32,
    parent: Option<LimbId>,
    children: Vec<LimbId>,
}

impl Limb {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }

    pub fn joint(&self) -> Vector3 {
        self.joint
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn parent(&self) -> Option<LimbId> {
        self.parent
    }

    pub fn children(&self) -> &[LimbId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct Rig {
    limbs: Vec<Limb>,
}

impl Rig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Adds a limb at rest (angle 0, scale 1). A parent, if given, must
    /// already be in the rig.
    pub fn add_limb(
        &mut self,
        name: impl Into<String>,
        vertices: Vec<Vector3>,
        joint: Vector3,
        parent: Option<LimbId>,
    ) -> XformResult<LimbId> {
        let id = LimbId(self.limbs.len());
        if let Some(p) = parent {
            self.limb_mut(p)?.children.push(id);
        }
        self.limbs.push(Limb {
            name: name.into(),
            vertices,
            joint,
            angle: 0.0,
            scale: 1.0,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    pub fn limb(&self, id: LimbId) -> XformResult<&Limb> {
        self.limbs.get(id.0).ok_or(XformError::LimbNotFound { index: id.0 })
    }

    fn limb_mut(&mut self, id: LimbId) -> XformResult<&mut Limb> {
        self.limbs.get_mut(id.0).ok_or(XformError::LimbNotFound { index: id.0 })
    }

    /// First limb with the given name. Names are not required to be unique;
    /// later limbs sharing a name are only reachable through their `LimbId`.
    pub fn find(&self, name: &str) -> Option<LimbId> {
        self.limbs.iter().position(|l| l.name == name).map(LimbId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LimbId, &Limb)> {
        self.limbs.iter().enumerate().map(|(i, l)| (LimbId(i), l))
    }

    /// Moves the vertices and joint of `id` and every descendant by `m`.
    pub fn apply_transform(&mut self, id: LimbId, m: &Transform3x3) -> XformResult<()> {
        self.limb(id)?;
        debug!(limb = id.0, "apply transform\n{m}");

        let mut stack = vec![id];
        while let Some(LimbId(i)) = stack.pop() {
            let limb = &mut self.limbs[i];
            for v in &mut limb.vertices {
                *v = m.transform_point_preserve_z(*v);
            }
            limb.joint = m.transform_point_preserve_z(limb.joint);
            stack.extend(limb.children.iter().copied());
        }
        Ok(())
    }

    pub fn move_limb(&mut self, id: LimbId, dx: f32, dy: f32) -> XformResult<()> {
        self.apply_transform(id, &Transform3x3::translate(dx, dy))
    }

    /// Rotates the limb about its joint so its angle becomes `angle`
    /// (radians). The previous angle is undone in the same matrix, so calling
    /// this twice with one value leaves the limb where it is. A non-finite
    /// angle is refused and the limb is left untouched.
    pub fn set_angle(&mut self, id: LimbId, angle: f32) -> XformResult<()> {
        let limb = self.limb(id)?;
        if !angle.is_finite() {
            return Err(XformError::DegenerateAngle { limb: id.0, angle });
        }
        let joint = limb.joint;
        let last = limb.angle;

        let m = Transform3x3::translate_by(joint)
            * Transform3x3::rotate(angle, false)
            * Transform3x3::rotate(-last, false)
            * Transform3x3::translate_by(-joint);
        debug!(limb = id.0, from = last, to = angle, "set angle");
        self.apply_transform(id, &m)?;
        self.limb_mut(id)?.angle = angle;
        Ok(())
    }

    /// Uniformly scales the limb about its joint so its scale becomes
    /// `scale`. A zero scale cannot be undone later and is refused.
    pub fn set_scale(&mut self, id: LimbId, scale: f32) -> XformResult<()> {
        let limb = self.limb(id)?;
        let joint = limb.joint;
        let ratio = scale / limb.scale;
        if ratio == 0.0 || !ratio.is_finite() {
            return Err(XformError::DegenerateScale { limb: id.0, scale });
        }

        self.apply_transform(id, &Transform3x3::scale_about(joint, ratio, ratio))?;
        self.limb_mut(id)?.scale = scale;
        Ok(())
    }

    /// Steps the limb's angle toward `target` by at most `max_step` radians.
    /// Returns `true` once the target has been reached.
    pub fn rotate_towards(&mut self, id: LimbId, target: f32, max_step: f32) -> XformResult<bool> {
        if !target.is_finite() {
            return Err(XformError::DegenerateAngle { limb: id.0, angle: target });
        }
        let diff = target - self.limb(id)?.angle;
        if diff.abs() <= ANGLE_SNAP {
            self.set_angle(id, target)?;
            return Ok(true);
        }

        let step = max_step.abs();
        if step >= diff.abs() {
            self.set_angle(id, target)?;
            return Ok(true);
        }

        let angle = self.limb(id)?.angle + diff.signum() * step;
        self.set_angle(id, angle)?;
        Ok(false)
    }
}
