use serde::Deserialize;
use tracing::warn;

use crate::error::{XformError, XformResult};
use crate::rig::Rig;
use crate::vec3::Vector3;

// `[x0, y0, x1, y1, ...]`
type FlatVerts = Vec<f32>;

#[derive(Debug, Clone, Deserialize)]
pub struct RigDesc {
    #[serde(default)]
    pub name: Option<String>,
    pub limbs: Vec<LimbDesc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimbDesc {
    pub name: String,
    /// Name of a limb listed earlier in the same description.
    #[serde(default)]
    pub parent: Option<String>,
    pub joint: [f32; 2],
    pub vertices: FlatVerts,
    /// Draw depth carried in every vertex's `z`.
    #[serde(default)]
    pub depth: f32,
    /// Starting pose about the joint, in degrees.
    #[serde(default)]
    pub angle_deg: f32,
}

pub fn parse_rig_json(json: &str) -> XformResult<RigDesc> {
    Ok(serde_json::from_str(json)?)
}

impl LimbDesc {
    fn vertices(&self) -> XformResult<Vec<Vector3>> {
        if self.vertices.len() % 2 != 0 {
            return Err(XformError::BadVertexList {
                limb: self.name.clone(),
                len: self.vertices.len(),
            });
        }
        Ok(self
            .vertices
            .chunks_exact(2)
            .map(|xy| Vector3::new(xy[0], xy[1], self.depth))
            .collect())
    }
}

impl RigDesc {
    /// Builds the rig at rest, then applies each limb's `angle_deg` in listing
    /// order (parents first, so a child's pose is taken about its already
    /// moved joint).
    ///
    /// A parent name that does not match an earlier limb is logged and the
    /// limb becomes a root. A repeated limb name is logged too; a parent
    /// lookup by that name finds the first limb carrying it.
    pub fn build(&self) -> XformResult<Rig> {
        let mut rig = Rig::new();
        let mut ids = Vec::with_capacity(self.limbs.len());

        for limb_desc in &self.limbs {
            let parent = match &limb_desc.parent {
                Some(name) => {
                    let found = rig.find(name);
                    if found.is_none() {
                        warn!(
                            limb = %limb_desc.name,
                            parent = %name,
                            "parent not found, treating limb as a root"
                        );
                    }
                    found
                }
                None => None,
            };
            if rig.find(&limb_desc.name).is_some() {
                warn!(limb = %limb_desc.name, "duplicate limb name, children bind to the first");
            }
            let joint = Vector3::from_xy(limb_desc.joint[0], limb_desc.joint[1]);
            ids.push(rig.add_limb(limb_desc.name.clone(), limb_desc.vertices()?, joint, parent)?);
        }

        for (id, limb_desc) in ids.into_iter().zip(&self.limbs) {
            if limb_desc.angle_deg != 0.0 {
                rig.set_angle(id, limb_desc.angle_deg.to_radians())?;
            }
        }
        Ok(rig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{assert_vec_near, xy_rounded};

    const ARM_JSON: &str = r#"
        {
            "name": "arm",
            "limbs": [
                {
                    "name": "upper", "joint": [0, 0], "depth": 1,
                    "vertices": [0,0, 2,0, 2,0.5, 0,0.5]
                },
                {
                    "name": "fore", "parent": "upper", "joint": [2, 0], "angle_deg": 90,
                    "vertices": [2,0, 4,0, 4,0.5, 2,0.5]
                }
            ]
        }
    "#;

    #[test]
    fn parse_defaults() {
        let desc = parse_rig_json(ARM_JSON).unwrap();
        assert_eq!(desc.name.as_deref(), Some("arm"));
        assert_eq!(desc.limbs.len(), 2);
        assert_eq!(desc.limbs[0].parent, None);
        assert_eq!(desc.limbs[0].angle_deg, 0.0);
        assert_eq!(desc.limbs[1].depth, 0.0);
    }

    #[test]
    fn build_applies_pose_about_joint() {
        let rig = parse_rig_json(ARM_JSON).unwrap().build().unwrap();
        let upper = rig.find("upper").unwrap();
        let fore = rig.find("fore").unwrap();
        assert_eq!(rig.limb(fore).unwrap().parent(), Some(upper));
        assert!(rig.limb(upper).unwrap().vertices().iter().all(|v| v.z == 1.0));
        assert_eq!(
            xy_rounded(rig.limb(fore).unwrap().vertices()),
            vec![(2.0, 0.0), (2.0, 2.0), (1.5, 2.0), (1.5, 0.0)]
        );
        assert_vec_near(rig.limb(fore).unwrap().joint(), Vector3::from_xy(2.0, 0.0), 1e-6);
    }

    #[test]
    fn unknown_parent_becomes_root() {
        let json = r#"{
            "limbs": [ { "name": "a", "parent": "nope", "joint": [0, 0], "vertices": [] } ]
        }"#;
        let rig = parse_rig_json(json).unwrap().build().unwrap();
        assert_eq!(rig.limb(rig.find("a").unwrap()).unwrap().parent(), None);
    }

    #[test]
    fn odd_vertex_list_is_an_error() {
        let json = r#"{ "limbs": [ { "name": "bad", "joint": [0, 0], "vertices": [1, 2, 3] } ] }"#;
        let err = parse_rig_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, XformError::BadVertexList { len: 3, .. }));
    }

    #[test]
    fn duplicate_name_binds_children_to_first() {
        let json = r#"{
            "limbs": [
                { "name": "arm", "joint": [0, 0], "vertices": [0, 0] },
                { "name": "arm", "joint": [5, 0], "vertices": [5, 0] },
                { "name": "hand", "parent": "arm", "joint": [1, 0], "vertices": [1, 0] }
            ]
        }"#;
        let rig = parse_rig_json(json).unwrap().build().unwrap();
        assert_eq!(rig.len(), 3);
        let hand = rig.find("hand").unwrap();
        let parent = rig.limb(hand).unwrap().parent().unwrap();
        assert_eq!(rig.limb(parent).unwrap().joint(), Vector3::ZERO);
        assert_eq!(rig.limb(parent).unwrap().children(), &[hand]);
    }

    #[test]
    fn out_of_range_pose_is_an_error() {
        // 1e39 overflows f32, so the pose angle parses as infinity.
        let json = r#"{
            "limbs": [ { "name": "a", "joint": [0, 0], "vertices": [1, 0], "angle_deg": 1e39 } ]
        }"#;
        let err = parse_rig_json(json).unwrap().build().unwrap_err();
        assert!(matches!(err, XformError::DegenerateAngle { limb: 0, .. }));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_rig_json("{ \"limbs\": 4 }"), Err(XformError::RigJson(_))));
    }
}
