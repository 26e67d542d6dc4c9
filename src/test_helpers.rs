use approx::abs_diff_eq;

use crate::mat3::Transform3x3;
use crate::vec3::Vector3;

pub fn vec_near(a: Vector3, b: Vector3, eps: f32) -> bool {
    abs_diff_eq!(a.x, b.x, epsilon = eps)
        && abs_diff_eq!(a.y, b.y, epsilon = eps)
        && abs_diff_eq!(a.z, b.z, epsilon = eps)
}

#[track_caller]
pub fn assert_vec_near(actual: Vector3, expected: Vector3, eps: f32) {
    assert!(
        vec_near(actual, expected, eps),
        "expected {expected}, got {actual} (eps {eps})"
    );
}

#[track_caller]
pub fn assert_mat_near(actual: &Transform3x3, expected: &Transform3x3, eps: f32) {
    for r in 0..3 {
        for c in 0..3 {
            assert!(
                abs_diff_eq!(actual[(r, c)], expected[(r, c)], epsilon = eps),
                "entry ({r}, {c}) differs (eps {eps})\nexpected:\n{expected}got:\n{actual}"
            );
        }
    }
}

/// Flattens `(x, y)` of each vertex, rounded to 3 decimals, for readable
/// comparisons of posed meshes.
pub fn xy_rounded(vertices: &[Vector3]) -> Vec<(f32, f32)> {
    let round = |v: f32| (v * 1000.0).round() / 1000.0;
    vertices.iter().map(|v| (round(v.x), round(v.y))).collect()
}
