use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use xform2d::rig_desc::parse_rig_json;
use xform2d::{Rig, Transform3x3};

const TEST_JSON: &str = r#"
    {
        "name": "octagon avatar",
        "limbs": [
            {
                "name": "body",
                "joint": [0, 0],
                "vertices": [-1,-2, 1,-2, 2,-1, 2,1, 1,2, -1,2, -2,1, -2,-1],
                "depth": 0
            },
            {
                "name": "neck",
                "parent": "body",
                "joint": [0, 2],
                "vertices": [-0.25,2, 0.25,2, 0.25,3, -0.25,3],
                "depth": 0.1
            },
            {
                "name": "head",
                "parent": "neck",
                "joint": [0, 3],
                "vertices": [-0.75,3, 0.75,3, 0.75,4.5, -0.75,4.5],
                "depth": 0.2,
                "angle_deg": -10
            },
            {
                "name": "upper_arm",
                "parent": "body",
                "joint": [2, 0.5],
                "vertices": [2,0.25, 3.5,0.25, 3.5,0.75, 2,0.75],
                "depth": -0.1
            },
            {
                "name": "forearm",
                "parent": "upper_arm",
                "joint": [3.5, 0.5],
                "vertices": [3.5,0.3, 5,0.3, 5,0.7, 3.5,0.7],
                "depth": -0.2
            }
        ]
    }
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Optional path to a rig description; the embedded avatar otherwise.
    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read rig description {path}"))?,
        None => TEST_JSON.to_string(),
    };

    let rig_desc = parse_rig_json(&json).context("failed to parse rig description")?;
    let mut rig = rig_desc.build()?;
    info!(
        name = rig_desc.name.as_deref().unwrap_or("unnamed"),
        limbs = rig.len(),
        "rig built"
    );

    println!("Rest pose:");
    print_rig(&rig);

    let Some(root) = rig.iter().next().map(|(id, _)| id) else {
        return Ok(());
    };
    let tip = rig.iter().last().map(|(id, _)| id).unwrap_or(root);

    // Raise the last limb to 60 degrees, 15 degrees per step.
    let mut steps = 1;
    while !rig.rotate_towards(tip, 60_f32.to_radians(), 15_f32.to_radians())? {
        steps += 1;
    }
    // Lean the whole rig by moving and scaling the root.
    rig.move_limb(root, 1.0, 0.0)?;
    rig.set_scale(root, 1.5)?;

    println!();
    println!("After {steps} steps on limb {}, moved and scaled:", tip.0);
    print_rig(&rig);

    let pivot = rig.limb(root)?.joint();
    let m = Transform3x3::rotate_about(pivot, 30.0, true);
    println!();
    println!("Rotate 30 deg about {pivot}:");
    print!("{m}");
    println!("det = {:.5}", m.determinant());
    println!("Inverse:");
    print!("{}", m.inverse()?);

    Ok(())
}

fn print_rig(rig: &Rig) {
    for (id, limb) in rig.iter() {
        let joint = limb.joint();
        println!(
            "  [{}] {:<10} joint=({:.3}, {:.3}) angle={:.1}deg scale={:.2}",
            id.0,
            limb.name(),
            joint.x,
            joint.y,
            limb.angle().to_degrees(),
            limb.scale()
        );
        for v in limb.vertices() {
            println!("        ({:>8.3}, {:>8.3}, {:>6.2})", v.x, v.y, v.z);
        }
    }
}
