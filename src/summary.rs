//! Human-readable parameter header prepended to generated scripts.

use crate::command::num;
use crate::compiler::CompileMode;
use crate::config::TrajectoryConfig;

const RULE: &str =
    "#=================================================================================";

/// Comment lines describing the parameters of a run.
///
/// Every line starts with `#` so the header can sit on top of the script without
/// affecting it.
pub fn header(config: &TrajectoryConfig, mode: CompileMode) -> Vec<String> {
    let yes_no = |b: bool| if b { "Yes" } else { "No" };
    let mut lines = vec![
        RULE.to_string(),
        "#This file was generated by particle-arms, a rotating-arm particle generator.".to_string(),
        RULE.to_string(),
        format!(
            "#Use marker to calculate the position of particle effect? : {}",
            yes_no(mode == CompileMode::Proxy)
        ),
        format!("#Particle Name : {}", config.particle),
        format!("#Particle effect parameters : {}", config.particle_params),
        format!(
            "#Automatically tag entities that the effect passes through? : {}",
            yes_no(config.tagging)
        ),
    ];

    if config.tagging {
        lines.push(format!(
            "#Detection radius for tagging each particle effect : {}",
            num(config.tag_radius)
        ));
    }

    lines.push(format!("#Starting angle : {}", num(config.start_angle)));
    for (axis, value) in ["X", "Y", "Z"].iter().zip(config.initial_offset.to_array()) {
        lines.push(format!("#Initial {axis} offset : {}", num(value)));
    }

    lines.push(format!("#Robotic arm count : {}", config.arms.len()));
    for (i, arm) in config.arms.iter().enumerate() {
        lines.push(format!("#Arm {} Length : {}", i + 1, num(arm.length)));
        lines.push(format!("#Arm {} Rotation Angle : {}", i + 1, num(arm.angle_step)));
    }

    lines.push(format!("#All arms rotation count : {}", config.iterations));
    for (axis, value) in ["X", "Y", "Z"].iter().zip(config.per_step_offset.to_array()) {
        lines.push(format!("#{axis} offset per rotation : {}", num(value)));
    }

    lines
}
