use super::TrajectoryCompiler;
use crate::command::{CommandList, coords};
use tracing::debug;

impl TrajectoryCompiler {
    /// Precomputes every step and emits one particle command per iteration.
    ///
    /// Each position is the sum of all arm displacements at that step, shifted by
    /// the initial offset and the accumulated drift, rounded to two decimals and
    /// written as local (`^`) coordinates. With tagging enabled every particle
    /// command is followed by a tag command at the same position.
    ///
    /// Produces exactly `iterations` commands (twice that with tagging), in step
    /// order, and no header or footer lines. Deterministic.
    pub fn compile_direct(&self) -> CommandList {
        let cfg = &self.config;
        let tag_action = cfg.tagging.then(|| self.tag_action());
        let mut commands = CommandList::new();

        for position in cfg.chain().positions(cfg.iterations) {
            let at = coords('^', position);
            commands.push(format!(
                "particle {} {at} {}",
                cfg.particle, cfg.particle_params
            ));
            if let Some(action) = &tag_action {
                commands.push(format!("execute positioned {at} run {action}"));
            }
        }

        debug!(
            iterations = cfg.iterations,
            arms = cfg.arms.len(),
            commands = commands.len(),
            "compiled direct trajectory"
        );
        commands
    }
}
