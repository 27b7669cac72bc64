use super::TrajectoryCompiler;
use crate::command::{CommandList, coords, num};
use crate::error::{Error, Result};
use crate::history::HistoryStore;
use crate::identifier::{Identifier, IdentifierGenerator};
use rand::Rng;
use tracing::debug;

impl TrajectoryCompiler {
    /// Emits a self-recursing script that rotates the arms inside the engine.
    ///
    /// One fresh identifier is minted per arm, avoiding everything in `history`
    /// and everything minted earlier in this run. The minted identifiers are
    /// appended to `history` before this returns.
    ///
    /// Fails with [`Error::NoArms`] or [`Error::ZeroIterations`] before the store
    /// is read when the configuration cannot drive a recursion.
    pub fn compile_proxy<R: Rng>(
        &self,
        minter: &mut IdentifierGenerator<R>,
        history: &HistoryStore,
    ) -> Result<CommandList> {
        self.check_proxy_input()?;

        let mut used = history.load()?;
        let ids = minter.mint_batch(self.config.arms.len(), &mut used)?;
        let commands = self.emit_proxy(&ids)?;
        history.append(&ids)?;

        debug!(
            arms = ids.len(),
            commands = commands.len(),
            history = %history.path().display(),
            "compiled proxy trajectory"
        );
        Ok(commands)
    }

    /// Builds the proxy script for already-minted identifiers.
    ///
    /// `ids[k]` names the marker of arm `k`, so `ids` must have one entry per arm.
    /// The script has five blocks, in this order:
    ///
    /// 1. Initialization: force-load the origin chunk and declare the counter.
    /// 2. Proxy creation: summon each marker unless it already exists.
    /// 3. Self rotation: turn each marker by its arm's angle step.
    /// 4. Particle: chain through every marker's facing, stepping forward by the
    ///    arm length, then spawn the particle (and optionally tag entities).
    /// 5. Recursion: bump the counter, re-invoke the function from the drifted
    ///    position while it is within `1..=iterations`, reset it one step later.
    pub fn emit_proxy(&self, ids: &[Identifier]) -> Result<CommandList> {
        self.check_proxy_input()?;
        let cfg = &self.config;
        if ids.len() != cfg.arms.len() {
            return Err(Error::InvalidConfig(format!(
                "expected {} identifiers, got {}",
                cfg.arms.len(),
                ids.len()
            )));
        }

        let mut commands = CommandList::new();
        let objective = &cfg.objective;

        commands.section("Initialization");
        commands.push("forceload add -1 -1 0 0");
        commands.push(format!(
            "scoreboard objectives add {objective} dummy \"Particle Worker\""
        ));
        for id in ids {
            commands.push(format!(
                "execute unless entity {id} run summon marker 0 0 0 \
                 {{Tags:[\"{}\"],Rotation:[{}f,0f],{}}}",
                cfg.marker_tag,
                num(cfg.start_angle),
                id.native_literal()
            ));
        }

        commands.section("Rotate by self");
        for (arm, id) in cfg.arms.iter().zip(ids) {
            commands.push(format!(
                "execute as {id} at @s run tp @s ~ ~ ~ ~{} ~",
                num(arm.angle_step)
            ));
        }

        commands.section("Particle");
        let chain = self.marker_chain(ids);
        commands.push(format!(
            "{chain} run particle {} ~ ~0.1 ~ {}",
            cfg.particle, cfg.particle_params
        ));
        if cfg.tagging {
            commands.push(format!("{chain} run {}", self.tag_action()));
        }

        commands.section("Recursion");
        let last = cfg.iterations;
        commands.push(format!("scoreboard players add t {objective} 1"));
        commands.push(format!(
            "execute if score t {objective} matches 1..{last} positioned {} run function {}",
            coords('~', cfg.per_step_offset),
            cfg.function
        ));
        commands.push(format!(
            "execute if score t {objective} matches {} run scoreboard players set t {objective} 0",
            u64::from(last) + 1
        ));

        Ok(commands)
    }

    /// `execute positioned <initial> rotated as <id> positioned ^ ^ ^<len> ...`,
    /// without the trailing `run` clause.
    fn marker_chain(&self, ids: &[Identifier]) -> String {
        let cfg = &self.config;
        let mut chain = format!("execute positioned {}", coords('~', cfg.initial_offset));
        for (arm, id) in cfg.arms.iter().zip(ids) {
            chain.push_str(&format!(
                " rotated as {id} positioned ^ ^ ^{}",
                num(arm.length)
            ));
        }
        chain
    }

    fn check_proxy_input(&self) -> Result<()> {
        if self.config.arms.is_empty() {
            return Err(Error::NoArms);
        }
        if self.config.iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        Ok(())
    }
}
