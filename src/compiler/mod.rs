//! Compilers that turn a [`TrajectoryConfig`] into a [`CommandList`].
//!
//! The entry point is [`TrajectoryCompiler`]. Build it from a validated
//! [`TrajectoryConfig`], then call [`TrajectoryCompiler::compile`] with the
//! [`CompileMode`] chosen for the run. Both strategies share the arm chain, the
//! offset bookkeeping and the tag action defined here.
//!
//! * [`CompileMode::Direct`] precomputes every position and emits one particle
//!   command per step.
//! * [`CompileMode::Proxy`] emits a self-recursing script in which one marker
//!   entity per arm tracks that arm's rotation inside the engine.

mod direct;
mod proxy;

use crate::command::{CommandList, num};
use crate::config::TrajectoryConfig;
use crate::error::Result;
use crate::history::HistoryStore;
use crate::identifier::IdentifierGenerator;
use rand::Rng;
use std::fmt;

/// Emission strategy, selected once per run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompileMode {
    /// Client-side precomputed coordinates.
    #[default]
    Direct,
    /// Engine-side rotation through proxy markers.
    Proxy,
}

impl fmt::Display for CompileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => f.write_str("direct"),
            Self::Proxy => f.write_str("proxy"),
        }
    }
}

/// Compiles arm trajectories into engine commands.
#[derive(Clone, Debug)]
pub struct TrajectoryCompiler {
    config: TrajectoryConfig,
}

impl TrajectoryCompiler {
    /// Creates a compiler for `config`.
    ///
    /// The configuration is taken as-is; run [`TrajectoryConfig::validate`] first
    /// when it comes from user input.
    pub fn new(config: TrajectoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrajectoryConfig {
        &self.config
    }

    /// Runs the strategy selected by `mode`.
    ///
    /// `minter` and `history` are only consulted in [`CompileMode::Proxy`]; a
    /// direct run never touches the history store.
    pub fn compile<R: Rng>(
        &self,
        mode: CompileMode,
        minter: &mut IdentifierGenerator<R>,
        history: &HistoryStore,
    ) -> Result<CommandList> {
        match mode {
            CompileMode::Direct => Ok(self.compile_direct()),
            CompileMode::Proxy => self.compile_proxy(minter, history),
        }
    }

    /// `tag @e[...] add <tag>` for the configured radius and exclusions.
    fn tag_action(&self) -> String {
        let cfg = &self.config;
        format!(
            "tag @e[type=!{},tag=!{},distance=..{}] add {}",
            cfg.excluded_entity_type,
            cfg.tag_name,
            num(cfg.tag_radius),
            cfg.tag_name
        )
    }
}
