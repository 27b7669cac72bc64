//! # particle-arms
//!
//! Compiles the trajectory of a chain of rotating "robotic arms" into command
//! scripts for a block game engine.
//!
//! Each arm spins at its own angular step; the tip of the chain traces a compound
//! curve. [`TrajectoryCompiler`] renders that curve either as precomputed
//! particle commands ([`CompileMode::Direct`]) or as a self-recursing script that
//! lets proxy marker entities do the rotating ([`CompileMode::Proxy`]). Proxy
//! markers need collision-free identifiers, minted by [`IdentifierGenerator`] and
//! remembered across runs by [`HistoryStore`].

pub mod arm;
pub mod command;
pub mod compiler;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod identifier;
pub mod summary;

pub use arm::*;
pub use command::CommandList;
pub use compiler::*;
pub use config::*;
pub use error::{Error, Result};
pub use history::*;
pub use identifier::*;
