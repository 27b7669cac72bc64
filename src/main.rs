//! particle-arms - compile rotating-arm particle trajectories into engine commands

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::DVec3;
use particle_arms::{
    Arm, CompileMode, DEFAULT_HISTORY_FILE, HistoryStore, IdentifierGenerator, TrajectoryCompiler,
    TrajectoryConfig, summary,
};
use std::path::PathBuf;
use std::process;
use tracing::info;

/// Rotating-arm particle generator
#[derive(Parser, Debug)]
#[command(name = "particle-arms")]
#[command(author, version, about = "Compile rotating-arm particle trajectories into engine commands", long_about = None)]
struct Cli {
    /// Emission strategy
    #[arg(short, long, value_enum, default_value = "direct")]
    mode: ModeArg,

    /// TOML file with trajectory parameters; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Particle effect name
    #[arg(long)]
    particle: Option<String>,

    /// Trailing particle arguments, passed through verbatim
    #[arg(long, allow_hyphen_values = true)]
    params: Option<String>,

    /// Arm as LENGTH:STEP; repeat for more arms (replaces configured arms)
    #[arg(short, long = "arm", value_name = "LENGTH:STEP", allow_hyphen_values = true)]
    arms: Vec<Arm>,

    /// Number of rotations of all arms
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Offset added every rotation, as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3, allow_hyphen_values = true)]
    step_offset: Option<DVec3>,

    /// Initial offset, as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", value_parser = parse_vec3, allow_hyphen_values = true)]
    initial_offset: Option<DVec3>,

    /// Starting angle in degrees
    #[arg(long, allow_hyphen_values = true)]
    start_angle: Option<f64>,

    /// Tag entities the effect passes through
    #[arg(long)]
    tag: bool,

    /// Detection radius used for tagging
    #[arg(long)]
    tag_radius: Option<f64>,

    /// Function the proxy script re-invokes (proxy mode)
    #[arg(long)]
    function: Option<String>,

    /// Identifier history file (proxy mode)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Write the script here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Omit the parameter summary header
    #[arg(long)]
    no_header: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    /// Precompute every coordinate
    Direct,
    /// Rotate proxy markers inside the engine
    Proxy,
}

impl From<ModeArg> for CompileMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Direct => CompileMode::Direct,
            ModeArg::Proxy => CompileMode::Proxy,
        }
    }
}

impl Cli {
    fn init_logging(&self) {
        use tracing_subscriber::{EnvFilter, fmt};

        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Loads the config file (or defaults) and applies flag overrides.
    fn trajectory_config(&self) -> Result<TrajectoryConfig> {
        let mut config = match &self.config {
            Some(path) => TrajectoryConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TrajectoryConfig::default(),
        };

        if let Some(particle) = &self.particle {
            config.particle = particle.clone();
        }
        if let Some(params) = &self.params {
            config.particle_params = params.clone();
        }
        if !self.arms.is_empty() {
            config.arms = self.arms.clone();
        }
        if let Some(n) = self.iterations {
            config.iterations = n;
        }
        if let Some(offset) = self.step_offset {
            config.per_step_offset = offset;
        }
        if let Some(offset) = self.initial_offset {
            config.initial_offset = offset;
        }
        if let Some(angle) = self.start_angle {
            config.start_angle = angle;
        }
        if self.tag {
            config.tagging = true;
        }
        if let Some(radius) = self.tag_radius {
            config.tag_radius = radius;
        }
        if let Some(function) = &self.function {
            config.function = function.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_vec3(s: &str) -> std::result::Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("`{p}`: {e}")))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(DVec3::new(*x, *y, *z)),
        _ => Err(format!("expected X,Y,Z, got `{s}`")),
    }
}

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mode = CompileMode::from(cli.mode);
    let config = cli.trajectory_config()?;
    let compiler = TrajectoryCompiler::new(config);

    let history = HistoryStore::new(cli.history.clone());
    let mut minter = IdentifierGenerator::from_thread_rng();
    let commands = compiler
        .compile(mode, &mut minter, &history)
        .with_context(|| format!("Failed to compile {mode} trajectory"))?;

    let mut lines = Vec::new();
    if !cli.no_header {
        lines.extend(summary::header(compiler.config(), mode));
    }
    lines.extend(commands);
    let script = lines.join("\n") + "\n";

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), lines = lines.len(), "script written");
        }
        None => print!("{script}"),
    }

    Ok(())
}
