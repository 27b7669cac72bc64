// tests/proxy_trajectory.rs
use glam::DVec3;
use particle_arms::{
    Arm, Error, HistoryStore, Identifier, IdentifierGenerator, TrajectoryCompiler,
    TrajectoryConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use tempfile::TempDir;

fn setup() -> (TrajectoryCompiler, Vec<Identifier>) {
    let config = TrajectoryConfig {
        arms: vec![Arm::new(2.0, 10.0), Arm::new(1.0, -30.0)],
        iterations: 40,
        initial_offset: DVec3::new(0.0, 1.0, 0.0),
        per_step_offset: DVec3::new(0.0, 0.1, 0.0),
        start_angle: 90.0,
        ..Default::default()
    };
    let ids = vec![
        Identifier::from_words([1, 2, 3, 4]),
        Identifier::from_words([-1, 0, i32::MIN, 255]),
    ];
    (TrajectoryCompiler::new(config), ids)
}

fn count_lines(path: &std::path::Path) -> usize {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count()
}

#[test]
fn test_proxy_script_layout() {
    let (compiler, ids) = setup();
    let script = compiler.emit_proxy(&ids).unwrap();

    let a = "00000001-0000-0002-0000-000300000004";
    let b = "ffffffff-0000-0000-8000-0000000000ff";
    assert_eq!(ids[0].to_string(), a);
    assert_eq!(ids[1].to_string(), b);

    assert_eq!(
        script.lines(),
        [
            "# Initialization".to_string(),
            "forceload add -1 -1 0 0".to_string(),
            "scoreboard objectives add particle_worker dummy \"Particle Worker\"".to_string(),
            format!(
                "execute unless entity {a} run summon marker 0 0 0 \
                 {{Tags:[\"particle_gen\"],Rotation:[90.0f,0f],UUID:[I; 1, 2, 3, 4]}}"
            ),
            format!(
                "execute unless entity {b} run summon marker 0 0 0 \
                 {{Tags:[\"particle_gen\"],Rotation:[90.0f,0f],UUID:[I; -1, 0, -2147483648, 255]}}"
            ),
            "# Rotate by self".to_string(),
            format!("execute as {a} at @s run tp @s ~ ~ ~ ~10.0 ~"),
            format!("execute as {b} at @s run tp @s ~ ~ ~ ~-30.0 ~"),
            "# Particle".to_string(),
            format!(
                "execute positioned ~0.0 ~1.0 ~0.0 rotated as {a} positioned ^ ^ ^2.0 \
                 rotated as {b} positioned ^ ^ ^1.0 \
                 run particle flame ~ ~0.1 ~ 0 0 0 0.1 0 force @a[distance=..50]"
            ),
            "# Recursion".to_string(),
            "scoreboard players add t particle_worker 1".to_string(),
            "execute if score t particle_worker matches 1..40 positioned ~0.0 ~0.1 ~0.0 \
             run function particle:trajectory"
                .to_string(),
            "execute if score t particle_worker matches 41 \
             run scoreboard players set t particle_worker 0"
                .to_string(),
        ]
    );
}

#[test]
fn test_tagging_chain_shares_positioning_prefix() {
    let (compiler, ids) = setup();
    let mut config = compiler.config().clone();
    config.tagging = true;
    config.tag_radius = 2.0;
    let script = TrajectoryCompiler::new(config).emit_proxy(&ids).unwrap();

    let runs: Vec<&str> = script
        .commands()
        .filter(|c| c.starts_with("execute positioned"))
        .collect();
    assert_eq!(runs.len(), 2, "particle chain and tag chain");

    let (particle_prefix, particle_action) = runs[0].split_once(" run ").unwrap();
    let (tag_prefix, tag_action) = runs[1].split_once(" run ").unwrap();
    assert_eq!(particle_prefix, tag_prefix);
    assert!(particle_action.starts_with("particle flame"));
    assert_eq!(
        tag_action,
        "tag @e[type=!#system:nothing,tag=!target,distance=..2.0] add target"
    );
}

#[test]
fn test_identifier_count_must_match_arms() {
    let (compiler, ids) = setup();
    assert!(matches!(
        compiler.emit_proxy(&ids[..1]),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_proxy_rejects_empty_input_before_touching_history() {
    let dir = TempDir::new().unwrap();
    let history = HistoryStore::new(dir.path().join("history.txt"));
    let mut minter = IdentifierGenerator::new(StdRng::seed_from_u64(1));

    let no_arms = TrajectoryCompiler::new(TrajectoryConfig {
        arms: Vec::new(),
        ..Default::default()
    });
    assert!(matches!(
        no_arms.compile_proxy(&mut minter, &history),
        Err(Error::NoArms)
    ));

    let no_steps = TrajectoryCompiler::new(TrajectoryConfig {
        iterations: 0,
        ..Default::default()
    });
    assert!(matches!(
        no_steps.compile_proxy(&mut minter, &history),
        Err(Error::ZeroIterations)
    ));

    assert!(!history.path().exists());
}

#[test]
fn test_history_grows_by_minted_count_and_never_repeats() {
    let dir = TempDir::new().unwrap();
    let history = HistoryStore::new(dir.path().join("history.txt"));
    let (compiler, _) = setup();
    let arms = compiler.config().arms.len();
    let mut minter = IdentifierGenerator::new(StdRng::seed_from_u64(42));

    compiler.compile_proxy(&mut minter, &history).unwrap();
    assert_eq!(count_lines(history.path()), arms);
    let first_run = history.load().unwrap();

    compiler.compile_proxy(&mut minter, &history).unwrap();
    assert_eq!(count_lines(history.path()), 2 * arms);
    let both_runs = history.load().unwrap();

    assert_eq!(both_runs.len(), 2 * arms, "no canonical string repeats");
    assert!(first_run.is_subset(&both_runs));
}

#[test]
fn test_reseeded_run_avoids_recorded_identifiers() {
    // Same seed twice: the second run would redraw the first run's identifiers
    // if the history were ignored.
    let dir = TempDir::new().unwrap();
    let history = HistoryStore::new(dir.path().join("history.txt"));
    let (compiler, _) = setup();

    let first = compiler
        .compile_proxy(&mut IdentifierGenerator::new(StdRng::seed_from_u64(9)), &history)
        .unwrap();
    let second = compiler
        .compile_proxy(&mut IdentifierGenerator::new(StdRng::seed_from_u64(9)), &history)
        .unwrap();

    let summoned = |script: &particle_arms::CommandList| -> HashSet<String> {
        script
            .commands()
            .filter_map(|c| c.strip_prefix("execute unless entity "))
            .filter_map(|rest| rest.split_whitespace().next())
            .map(str::to_string)
            .collect()
    };
    let (a, b) = (summoned(&first), summoned(&second));
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);
    assert!(a.is_disjoint(&b));
}
