// tests/config.rs
use glam::DVec3;
use particle_arms::summary::header;
use particle_arms::{Arm, CompileMode, Error, TrajectoryConfig};

#[test]
fn test_defaults_match_interactive_tool() {
    let config = TrajectoryConfig::default();
    assert_eq!(config.particle, "flame");
    assert_eq!(config.particle_params, "0 0 0 0.1 0 force @a[distance=..50]");
    assert_eq!(config.arms, vec![Arm::new(1.0, 1.0)]);
    assert_eq!(config.iterations, 50);
    assert_eq!(config.tag_radius, 1.0);
    assert!(!config.tagging);
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_overrides_and_keeps_defaults() {
    let config = TrajectoryConfig::from_toml_str(
        r#"
        particle = "end_rod"
        iterations = 12
        start_angle = 45.0
        initial_offset = [0.0, 1.5, 0.0]
        tagging = true
        tag_radius = 2.0

        [[arms]]
        length = 2.0
        angle_step = 10.0

        [[arms]]
        length = 0.5
        angle_step = -40.0
        "#,
    )
    .unwrap();

    assert_eq!(config.particle, "end_rod");
    assert_eq!(config.iterations, 12);
    assert_eq!(config.initial_offset, DVec3::new(0.0, 1.5, 0.0));
    assert_eq!(config.per_step_offset, DVec3::ZERO);
    assert_eq!(config.arms, vec![Arm::new(2.0, 10.0), Arm::new(0.5, -40.0)]);
    assert_eq!(config.objective, "particle_worker");
}

#[test]
fn test_validation_rejects_bad_input() {
    let cases: [(&str, fn(&mut TrajectoryConfig)); 5] = [
        ("no arms", |c| c.arms.clear()),
        ("zero iterations", |c| c.iterations = 0),
        ("negative length", |c| c.arms[0].length = -1.0),
        ("empty particle", |c| c.particle = "  ".into()),
        ("zero radius", |c| {
            c.tagging = true;
            c.tag_radius = 0.0;
        }),
    ];

    for (name, mutate) in cases {
        let mut config = TrajectoryConfig::default();
        mutate(&mut config);
        assert!(
            matches!(config.validate(), Err(Error::InvalidConfig(_))),
            "{name} should be rejected"
        );
    }
}

#[test]
fn test_radius_is_ignored_without_tagging() {
    let config = TrajectoryConfig {
        tag_radius: 0.0,
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_bad_toml_is_a_config_error() {
    assert!(matches!(
        TrajectoryConfig::from_toml_str("iterations = \"many\""),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        TrajectoryConfig::from_toml_str("arms = []"),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn test_summary_header_lists_every_parameter() {
    let config = TrajectoryConfig {
        arms: vec![Arm::new(2.0, 10.0), Arm::new(1.0, 5.0)],
        tagging: true,
        tag_radius: 3.0,
        ..Default::default()
    };
    let lines = header(&config, CompileMode::Proxy);

    assert!(lines.iter().all(|l| l.starts_with('#')));
    assert!(lines.contains(
        &"#Use marker to calculate the position of particle effect? : Yes".to_string()
    ));
    assert!(lines.contains(&"#Detection radius for tagging each particle effect : 3.0".to_string()));
    assert!(lines.contains(&"#Robotic arm count : 2".to_string()));
    assert!(lines.contains(&"#Arm 2 Rotation Angle : 5.0".to_string()));
    assert!(lines.contains(&"#Z offset per rotation : 0.0".to_string()));

    let untagged = header(&TrajectoryConfig::default(), CompileMode::Direct);
    assert!(!untagged.iter().any(|l| l.contains("Detection radius")));
}
