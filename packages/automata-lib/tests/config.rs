use automata_lib::{
    automaton::DEFAULT_ALPHABET,
    config::{AutomataConfig, LoggerConfig},
    logger::LogLevel,
};

#[test]
fn test_default_config() {
    let config = AutomataConfig::from_optional_file(None::<&str>).unwrap();

    assert_eq!(config, AutomataConfig::default());
    assert_eq!(config.get_alphabet(), DEFAULT_ALPHABET);
    assert!(!*config.get_logger().get_enabled());
    assert_eq!(*config.get_logger().get_log_level(), LogLevel::Warn);
}

#[test]
fn test_partial_config() {
    let config = AutomataConfig::from_toml(
        r#"
        alphabet = "abc"

        [logger]
        enabled = true
        log_level = "Debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.alphabet_symbols(), vec!['a', 'b', 'c']);
    assert_eq!(
        config.get_logger(),
        &LoggerConfig::default()
            .with_enabled(true)
            .with_log_level(LogLevel::Debug)
    );
}

#[test]
fn test_invalid_config() {
    assert!(AutomataConfig::from_toml("[logger]\nlog_level = \"Loud\"").is_err());
    assert!(AutomataConfig::from_toml("alphabet = 3").is_err());
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("automata_config_{}.toml", std::process::id()));
    std::fs::write(&path, "alphabet = \"xy\"\n").unwrap();

    let config = AutomataConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.get_alphabet(), "xy");
    assert_eq!(config.get_logger(), &LoggerConfig::default());
}

#[test]
fn test_config_builders() {
    let mut config = AutomataConfig::default().with_alphabet("ab");
    config.set_logger(LoggerConfig::default().with_log_file(true));

    assert_eq!(config.alphabet_symbols(), vec!['a', 'b']);
    assert!(*config.get_logger().get_log_file());
}
