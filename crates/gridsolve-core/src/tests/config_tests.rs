use crate::{ConfigError, DpConfig, MAX_EPISODES_PER_BATCH, MonteCarloConfig};

#[test]
fn default_yaml_matches_default_impls() {
    let dp = DpConfig::from_default_yaml().expect("default dp yaml should parse");
    assert_eq!(dp, DpConfig::default());

    let mc = MonteCarloConfig::from_default_yaml().expect("default monte carlo yaml should parse");
    assert_eq!(mc, MonteCarloConfig::default());
}

#[test]
fn partial_yaml_fills_in_defaults() {
    let dp = DpConfig::from_yaml_str("gamma: 0.5\n").expect("partial yaml should parse");
    assert_eq!(dp.gamma, 0.5);
    assert_eq!(dp.max_sweeps, DpConfig::default().max_sweeps);

    let mc = MonteCarloConfig::from_yaml_str("first_visit: false\nepsilon: 0.3\n")
        .expect("partial yaml should parse");
    assert!(!mc.first_visit);
    assert_eq!(mc.epsilon, 0.3);
    assert_eq!(mc.episodes_per_batch, 20);
}

#[test]
fn non_positive_theta_is_accepted() {
    let dp = DpConfig::from_yaml_str("theta: 0.0\n").expect("zero theta is valid");
    assert_eq!(dp.theta, 0.0);
    assert!(DpConfig::new(0.9, -1.0).validate().is_ok());
}

#[test]
fn out_of_range_values_are_rejected() {
    assert!(matches!(
        DpConfig::from_yaml_str("gamma: 1.5\n"),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        DpConfig::from_yaml_str("max_eval_sweeps: 0\n"),
        Err(ConfigError::Invalid(_))
    ));

    let too_many = format!("episodes_per_batch: {}\n", MAX_EPISODES_PER_BATCH + 1);
    assert!(matches!(
        MonteCarloConfig::from_yaml_str(&too_many),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        MonteCarloConfig::from_yaml_str("epsilon: -0.1\n"),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn malformed_yaml_reports_parse_error() {
    let err = DpConfig::from_yaml_str("gamma: [").expect_err("broken yaml must fail");
    assert!(matches!(err, ConfigError::Yaml(_)));
    assert!(err.to_string().starts_with("failed to parse config YAML"));

    let err = MonteCarloConfig::from_yaml_path("/nonexistent/monte_carlo.yaml")
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Io(_)));
}
