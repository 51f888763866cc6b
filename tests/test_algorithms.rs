//! End-to-end runs of the algorithm drivers.

use qsim_rs::Strategy;
use qsim_rs::algorithms::{
    AlgorithmError, DeutschJozsa, Grover, GroverConfig, GroverOracle, OracleKind, Shor,
    ShorConfig,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================
// Deutsch-Jozsa
// ============================================================

#[test]
fn test_deutsch_jozsa_constant_ten_qubits() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in [OracleKind::ConstantZero, OracleKind::ConstantOne] {
            let outcome = DeutschJozsa::new(10, kind).unwrap().run(&mut rng).unwrap();
            assert_eq!(outcome.measurement, 0, "{kind:?} seed {seed}");
            assert!(outcome.is_constant());
        }
    }
}

#[test]
fn test_deutsch_jozsa_balanced_ten_qubits() {
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        for kind in [OracleKind::BalancedMidpoint, OracleKind::BalancedParity] {
            let outcome = DeutschJozsa::new(10, kind).unwrap().run(&mut rng).unwrap();
            assert_ne!(outcome.measurement, 0, "{kind:?} seed {seed}");
            assert!(!outcome.is_constant());
        }
    }
}

#[test]
fn test_deutsch_jozsa_composite_strategy() {
    let mut rng = StdRng::seed_from_u64(12);
    let dj = DeutschJozsa::new(5, OracleKind::BalancedMidpoint)
        .unwrap()
        .with_strategy(Strategy::Composite);
    assert!(!dj.run(&mut rng).unwrap().is_constant());
}

// ============================================================
// Grover
// ============================================================

#[test]
fn test_grover_success_rate() {
    let mut rng = StdRng::seed_from_u64(2024);
    for strategy in [Strategy::Bit, Strategy::Matrix] {
        let config = GroverConfig {
            strategy,
            ..GroverConfig::default()
        };
        let grover = Grover::new(GroverOracle::new(4, 11).unwrap(), config);
        let trials = 200;
        let hits = (0..trials)
            .filter(|_| grover.run_once(&mut rng).unwrap() == 11)
            .count();
        assert!(
            hits as f64 >= 0.9 * trials as f64,
            "{strategy:?}: {hits}/{trials}"
        );
    }
}

#[test]
fn test_grover_run_reports_answer() {
    let mut rng = StdRng::seed_from_u64(6);
    let oracle = GroverOracle::from_answer(13);
    assert_eq!(oracle.bit_count(), 4);
    let outcome = Grover::new(oracle, GroverConfig::default())
        .run(&mut rng)
        .unwrap();
    assert_eq!(outcome.answer, 13);
    assert!(outcome.attempts >= 1);
    assert_eq!(
        oracle.answer_register().unwrap().probabilities()[13],
        1.0
    );
}

// ============================================================
// Shor
// ============================================================

#[test]
fn test_shor_factors_fifteen() {
    let mut rng = StdRng::seed_from_u64(15);
    let config = ShorConfig {
        max_attempts: 50,
        ..ShorConfig::default()
    };
    let outcome = Shor::new(15, config).unwrap().run(&mut rng).unwrap();
    assert_eq!(outcome.factors, [3, 5]);
    assert_eq!(outcome.number, 15);
    assert_eq!(outcome.period % 2, 0);
}

#[test]
fn test_shor_factors_twenty_one() {
    let mut rng = StdRng::seed_from_u64(21);
    let config = ShorConfig {
        max_attempts: 50,
        ..ShorConfig::default()
    };
    let outcome = Shor::new(21, config).unwrap().run(&mut rng).unwrap();
    assert_eq!(outcome.factors, [3, 7]);
}

#[test]
fn test_shor_rejects_small_numbers() {
    for n in [0, 1, 2] {
        assert!(matches!(
            Shor::new(n, ShorConfig::default()),
            Err(AlgorithmError::InvalidInput { .. })
        ));
    }
}

// ============================================================
// Configuration
// ============================================================

#[test]
fn test_config_serde() {
    let config: GroverConfig = serde_json::from_str(r#"{"strategy": "matrix"}"#).unwrap();
    assert_eq!(config.strategy, Strategy::Matrix);
    assert_eq!(config.max_attempts, GroverConfig::default().max_attempts);

    let config = ShorConfig {
        max_attempts: 7,
        strategy: Strategy::Composite,
    };
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"max_attempts":7,"strategy":"composite"}"#);
    assert_eq!(serde_json::from_str::<ShorConfig>(&json).unwrap(), config);

    let kind: OracleKind = serde_json::from_str(r#""balanced_parity""#).unwrap();
    assert_eq!(kind, OracleKind::BalancedParity);
}
