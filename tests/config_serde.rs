use resilient_fs::{Backoff, LogLevel, PoolConfig, RetryPolicy, REMOVE_ATTEMPTS};
use std::time::Duration;

#[test]
fn retry_policy_defaults_fill_missing_fields() {
    let policy: RetryPolicy = serde_json::from_str("{}").unwrap();
    assert_eq!(policy, RetryPolicy::default());
    assert_eq!(policy.attempts, REMOVE_ATTEMPTS);
    assert_eq!(policy.backoff, Backoff::None);

    let policy: RetryPolicy = serde_json::from_str(r#"{"attempts": 5}"#).unwrap();
    assert_eq!(policy.attempts, 5);
}

#[test]
fn exponential_backoff_survives_json() {
    let policy = RetryPolicy::new(
        6,
        Backoff::Exponential {
            start: Duration::from_millis(10),
            max: Duration::from_millis(500),
        },
    );
    let json = serde_json::to_string(&policy).unwrap();
    assert!(json.contains("exponential"), "{json}");
    let back: RetryPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(back, policy);
    back.validate().unwrap();
}

#[test]
fn backoff_delays_double_up_to_cap() {
    let b = Backoff::Exponential {
        start: Duration::from_millis(10),
        max: Duration::from_millis(50),
    };
    let delays: Vec<_> = (0..5).map(|n| b.delay_for(n).unwrap().as_millis()).collect();
    assert_eq!(delays, vec![10, 20, 40, 50, 50]);
    assert_eq!(Backoff::None.delay_for(3), None);
    assert_eq!(Backoff::Fixed(Duration::from_millis(7)).delay_for(9), Some(Duration::from_millis(7)));
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(RetryPolicy::new(0, Backoff::None).validate().is_err());
    let bad_pool: PoolConfig = serde_json::from_str(r#"{"max_idle": 0}"#).unwrap();
    assert!(bad_pool.validate().is_err());
}

#[test]
fn zero_budget_still_runs_once() {
    assert_eq!(RetryPolicy::new(0, Backoff::None).effective_attempts(), 1);
}

#[test]
fn log_level_uses_lowercase_names() {
    assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    let lvl: LogLevel = serde_json::from_str("\"quiet\"").unwrap();
    assert_eq!(lvl, LogLevel::Quiet);
}
