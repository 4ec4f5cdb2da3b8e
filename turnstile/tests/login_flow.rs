use std::sync::Arc;

use chrono::Duration;
use turnstile::{LockoutError, ManualClock, Turnstile, TurnstileBuilder};

const PASSWORD: &str = "correct horse battery staple";

fn setup() -> (Turnstile, Arc<ManualClock>) {
    let _ = tracing_subscriber::fmt::try_init();
    let clock = Arc::new(ManualClock::starting_now());
    let turnstile = TurnstileBuilder::new()
        .with_clock(clock.clone())
        .build()
        .expect("Failed to build Turnstile");
    (turnstile, clock)
}

fn login(turnstile: &Turnstile, email: &str, password: &str) -> Result<bool, LockoutError> {
    turnstile.guard(email, || password == PASSWORD)
}

#[test]
fn test_successful_login_resets_failures() {
    let (turnstile, _) = setup();

    for _ in 0..4 {
        assert_eq!(login(&turnstile, "user@test.com", "wrong"), Ok(false));
    }
    assert_eq!(turnstile.tracker().remaining_attempts("user@test.com"), 1);

    assert_eq!(login(&turnstile, "User@Test.com", PASSWORD), Ok(true));
    assert_eq!(turnstile.tracker().remaining_attempts("user@test.com"), 5);
}

#[test]
fn test_locked_account_rejects_even_correct_password() {
    let (turnstile, clock) = setup();

    for _ in 0..5 {
        assert_eq!(login(&turnstile, "user@test.com", "wrong"), Ok(false));
    }

    assert_eq!(
        login(&turnstile, "user@test.com", PASSWORD),
        Err(LockoutError::Locked {
            retry_after_seconds: 900
        })
    );

    clock.advance(Duration::seconds(299));
    assert_eq!(
        turnstile.check("USER@test.com"),
        Err(LockoutError::Locked {
            retry_after_seconds: 601
        })
    );

    clock.advance(Duration::seconds(601));
    assert_eq!(login(&turnstile, "user@test.com", PASSWORD), Ok(true));
}

#[test]
fn test_verification_skipped_while_locked() {
    let (turnstile, _) = setup();
    for _ in 0..5 {
        turnstile.on_failure("user@test.com");
    }

    let mut called = false;
    let result = turnstile.guard("user@test.com", || {
        called = true;
        true
    });
    assert!(result.is_err());
    assert!(!called);

    // Rejected attempts are not counted as failures.
    assert_eq!(
        turnstile.tracker().lockout_status("user@test.com").failed_attempts,
        5
    );
}

#[test]
fn test_lockout_error_converts_into_core_error() {
    let (turnstile, _) = setup();
    for _ in 0..5 {
        turnstile.on_failure("user@test.com");
    }

    let err: turnstile::Error = turnstile.check("user@test.com").unwrap_err().into();
    assert!(err.is_lockout());
    assert_eq!(err.retry_after_seconds(), Some(900));
}

#[test]
fn test_status_serializes_for_callers() {
    let (turnstile, _) = setup();
    let status = turnstile.on_failure("User@Test.com");

    let json = serde_json::to_value(&status).unwrap();
    assert_eq!(json["identifier"], "user@test.com");
    assert_eq!(json["failed_attempts"], 1);
    assert_eq!(json["remaining_attempts"], 4);
    assert_eq!(json["is_locked"], false);
}

#[test]
fn test_clones_share_state() {
    let (turnstile, _) = setup();
    let other = turnstile.clone();

    for _ in 0..5 {
        other.on_failure("user@test.com");
    }
    assert!(turnstile.check("user@test.com").is_err());
}
