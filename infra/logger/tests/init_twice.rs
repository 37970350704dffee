use chanlog::{Console, Level, LoggerError};

#[test]
fn init_twice_returns_subscriber_error() {
    Console::builder().level(Level::Info).init().expect("first init should succeed");

    let err = Console::builder().level(Level::Debug).init().expect_err("second init should fail");

    assert!(
        matches!(err, LoggerError::Subscriber { .. }),
        "expected subscriber error for second init"
    );
}
