//! Tests for building a client from the process environment.
//!
//! Kept in their own test binary: they change environment variables, which
//! every test in the same process would see.

use footballdata::{FootballClient, FootballError, API_KEY_ENV, API_URL_ENV, LEGACY_API_KEY_ENV};

#[test]
fn test_client_from_environment() {
    std::env::remove_var(API_KEY_ENV);
    std::env::remove_var(LEGACY_API_KEY_ENV);
    std::env::remove_var(API_URL_ENV);

    // No key anywhere.
    let err = FootballClient::from_env().unwrap_err();
    assert!(matches!(err, FootballError::Configuration(_)));
    let err = FootballClient::from_key_or_env(None).unwrap_err();
    assert!(matches!(err, FootballError::Configuration(_)));

    // A blank key counts as missing.
    std::env::set_var(API_KEY_ENV, "   ");
    let err = FootballClient::from_env().unwrap_err();
    assert!(matches!(err, FootballError::Configuration(_)));

    // The older variable is still honoured.
    std::env::set_var(LEGACY_API_KEY_ENV, "legacy-key");
    FootballClient::from_env().expect("legacy key should be accepted");

    // An explicit key needs no environment at all.
    std::env::remove_var(API_KEY_ENV);
    std::env::remove_var(LEGACY_API_KEY_ENV);
    FootballClient::from_key_or_env(Some("explicit-key")).expect("explicit key should be accepted");

    // Base URL override.
    std::env::set_var(API_KEY_ENV, "env-key");
    std::env::set_var(API_URL_ENV, "http://localhost:8080/v1");
    let client = FootballClient::from_env().expect("env key should be accepted");
    assert_eq!(client.base_url().as_str(), "http://localhost:8080/v1/");

    std::env::remove_var(API_KEY_ENV);
    std::env::remove_var(API_URL_ENV);
}
