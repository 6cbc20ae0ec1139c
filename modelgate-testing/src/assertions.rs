// Assertions for model state

use crate::ModelState;

/// Assert that no errors were collected
pub fn assert_valid(state: &ModelState) {
    assert!(state.is_valid(), "Expected a valid model state, got:\n{}", state);
}

/// Assert the total number of errors
pub fn assert_error_count(state: &ModelState, expected: usize) {
    assert_eq!(
        state.count(),
        expected,
        "Expected {} errors, got {}:\n{}",
        expected,
        state.count(),
        state
    );
}

/// Assert that `key` has an error with `message`
pub fn assert_error(state: &ModelState, key: &str, message: &str) {
    assert!(
        state.errors(key).iter().any(|m| m == message),
        "Expected error '{}' for '{}', got:\n{}",
        message,
        key,
        state
    );
}

/// Assert that `key` has no errors
pub fn assert_valid_field(state: &ModelState, key: &str) {
    assert!(
        state.is_valid_field(key),
        "Expected '{}' to be valid, got {:?}",
        key,
        state.errors(key)
    );
}
