//! JSON serialization for test results.

use crate::result::TestResult;

/// Serialize a test result (statistic, p-value, permutation counts and run
/// metadata) to a compact JSON string.
///
/// Skipped permutations serialize as `null` for `p_value` and `permutation`.
///
/// # Errors
///
/// Fails only if `serde_json` rejects a value; every field of [`TestResult`]
/// is a plain number or option.
pub fn to_json(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(result)
}

/// Pretty-printed form of [`to_json`], for reports read by people.
///
/// # Errors
///
/// Same as [`to_json`].
pub fn to_json_pretty(result: &TestResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
