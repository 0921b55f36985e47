//! Token usage normalization

use super::value::count_field;
use crate::protocol::UsageSummary;
use serde_json::Value;

/// Key of the nested object carrying cache counters
const INPUT_DETAILS_KEY: &str = "input_token_details";

/// Normalize usage metadata into a [`UsageSummary`].
///
/// Returns `None` only when the metadata itself is absent or `null`; any
/// present value yields a summary with missing counters defaulted to 0.
pub fn normalize_usage(usage: Option<&Value>) -> Option<UsageSummary> {
    let usage = usage.filter(|u| !u.is_null())?;
    let details = usage.get(INPUT_DETAILS_KEY);

    Some(UsageSummary {
        input: count_field(Some(usage), "input_tokens"),
        output: count_field(Some(usage), "output_tokens"),
        total: count_field(Some(usage), "total_tokens"),
        cache_read: count_field(details, "cache_read"),
        cache_creation: count_field(details, "cache_creation"),
    })
}
