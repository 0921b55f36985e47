//! Text formatting for token counts and field labels

use crate::protocol::UsageSummary;

/// Group digits in threes, e.g. `1234567` → `1,234,567`
pub fn group_thousands(n: u64, separator: &str) -> String {
    let digits = n.to_string();
    if separator.is_empty() || digits.len() <= 3 {
        return digits;
    }

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// One-line token usage summary.
///
/// `1,200 in / 80 out (1,280 total)`, followed by
/// ` • Cache: 1000 read, 0 created` when tokens were read from cache.
pub fn format_token_line(usage: &UsageSummary, separator: &str) -> String {
    let mut line = format!(
        "{} in / {} out ({} total)",
        group_thousands(usage.input, separator),
        group_thousands(usage.output, separator),
        group_thousands(usage.total, separator),
    );

    if usage.has_cache_activity() {
        line.push_str(&format!(
            " • Cache: {} read, {} created",
            usage.cache_read, usage.cache_creation
        ));
    }

    line
}

/// Turn a snake_case key into a title-cased label: `blood_pressure` → `Blood Pressure`
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
