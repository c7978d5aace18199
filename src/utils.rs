//! Formatting helpers for user-facing messages.

use crate::storage::RenamePlan;

/// Objects listed in the confirmation message before it is summarised
const CONFIRM_LISTED: usize = 5;

/// Format rename confirmation message with the first few moves
pub fn format_rename_message(plan: &RenamePlan) -> String {
    let mut message = format!("About to rename {} object(s):\n", plan.ops.len());
    for op in plan.ops.iter().take(CONFIRM_LISTED) {
        message.push_str(&format!("  {} → {}\n", op.from, op.to));
    }
    if plan.ops.len() > CONFIRM_LISTED {
        message.push_str(&format!(
            "  ... and {} more\n",
            plan.ops.len() - CONFIRM_LISTED
        ));
    }
    message.push_str("Continue?");
    message
}

/// Render `old → new` lines for at most `limit` pairs (0 = all), then a remainder line.
pub fn format_preview<'a>(
    pairs: impl ExactSizeIterator<Item = (&'a str, &'a str)>,
    limit: usize,
) -> String {
    let total = pairs.len();
    let shown = if limit == 0 { total } else { limit.min(total) };

    let mut out = String::new();
    for (old, new) in pairs.take(shown) {
        out.push_str(&format!("{old} → {new}\n"));
    }
    if total > shown {
        out.push_str(&format!("... and {} more\n", total - shown));
    }
    out
}
