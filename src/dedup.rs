//! Action deduplication.
//!
//! The Library of Congress (source system code 9) re-enters floor actions it
//! received from the chambers, usually with a boilerplate prefix ahead of the
//! chamber's own wording and with the Congressional Record references
//! dropped or rephrased. Those echoes are removed before classification so
//! the state machine sees each event once.

use regex::Regex;

use crate::error::Result;
use crate::types::RawAction;

/// Source system code of Library of Congress entries
const SOURCE_LOC: &str = "9";

/// Remove near-duplicate entries from a source-order (newest-first) action
/// list, then reorder chronologically (oldest-first) for classification.
///
/// Each action is compared against its immediate predecessor in source
/// order, whether or not that predecessor was kept. An action is dropped
/// when its text is empty, or when it is an LOC entry on the same date (and
/// a compatible time) whose stripped text is a trailing match of the
/// predecessor's stripped text.
pub fn dedupe_actions(actions: &[RawAction]) -> Result<Vec<RawAction>> {
    // Congressional Record references differ between the chamber entry and
    // the LOC echo, so they are stripped before comparing.
    let reference_re = Regex::new(r"\s*\((?:consideration: |text(?: of [^)]+)?: )?CR [^)]*\)")?;
    let whitespace_re = Regex::new(r"\s+")?;

    let strip = |text: &str| -> String {
        let text = reference_re.replace_all(text, "");
        whitespace_re.replace_all(text.trim(), " ").into_owned()
    };

    let mut kept: Vec<RawAction> = Vec::with_capacity(actions.len());
    for (idx, action) in actions.iter().enumerate() {
        if action.text.trim().is_empty() {
            continue;
        }
        if idx > 0 && action.source_system_code.as_deref() == Some(SOURCE_LOC) {
            let prev = &actions[idx - 1];
            let same_date = action.acted_at_date == prev.acted_at_date;
            let compatible_time = match (&action.acted_at_time, &prev.acted_at_time) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            };
            if same_date && compatible_time && strip(&action.text).ends_with(&strip(&prev.text)) {
                continue;
            }
        }
        kept.push(action.clone());
    }

    // The single, explicit chronological reorder before classification
    kept.reverse();
    Ok(kept)
}
