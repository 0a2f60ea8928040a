//! Logging helpers: single-line escaping for user text and the `audit` log target.
//!
//! Quest names come straight from chat messages and may contain newlines or control
//! characters; [`escape_log`] keeps each log record on one line and bounded in length.

/// Log target that `main` mirrors into `logging.audit_file` when configured.
pub const AUDIT_TARGET: &str = "audit";

/// Emit an info record on the audit target. Used for every quest board mutation.
macro_rules! audit_log {
    ($($arg:tt)*) => { log::info!(target: $crate::logutil::AUDIT_TARGET, $($arg)*); };
}
pub(crate) use audit_log;

const MAX_PREVIEW: usize = 120;

/// Escape a string for single-line logging:
/// - `\n`, `\r`, `\t` and backslash are escaped
/// - other control characters become `\xNN`
/// - anything past 120 characters is replaced by an ellipsis
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
