//! Free-text sanitization.
//!
//! Every free-text field is passed through [`sanitize_text`] before it is
//! stored or rendered into an email. Sanitization strips, it never
//! escapes: HTML entity escaping happens at template render time, which
//! keeps this function idempotent.

use std::sync::LazyLock;

use regex::Regex;

/// HTML tags, complete `<...>` sequences.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"<[^>]*>").unwrap()
});

/// `javascript:` URI scheme, any casing.
static JS_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)javascript:").unwrap()
});

/// Inline event-handler attributes (`onclick=`, `onLoad =`, ...). The word
/// boundary keeps words that merely end in `on` (e.g. `money=`) intact.
static EVENT_HANDLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"(?i)\bon\w+\s*=").unwrap()
});

/// Strip HTML tags, `javascript:` URIs and inline event-handler
/// attributes from free text, then trim surrounding whitespace.
///
/// The replacements run to a fixed point, so removals can never splice
/// a new malicious fragment together and a second pass over already
/// sanitized text is a no-op.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    let mut current = text.to_owned();

    loop {
        let pass = EVENT_HANDLER_RE
            .replace_all(
                &JS_URI_RE.replace_all(&TAG_RE.replace_all(&current, ""), ""),
                "",
            )
            .into_owned();

        if pass == current {
            break;
        }
        current = pass;
    }

    current.trim().to_owned()
}
