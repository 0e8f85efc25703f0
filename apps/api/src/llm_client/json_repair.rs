//! Defensive parsing of JSON embedded in LLM output.
//!
//! Model output is untrusted: it may be wrapped in markdown fences, surrounded
//! by prose, or slightly malformed. Parsing proceeds in stages: strip fences,
//! cut out the outermost `[...]` span, parse, and if that fails run one repair
//! pass before giving up.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::llm_client::LlmError;

static BARE_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([{,]\s*)([A-Za-z_][A-Za-z0-9_]*)(\s*:)"#).expect("valid bare key regex")
});

static TRAILING_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\]}])").expect("valid trailing comma regex"));

/// Parses the first JSON array found in `text`.
pub fn parse_json_array(text: &str) -> Result<Vec<Value>, LlmError> {
    let unfenced = strip_json_fences(text);
    let span = locate_array(unfenced).ok_or(LlmError::MissingJson)?;

    match serde_json::from_str::<Vec<Value>>(span) {
        Ok(items) => Ok(items),
        Err(original) => {
            let repaired = repair_json(span);
            serde_json::from_str::<Vec<Value>>(&repaired).map_err(|_| LlmError::Parse(original))
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the slice from the first `[` to the last `]`.
fn locate_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Fixes the malformations models commonly produce: typographic quotes,
/// unquoted object keys and trailing commas.
fn repair_json(text: &str) -> String {
    let normalized = text.replace(|c: char| c == '\u{201C}' || c == '\u{201D}', "\"");
    let quoted = BARE_KEY_RE.replace_all(&normalized, r#"$1"$2"$3"#);
    TRAILING_COMMA_RE.replace_all(&quoted, "$1").into_owned()
}
