//! Output Sanitizer
//!
//! Models routinely wrap valid JSON in markdown code fences. This stage
//! strips fence markers and nothing else; parsing and validation belong to
//! the report parser. Prose wrapped around the JSON beyond fences is a
//! documented gap, not handled here.

/// Strip markdown code-fence markers and trim surrounding whitespace.
///
/// Removes every "```json" marker (case-sensitive tag) together with the
/// whitespace that follows it, then every bare "```" marker. Idempotent:
/// sanitizing already-clean text is a no-op. Never fails.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find("```") {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 3..];
        rest = match after.strip_prefix("json") {
            Some(tagged) => tagged.trim_start(),
            None => after,
        };
    }
    out.push_str(rest);
    out.trim().to_string()
}
