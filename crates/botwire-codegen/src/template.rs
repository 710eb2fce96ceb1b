//! `{key}` placeholder substitution for node templates
//!
//! Placeholders are resolved by scanning the template once and looking each
//! complete key up, so a key that is a prefix of another (`{text}` vs
//! `{text_alt}`) can never be partially replaced. Braces that do not enclose
//! an identifier are copied through unchanged.

/// Whether `key` can appear inside a placeholder
fn is_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render `template`, replacing every `{key}` with `lookup(key)`.
///
/// Keys the lookup does not know render as the empty string.
pub fn render<'v, F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'v str>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_key(&after[..close]) => {
                out.push_str(lookup(&after[..close]).unwrap_or(""));
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Keys referenced by a template, in order of first appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_key(&after[..close]) => {
                let key = &after[..close];
                if !keys.contains(&key) {
                    keys.push(key);
                }
                rest = &after[close + 1..];
            }
            _ => rest = after,
        }
    }
    keys
}
