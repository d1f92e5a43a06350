pub mod guest;
pub mod wedding;

/// Escapes `%`, `_` and `\` so `value` matches literally inside a LIKE pattern.
#[must_use]
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
