/// Collapse interior whitespace (including NBSP) to single ASCII spaces and
/// trim both ends. Idempotent; empty input yields an empty string.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// De-obfuscate an email address: the site renders addresses with literal
/// `[at]` and `[dot]` tokens.
pub fn decode_email(text: &str) -> String {
    text.replace("[at]", "@").replace("[dot]", ".").trim().to_string()
}
