use sha2::{Digest, Sha256};

/// Trailing non-empty path segment of a profile URL, trailing slashes
/// stripped. `None` when the URL has no path beyond the host.
pub fn profile_slug(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(|segment| segment.to_string())
}

/// Filename for a raw capture: the sanitized URL slug when present, else a
/// short hash of the URL. Windows-safe and deterministic.
pub fn capture_filename(url: &str) -> String {
    let stem = match profile_slug(url) {
        Some(slug) => {
            let sanitized = sanitize_stem(&slug);
            if sanitized.is_empty() {
                short_hash(url)
            } else {
                sanitized
            }
        }
        None => short_hash(url),
    };
    format!("{stem}.html")
}

fn sanitize_stem(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.chars() {
        let c = if is_forbidden(c) { '_' } else { c };
        if c == '_' {
            if !prev_underscore {
                cleaned.push(c);
            }
            prev_underscore = true;
        } else {
            cleaned.push(c);
            prev_underscore = false;
        }
    }
    let mut stem = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if stem.len() > 80 {
        stem.truncate(80);
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
