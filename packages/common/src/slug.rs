//! Page slug normalization.

/// Normalize a user-entered slug to the canonical form: lowercase,
/// spaces collapsed to hyphens, single leading slash.
pub fn normalize_slug(input: &str) -> String {
    let trimmed = input.trim().trim_start_matches('/');
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push('/');

    let mut last_was_hyphen = false;
    for ch in trimmed.chars() {
        let mapped = match ch {
            ' ' | '_' => Some('-'),
            c if c.is_ascii_alphanumeric() => Some(c.to_ascii_lowercase()),
            '-' | '/' => Some(ch),
            _ => None,
        };
        if let Some(c) = mapped {
            if c == '-' && (last_was_hyphen || out.ends_with('/')) {
                continue;
            }
            last_was_hyphen = c == '-';
            out.push(c);
        }
    }

    // A bare "/" stays the root slug
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// File name for a published page, derived from its slug.
/// The root slug `/` maps to `index`.
pub fn slug_to_file_name(slug: &str) -> String {
    let stripped = slug.trim_matches('/');
    if stripped.is_empty() {
        "index".to_string()
    } else {
        stripped.replace('/', "-")
    }
}
