// Slug derivation and validation
//
// A slug is lowercase alphanumerics separated by single hyphens. It doubles as
// the project folder name, so validation also rules out path tricks.

use crate::errors::{Error, Result};

/// Convert free text into a filesystem-safe slug of at most `max_len` chars.
///
/// Lowercases, turns every run of non-alphanumeric characters (and letters
/// with no lowercase form, such as `ℝ`) into one `-`,
/// trims hyphens at both ends, and truncates at a hyphen boundary when one
/// falls inside the limit. Returns an empty string when the text has no
/// alphanumerics.
pub fn slugify(text: &str, max_len: usize) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if is_slug_char(c) {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    truncate(&slug, max_len)
}

/// First of `base`, `base-2`, `base-3`, ... for which `taken` is false.
///
/// The base is shortened when needed so the suffixed slug stays within `max_len`.
pub fn unique_slug(base: &str, max_len: usize, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }

    let mut n: u32 = 2;
    loop {
        let suffix = format!("-{}", n);
        let room = max_len.saturating_sub(suffix.len()).max(1);
        let stem: String = base.chars().take(room).collect();
        let candidate = format!("{}{}", stem.trim_end_matches('-'), suffix);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Check that `slug` has the shape `slugify` produces.
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() {
        return Err(Error::invalid_slug(slug, "empty"));
    }
    if let Some(c) = slug
        .chars()
        .find(|c| !(*c == '-' || is_slug_char(*c)))
    {
        return Err(Error::invalid_slug(
            slug,
            format!("contains '{}'", c.escape_default()),
        ));
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Err(Error::invalid_slug(slug, "starts or ends with '-'"));
    }
    if slug.contains("--") {
        return Err(Error::invalid_slug(slug, "contains consecutive '-'"));
    }
    Ok(())
}

fn is_slug_char(c: char) -> bool {
    c.is_alphanumeric() && !c.is_uppercase()
}

fn truncate(slug: &str, max_len: usize) -> String {
    if slug.chars().count() <= max_len {
        return slug.to_string();
    }

    let cut: String = slug.chars().take(max_len).collect();
    let next_is_boundary = slug.chars().nth(max_len) == Some('-');
    let trimmed = match cut.rfind('-') {
        Some(idx) if !next_is_boundary && idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    trimmed.trim_end_matches('-').to_string()
}
