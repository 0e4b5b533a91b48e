//! Shared key generation for storage backends.
//!
//! Key format: `{owner_id}/{unix_nanos}/{base}{ext}` where `base` is the
//! lower-cased sanitized file stem and `ext` is the original extension
//! including its dot. Any character outside `[A-Za-z0-9._-]` in either part is
//! replaced by `_`, so every backend stores the object under exactly this key.

use uuid::Uuid;

/// Name used when the client-supplied filename sanitizes to nothing.
pub const FALLBACK_FILENAME: &str = "uploaded_file";

/// Byte cap for a sanitized filename.
const MAX_FILENAME_BYTES: usize = 255;

/// Reduce a client-supplied filename to a single safe path component.
///
/// Directory parts and `.`/`..` segments are dropped (backslashes count as
/// separators), control characters are removed and the result is capped at 255
/// bytes, keeping the extension. Empty or root-like names become
/// [`FALLBACK_FILENAME`].
pub fn sanitize_filename(filename: &str) -> String {
    let normalized = filename.replace('\\', "/");
    let last_component = normalized
        .split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .last()
        .unwrap_or("");

    let cleaned: String = last_component.chars().filter(|c| !c.is_control()).collect();
    let sanitized = cap_filename(&cleaned);

    if sanitized.trim().is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    sanitized
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn cap_filename(filename: &str) -> String {
    if filename.len() <= MAX_FILENAME_BYTES {
        return filename.to_string();
    }
    let (stem, ext) = split_extension(filename);
    if ext.len() <= MAX_FILENAME_BYTES / 2 {
        format!("{}{}", truncate_to_bytes(stem, MAX_FILENAME_BYTES - ext.len()), ext)
    } else {
        truncate_to_bytes(filename, MAX_FILENAME_BYTES).to_string()
    }
}

/// Replace everything outside `[A-Za-z0-9._-]` with `_`.
fn key_safe(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Split a sanitized filename into stem and extension (extension keeps the dot).
fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) => filename.split_at(idx),
        None => (filename, ""),
    }
}

/// Generate a storage key for an owner's upload.
///
/// `filename` is sanitized again here so callers cannot produce a key outside
/// the owner's prefix by skipping [`sanitize_filename`].
pub fn generate_storage_key(owner_id: Uuid, timestamp_nanos: i64, filename: &str) -> String {
    let filename = sanitize_filename(filename);
    let (base, ext) = split_extension(&filename);
    let name = format!("{}{}", key_safe(&base.to_lowercase()), key_safe(ext));
    let name = if name == "." || name == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        name
    };
    format!("{}/{}/{}", owner_id, timestamp_nanos, name)
}
