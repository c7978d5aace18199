// Path helpers shared across storage operations.
//
// Object paths are relative to the operator root and use '/' separators;
// directories always end with '/'. The root directory itself is "/".

/// Normalize a user supplied path into an operator path.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    let is_dir = trimmed.ends_with('/');
    let segments: Vec<&str> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if segments.is_empty() {
        return "/".to_string();
    }

    let mut normalized = segments.join("/");
    if is_dir {
        normalized.push('/');
    }
    normalized
}

/// Ensure the path is expressed as a directory (trailing '/').
pub fn as_dir_path(path: &str) -> String {
    let normalized = normalize_path(path);
    if normalized.ends_with('/') {
        normalized
    } else {
        format!("{normalized}/")
    }
}

/// Last segment of an object path.
pub fn object_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Directory part of an object path including the trailing '/', or "" at the root.
pub fn parent_dir_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[..=idx],
        None => "",
    }
}

/// Join a directory ("" or "/" for the root) and an object name.
pub fn build_object_path(dir: &str, name: &str) -> String {
    let dir = dir.trim_start_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Split `name` into stem and extension (with its dot).
///
/// Dotfiles have no extension, and an all-digit tail such as `.001` is a
/// trailing number rather than an extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && !is_trailing_number(&name[idx + 1..]) => name.split_at(idx),
        _ => (name, ""),
    }
}

fn is_trailing_number(tail: &str) -> bool {
    !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit())
}
