use std::path::{Component, Path};
use once_cell::sync::Lazy;
use regex::Regex;

pub mod path_security;
pub mod transfer;

static COPY_SUFFIX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"(\s?\(\d+\))+$").ok());

const DISPLAY_PATH_LIMIT: usize = 60;

/// Strips trailing " (N)" disambiguation groups: "photo (1) (2)" -> "photo".
pub fn strip_copy_suffix(stem: &str) -> String {
    let stripped = match COPY_SUFFIX.as_ref() {
        Some(re) => re.replace(stem, "").into_owned(),
        None => stem.to_string(),
    };
    // "(1).jpg" has nothing left to keep, leave it alone
    if stripped.is_empty() {
        stem.to_string()
    } else {
        stripped
    }
}

/// "name (n).ext", or "name.ext" for n == 0.
pub fn numbered_file_name(stem: &str, ext: Option<&str>, n: usize) -> String {
    let base = if n == 0 {
        stem.to_string()
    } else {
        format!("{} ({})", stem, n)
    };
    match ext {
        Some(ext) if !ext.is_empty() => format!("{}.{}", base, ext),
        _ => base,
    }
}

/// Shortens long paths to the root plus the last two components.
pub fn shorten_for_display(path: &Path) -> String {
    let full = path.to_string_lossy().to_string();
    if full.chars().count() <= DISPLAY_PATH_LIMIT {
        return full;
    }

    let mut root = String::new();
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => root.push_str(&p.as_os_str().to_string_lossy()),
            Component::RootDir => {}
            other => parts.push(other.as_os_str().to_string_lossy().to_string()),
        }
    }
    if parts.len() <= 2 {
        return full;
    }

    let sep = std::path::MAIN_SEPARATOR;
    format!("{}{}...{}{}", root, sep, sep, parts[parts.len() - 2..].join(&sep.to_string()))
}

pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Natural sorting comparison for strings (handles numeric segments correctly).
/// Zero-allocation: uses byte-slice indices instead of temporary Strings.
pub fn compare_natural(a: &str, b: &str) -> std::cmp::Ordering {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();
    let mut ai = 0;
    let mut bi = 0;

    loop {
        match (a_bytes.get(ai), b_bytes.get(bi)) {
            (Some(&ac), Some(&bc)) => {
                if ac.is_ascii_digit() && bc.is_ascii_digit() {
                    let a_start = ai;
                    while ai < a_bytes.len() && a_bytes[ai].is_ascii_digit() {
                        ai += 1;
                    }
                    let b_start = bi;
                    while bi < b_bytes.len() && b_bytes[bi].is_ascii_digit() {
                        bi += 1;
                    }

                    let mut a_trimmed = a_start;
                    while a_trimmed < ai - 1 && a_bytes[a_trimmed] == b'0' {
                        a_trimmed += 1;
                    }
                    let mut b_trimmed = b_start;
                    while b_trimmed < bi - 1 && b_bytes[b_trimmed] == b'0' {
                        b_trimmed += 1;
                    }

                    // Longer number = bigger
                    let a_len = ai - a_trimmed;
                    let b_len = bi - b_trimmed;
                    if a_len != b_len {
                        return a_len.cmp(&b_len);
                    }
                    let cmp = a_bytes[a_trimmed..ai].cmp(&b_bytes[b_trimmed..bi]);
                    if cmp != std::cmp::Ordering::Equal {
                        return cmp;
                    }
                    // Equal value: fewer leading zeros comes first
                    let a_total = ai - a_start;
                    let b_total = bi - b_start;
                    if a_total != b_total {
                        return a_total.cmp(&b_total);
                    }
                } else {
                    let ac_low = ac.to_ascii_lowercase();
                    let bc_low = bc.to_ascii_lowercase();
                    if ac_low != bc_low {
                        return ac_low.cmp(&bc_low);
                    }
                    ai += 1;
                    bi += 1;
                }
            }
            (None, None) => return std::cmp::Ordering::Equal,
            (None, Some(_)) => return std::cmp::Ordering::Less,
            (Some(_), None) => return std::cmp::Ordering::Greater,
        }
    }
}
