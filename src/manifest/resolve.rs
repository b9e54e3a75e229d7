//! Reference resolution and URL path helpers
//!
//! Manifests reference resources as absolute URLs, protocol-relative URLs,
//! origin-relative paths, or plain relative paths. Resolution keeps exact
//! string identity: an already-absolute reference is returned unchanged so
//! that the discovered-URL set deduplicates on the strings servers will
//! actually see.

use crate::manifest::{DEFAULT_MANIFEST_EXT, SEGMENT_EXTENSIONS};
use crate::Result;
use url::Url;

/// Resolves a manifest reference against a base URL
///
/// # Resolution Rules
///
/// 1. A reference that already carries a scheme is returned unchanged
/// 2. `//host/path` gets the base URL's scheme prefixed
/// 3. `/path` is resolved against the base URL's origin
/// 4. Anything else is a relative reference, joined per standard URL
///    resolution semantics (relative to the base's directory)
///
/// # Arguments
///
/// * `reference` - The raw reference line from a manifest
/// * `base_url` - The URL of the manifest the reference appeared in (a full
///   URL or its directory prefix; both join identically)
///
/// # Examples
///
/// ```
/// use edgewarm::manifest::resolve;
///
/// let url = resolve("seg1.ts", "https://cdn.example.com/hls/720p/index.m3u8").unwrap();
/// assert_eq!(url, "https://cdn.example.com/hls/720p/seg1.ts");
/// ```
pub fn resolve(reference: &str, base_url: &str) -> Result<String> {
    if has_scheme(reference) {
        return Ok(reference.to_string());
    }

    if reference.starts_with("//") {
        let base = Url::parse(base_url)?;
        return Ok(format!("{}:{}", base.scheme(), reference));
    }

    if reference.starts_with('/') {
        let base = Url::parse(base_url)?;
        return Ok(format!("{}{}", base.origin().ascii_serialization(), reference));
    }

    let joined = Url::parse(base_url)?.join(reference)?;
    Ok(joined.to_string())
}

/// Checks whether a reference begins with a scheme-like prefix (e.g. `https:`)
fn has_scheme(reference: &str) -> bool {
    let Some(colon) = reference.find(':') else {
        return false;
    };

    // A slash before the colon means the colon belongs to a path segment
    if reference.find('/').is_some_and(|slash| slash < colon) {
        return false;
    }

    let prefix = &reference[..colon];
    let mut chars = prefix.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Returns the directory prefix of a URL: everything up to and including the
/// last `/`
pub fn directory_of(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[..=idx],
        None => url,
    }
}

/// Returns the last path segment of a URL, with any query or fragment stripped
pub fn basename(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

/// Derives the variant label shown in per-probe log lines
///
/// For a URL whose filename carries a known media or manifest extension, the
/// label is the path segment immediately before the filename; everything
/// else is labelled `master`.
pub fn variant_label(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let mut segments = path.rsplit('/');

    let Some(file) = segments.next() else {
        return "master";
    };
    let Some((_, ext)) = file.rsplit_once('.') else {
        return "master";
    };
    if !SEGMENT_EXTENSIONS.contains(&ext) && ext != DEFAULT_MANIFEST_EXT {
        return "master";
    }

    match segments.next() {
        Some(parent) if !parent.is_empty() => parent,
        _ => "master",
    }
}
