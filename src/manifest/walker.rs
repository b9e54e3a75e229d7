//! Two-level manifest-tree walker
//!
//! Discovery fetches the master manifest, classifies its content lines, and
//! either collects segments directly (single-variant) or descends exactly one
//! level into each child manifest (multi-variant). A child that itself lists
//! further manifests is not recursed into.

use crate::manifest::resolve::{basename, directory_of, resolve};
use crate::manifest::{DEFAULT_MANIFEST_EXT, SEGMENT_EXTENSIONS};
use crate::{Result, WarmError};
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Result of walking a manifest tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Every discovered resource URL in first-seen order, deduplicated.
    /// The master manifest URL is always first.
    pub urls: Vec<String>,

    /// Variant labels derived from child manifest paths, first-seen order
    pub variants: Vec<String>,
}

/// Insertion-ordered set of strings keyed on exact equality
#[derive(Debug, Default)]
struct OrderedSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    /// Inserts a value; later duplicates are no-ops
    fn insert(&mut self, value: String) {
        if self.seen.insert(value.clone()) {
            self.order.push(value);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// Walks the manifest tree rooted at `master_url`
///
/// Fails with [`WarmError::MasterFetch`] when the master manifest cannot be
/// retrieved or read; this aborts the whole run before any probing starts.
/// A child manifest that cannot be fetched only loses its own segments: the
/// child URL stays in the set and discovery continues with the remaining
/// children.
pub async fn discover(client: &Client, master_url: &str) -> Result<Discovery> {
    let body = fetch_manifest(client, master_url)
        .await
        .map_err(|source| WarmError::MasterFetch {
            url: master_url.to_string(),
            source,
        })?;

    let mut urls = OrderedSet::default();
    let mut variants = OrderedSet::default();
    urls.insert(master_url.to_string());

    let base = directory_of(master_url);
    let manifest_suffix = format!(".{}", manifest_ext(master_url));

    let children: Vec<&str> = content_lines(&body)
        .filter(|line| line.ends_with(&manifest_suffix))
        .collect();

    if children.is_empty() {
        // Single-variant manifest: segments come straight from the root body
        collect_segments(&body, base, &mut urls);
    } else {
        for child in children {
            let child_url = match resolve(child, base) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("skipping unresolvable manifest reference {}: {}", child, e);
                    continue;
                }
            };

            if let Some(label) = variant_of(&child_url) {
                variants.insert(label);
            }
            urls.insert(child_url.clone());

            match fetch_manifest(client, &child_url).await {
                Ok(child_body) => {
                    collect_segments(&child_body, directory_of(&child_url), &mut urls);
                }
                Err(e) => {
                    tracing::warn!("skipping variant manifest {}: {}", child_url, e);
                }
            }
        }
    }

    Ok(Discovery {
        urls: urls.into_vec(),
        variants: variants.into_vec(),
    })
}

/// Fetches a manifest body; a non-success status is an error
async fn fetch_manifest(client: &Client, url: &str) -> std::result::Result<String, reqwest::Error> {
    let response = client.get(url).send().await?.error_for_status()?;
    response.text().await
}

/// Resolves and inserts every segment reference found in a manifest body
fn collect_segments(body: &str, base: &str, urls: &mut OrderedSet) {
    for segment in content_lines(body).filter(|line| is_segment_ref(line)) {
        match resolve(segment, base) {
            Ok(url) => urls.insert(url),
            Err(e) => {
                tracing::debug!("skipping unresolvable segment reference {}: {}", segment, e);
            }
        }
    }
}

/// Yields the content lines of a manifest body: trimmed, with blanks and
/// `#`-prefixed metadata lines dropped
fn content_lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Checks whether a content line references a media segment: an absolute URL
/// or a known segment extension
fn is_segment_ref(line: &str) -> bool {
    if line.starts_with("http") {
        return true;
    }
    match line.rsplit_once('.') {
        Some((_, ext)) => SEGMENT_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Extracts the manifest extension from the root URL's filename
fn manifest_ext(master_url: &str) -> &str {
    basename(master_url)
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(DEFAULT_MANIFEST_EXT)
}

/// Derives a variant label from a child manifest URL: the path segment
/// immediately before the filename
fn variant_of(child_url: &str) -> Option<String> {
    let parsed = Url::parse(child_url).ok()?;
    let segments: Vec<&str> = parsed.path_segments()?.collect();
    if segments.len() < 2 {
        return None;
    }
    let parent = segments[segments.len() - 2];
    (!parent.is_empty()).then(|| parent.to_string())
}
