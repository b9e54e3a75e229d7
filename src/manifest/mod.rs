//! Manifest-tree discovery for HLS playlists
//!
//! This module turns one master manifest URL into the full set of resources
//! the manifest tree references:
//! - Reference resolution against a base URL
//! - Line classification (child manifests vs. media segments)
//! - A two-level walk producing an ordered, deduplicated URL set and the
//!   set of variant labels

mod resolve;
mod walker;

pub use resolve::{basename, directory_of, resolve, variant_label};
pub use walker::{discover, Discovery};

/// Extensions treated as media-segment references inside a manifest body
pub(crate) const SEGMENT_EXTENSIONS: &[&str] = &["ts", "jpeg"];

/// Manifest extension assumed when the root URL has no recognizable one
pub(crate) const DEFAULT_MANIFEST_EXT: &str = "m3u8";
