use crate::errors::{ContentError, ContentResult};
use crate::models::{ContentDocument, GalleryEntry};
use crate::store::ContentStore;
use once_cell::sync::Lazy;
use regex::Regex;

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9.-]+").expect("valid regex"));
static DASH_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));
static EDGE_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-.]+|[-.]+$").expect("valid regex"));

/// Appends an upload's `{url, alt}` pair to the gallery and persists. Display
/// order is append order. Normalization on the save path substitutes the
/// default alt label and discards entries outside the upload prefix.
pub fn append(
    store: &ContentStore,
    mut document: ContentDocument,
    entry: GalleryEntry,
) -> ContentResult<ContentDocument> {
    document.gallery.push(entry);
    save_document(store, &document)
}

/// Removes every gallery entry matching the given URL or bare filename and
/// persists. Removing an entry that is not present is a no-op success.
/// Deleting the uploaded bytes from disk is the upload handler's job.
pub fn remove(
    store: &ContentStore,
    mut document: ContentDocument,
    url_or_filename: &str,
) -> ContentResult<ContentDocument> {
    let key = removal_key(url_or_filename);
    if !key.is_empty() {
        let before = document.gallery.len();
        document
            .gallery
            .retain(|item| file_segment(&item.url) != key);
        if document.gallery.len() == before {
            tracing::debug!(key = %key, "no gallery entry matched removal key");
        }
    }
    save_document(store, &document)
}

fn save_document(store: &ContentStore, document: &ContentDocument) -> ContentResult<ContentDocument> {
    let candidate =
        serde_json::to_value(document).map_err(|error| ContentError::Internal(error.to_string()))?;
    store.save(&candidate)
}

// Callers may hand us a full `/uploads/...` URL or a bare filename; either
// way only the final path segment identifies the entry.
fn removal_key(url_or_filename: &str) -> String {
    sanitize_filename(url_or_filename.rsplit('/').next().unwrap_or_default())
}

fn file_segment(url: &str) -> String {
    sanitize_filename(url.rsplit('/').next().unwrap_or_default())
}

/// Collapses a caller-supplied name to the same shape the upload handler
/// gives stored files: lowercase, unsafe characters to dashes, dash runs
/// collapsed, edge dashes and dots trimmed.
pub fn sanitize_filename(name: &str) -> String {
    let lowered = name.to_lowercase();
    let replaced = UNSAFE_CHARS.replace_all(&lowered, "-");
    let collapsed = DASH_RUNS.replace_all(&replaced, "-");
    EDGE_MARKS.replace_all(&collapsed, "").to_string()
}
