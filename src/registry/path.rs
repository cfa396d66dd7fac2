//! Directory path helpers
//!
//! Directory parentage is derived from `/`-delimited path strings; there is
//! no parent pointer anywhere in the data model. The segmentation rule lives
//! here and only here, so the registry and any presentation layer agree on
//! what "direct child" means.

/// Number of `/`-separated segments in a path. The empty path has depth 0.
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.split('/').count()
    }
}

/// A root-level path has a single segment.
pub fn is_root(path: &str) -> bool {
    depth(path) == 1
}

/// The parent path, or `None` for root-level (and empty) paths.
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(parent, _)| parent)
}

/// The final path segment.
pub fn name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Whether `candidate` is a direct child of `parent_path`: it extends
/// `parent_path + "/"` and has exactly one more segment.
pub fn is_direct_child(parent_path: &str, candidate: &str) -> bool {
    candidate.starts_with(&format!("{}/", parent_path))
        && depth(candidate) == depth(parent_path) + 1
}

/// Compose a child path from a parent (optional) and a segment name.
pub fn join(parent_path: Option<&str>, name: &str) -> String {
    match parent_path {
        Some(parent) if !parent.is_empty() => format!("{}/{}", parent, name),
        _ => name.to_string(),
    }
}
