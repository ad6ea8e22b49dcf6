//! Path normalization and containment.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` segments without touching the filesystem.
///
/// `..` above the filesystem root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Resolve `target` against `root`: relative targets are joined to the root,
/// and the result is normalized.
pub fn resolve(root: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        normalize(target)
    } else {
        normalize(&root.join(target))
    }
}

/// Canonical form of a path that may not exist yet.
///
/// The deepest existing ancestor is canonicalized (following symlinks) and
/// the missing components are appended. Returns `None` for a dangling
/// symlink, whose destination cannot be checked.
pub fn canonicalize_lenient(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        match std::fs::canonicalize(existing) {
            Ok(canonical) => {
                let mut out = canonical;
                out.extend(missing.iter().rev());
                return Some(out);
            }
            Err(_) => {
                if std::fs::symlink_metadata(existing).is_ok() {
                    return None;
                }
                missing.push(existing.file_name()?);
                existing = existing.parent()?;
            }
        }
    }
}

/// Whether `path` equals `root` or lies beneath it, compared component-wise.
pub fn is_within(root: &Path, path: &Path) -> bool {
    path.starts_with(root)
}
