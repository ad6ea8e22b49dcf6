//! Sandboxed file reads and writes.
//!
//! Concurrent writes to the same path are not coordinated: the last
//! OS-level write wins. The containment check runs before the file is
//! opened, so a symlink swapped in between the two can still lead outside
//! the project root.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::path::{canonicalize_lenient, is_within, normalize, resolve};
use crate::{
    AccessError, AccessOutcome, AccessRequest, AccessorConfig, Operation, ReadResult, Result,
    WriteMode, WriteResult,
};

/// Resolves paths against a trusted root and performs bounded file access.
#[derive(Debug, Clone)]
pub struct SafeFileAccessor {
    config: AccessorConfig,
}

impl SafeFileAccessor {
    /// Create an accessor with the given config.
    pub fn new(config: AccessorConfig) -> Self {
        Self { config }
    }

    /// Run `op` for `request`.
    pub fn execute(&self, op: Operation, request: &AccessRequest) -> Result<AccessOutcome> {
        match op {
            Operation::Read => self.read(request).map(AccessOutcome::Read),
            Operation::Write => self.write(request).map(AccessOutcome::Write),
        }
    }

    /// Resolve `target` to its canonical absolute path, rejecting anything
    /// outside the project root.
    pub fn resolve(&self, target: &str) -> Result<PathBuf> {
        let root = self.root()?;
        let canonical_root = canonicalize_lenient(&root).unwrap_or_else(|| root.clone());

        let resolved = resolve(&root, Path::new(target));
        let Some(canonical) = canonicalize_lenient(&resolved) else {
            return Err(AccessError::AccessDenied(resolved));
        };

        if !is_within(&canonical_root, &canonical) {
            debug!("Rejected {} outside {}", canonical.display(), canonical_root.display());
            return Err(AccessError::AccessDenied(resolved));
        }

        Ok(canonical)
    }

    /// Read the `[start_line, end_line]` range of a UTF-8 file.
    pub fn read(&self, request: &AccessRequest) -> Result<ReadResult> {
        let target = required_path(request)?;

        let start_line = request.start_line.unwrap_or(1);
        if start_line < 1 {
            return Err(AccessError::InvalidRange(
                "start_line must be 1 or greater".to_string(),
            ));
        }
        if let Some(end_line) = request.end_line {
            if end_line < start_line {
                return Err(AccessError::InvalidRange(
                    "end_line must be greater than or equal to start_line".to_string(),
                ));
            }
        }

        let path = self.resolve(target)?;
        let bytes = std::fs::read(&path).map_err(|e| AccessError::from_read(e, &path))?;
        let text = String::from_utf8(bytes).map_err(|_| AccessError::DecodeError(path.clone()))?;

        let (result, selected) = select_lines(&text, start_line, request.end_line);
        info!(
            "Read {}/{} lines from {}",
            selected,
            result.total_lines,
            path.display()
        );

        Ok(result)
    }

    /// Write or append content, creating parent directories unless told not to.
    pub fn write(&self, request: &AccessRequest) -> Result<WriteResult> {
        let target = required_path(request)?;
        let content = request
            .content
            .as_deref()
            .ok_or_else(|| AccessError::missing("content"))?;
        let mode = request.mode.unwrap_or_default();
        let create_parent_dirs = request.create_parent_dirs.unwrap_or(true);

        let path = self.resolve(target)?;

        if create_parent_dirs {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| AccessError::from_write(e, &path))?;
            }
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriteMode::Overwrite => options.write(true).truncate(true),
            WriteMode::Append => options.append(true),
        };

        {
            let mut file = options
                .open(&path)
                .map_err(|e| AccessError::from_write(e, &path))?;
            file.write_all(content.as_bytes())
                .map_err(|e| AccessError::from_write(e, &path))?;
        }

        if !matches!(path.try_exists(), Ok(true)) {
            return Err(AccessError::WriteVerificationFailed(path));
        }

        let bytes_written = content.len();
        info!("Successfully wrote {} bytes to {}", bytes_written, path.display());

        Ok(WriteResult {
            resolved_path: path,
            bytes_written,
        })
    }

    /// Absolute, normalized project root.
    fn root(&self) -> Result<PathBuf> {
        let root = &self.config.project_root;
        let absolute = std::path::absolute(root).map_err(|e| AccessError::UnknownIo {
            path: root.clone(),
            reason: e.to_string(),
        })?;
        Ok(normalize(&absolute))
    }
}

fn required_path(request: &AccessRequest) -> Result<&str> {
    request
        .target_path
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AccessError::missing("file_path"))
}

/// Slice the 1-based inclusive range out of `text`.
///
/// Returns the result and the number of lines selected.
fn select_lines(text: &str, start_line: usize, end_line: Option<usize>) -> (ReadResult, usize) {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();
    let total_lines = lines.len();

    let start_idx = (start_line.max(1) - 1).min(total_lines);
    let end_idx = end_line.map_or(total_lines, |end| end.min(total_lines)).max(start_idx);
    let selected = &lines[start_idx..end_idx];

    let result = ReadResult {
        content: selected.concat(),
        total_lines,
        truncated: end_line.is_some_and(|end| end < total_lines),
    };
    (result, selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use tempfile::TempDir;

    const FIVE_LINES: &str = "one\ntwo\nthree\nfour\nfive\n";

    fn setup() -> (TempDir, SafeFileAccessor) {
        let dir = tempfile::tempdir().unwrap();
        let accessor = SafeFileAccessor::new(AccessorConfig::new(dir.path()));
        (dir, accessor)
    }

    #[test]
    fn test_select_lines_full_file() {
        let (result, selected) = select_lines(FIVE_LINES, 1, None);
        assert_eq!(result.content, FIVE_LINES);
        assert_eq!(result.total_lines, 5);
        assert!(!result.truncated);
        assert_eq!(selected, 5);
    }

    #[test]
    fn test_select_lines_clamped_end_not_truncated() {
        let (result, _) = select_lines(FIVE_LINES, 4, Some(99));
        assert_eq!(result.content, "four\nfive\n");
        assert!(!result.truncated);

        let (result, _) = select_lines(FIVE_LINES, 1, Some(5));
        assert!(!result.truncated);
    }

    #[test]
    fn test_select_lines_start_past_end() {
        let (result, selected) = select_lines(FIVE_LINES, 9, None);
        assert_eq!(result.content, "");
        assert_eq!(result.total_lines, 5);
        assert_eq!(selected, 0);

        let (result, _) = select_lines(FIVE_LINES, 9, Some(12));
        assert_eq!(result.content, "");
        assert!(!result.truncated);
    }

    #[test]
    fn test_select_lines_unterminated_last_line() {
        let (result, _) = select_lines("a\r\nb", 2, None);
        assert_eq!(result.content, "b");
        assert_eq!(result.total_lines, 2);

        let (result, _) = select_lines("a\r\nb", 1, Some(1));
        assert_eq!(result.content, "a\r\n");
        assert!(result.truncated);
    }

    #[test]
    fn test_select_lines_empty_file() {
        let (result, _) = select_lines("", 1, None);
        assert_eq!(result.content, "");
        assert_eq!(result.total_lines, 0);
        assert!(!result.truncated);
    }

    #[test]
    fn test_read_line_range() {
        let (dir, accessor) = setup();
        std::fs::write(dir.path().join("notes.txt"), FIVE_LINES).unwrap();

        let result = accessor
            .read(&AccessRequest::new("notes.txt").lines(Some(2), Some(3)))
            .unwrap();

        assert_eq!(result.content, "two\nthree\n");
        assert_eq!(result.total_lines, 5);
        assert!(result.truncated);
    }

    #[test]
    fn test_read_whole_file() {
        let (dir, accessor) = setup();
        std::fs::write(dir.path().join("notes.txt"), FIVE_LINES).unwrap();

        let result = accessor.read(&AccessRequest::new("notes.txt")).unwrap();
        assert_eq!(result.content, FIVE_LINES);
        assert!(!result.truncated);
    }

    #[test]
    fn test_read_traversal_denied() {
        let (dir, _) = setup();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        let accessor = SafeFileAccessor::new(AccessorConfig::new(&nested));
        std::fs::write(dir.path().join("secret.txt"), "hidden").unwrap();

        let err = accessor.read(&AccessRequest::new("../../secret.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);

        let err = accessor.read(&AccessRequest::new("../../etc/passwd")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }

    #[test]
    fn test_absolute_path_outside_root_denied() {
        let (_dir, accessor) = setup();
        let other = tempfile::tempdir().unwrap();
        let outside = other.path().join("x.txt");

        let err = accessor
            .write(&AccessRequest::new(outside.to_string_lossy()).content("data"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(!outside.exists());
    }

    #[test]
    fn test_sibling_prefix_denied() {
        let parent = tempfile::tempdir().unwrap();
        let root = parent.path().join("root");
        let evil = parent.path().join("root-evil");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::create_dir_all(&evil).unwrap();
        let accessor = SafeFileAccessor::new(AccessorConfig::new(&root));

        let err = accessor
            .write(&AccessRequest::new("../root-evil/x.txt").content("data"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert!(!evil.join("x.txt").exists());
    }

    #[test]
    fn test_root_itself_is_within() {
        let (dir, accessor) = setup();
        let resolved = accessor.resolve(".").unwrap();
        assert_eq!(resolved, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn test_read_validation_errors() {
        let (_dir, accessor) = setup();

        let err = accessor.read(&AccessRequest::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);

        let err = accessor.read(&AccessRequest::new("")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);

        let err = accessor
            .read(&AccessRequest::new("a.txt").lines(Some(0), None))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);

        let err = accessor
            .read(&AccessRequest::new("a.txt").lines(Some(3), Some(2)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_read_missing_file() {
        let (_dir, accessor) = setup();
        let err = accessor.read(&AccessRequest::new("nope.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let (dir, accessor) = setup();
        std::fs::write(dir.path().join("bin.dat"), [0xff, 0xfe, 0x00]).unwrap();

        let err = accessor.read(&AccessRequest::new("bin.dat")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeError);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (dir, accessor) = setup();

        let result = accessor
            .write(
                &AccessRequest::new("out/report.md")
                    .content("hello")
                    .create_parent_dirs(true),
            )
            .unwrap();

        assert_eq!(result.bytes_written, 5);
        assert!(dir.path().join("out").is_dir());
        let read = accessor.read(&AccessRequest::new("out/report.md")).unwrap();
        assert_eq!(read.content, "hello");
    }

    #[test]
    fn test_write_without_parent_dirs_fails() {
        let (dir, accessor) = setup();

        let err = accessor
            .write(
                &AccessRequest::new("missing/x.txt")
                    .content("hello")
                    .create_parent_dirs(false),
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownIo);
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_write_empty_content() {
        let (dir, accessor) = setup();

        let result = accessor.write(&AccessRequest::new("x.txt").content("")).unwrap();
        assert_eq!(result.bytes_written, 0);
        assert!(dir.path().join("x.txt").exists());

        let err = accessor.write(&AccessRequest::new("x.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingArgument);
    }

    #[test]
    fn test_write_counts_bytes() {
        let (_dir, accessor) = setup();
        let result = accessor.write(&AccessRequest::new("u.txt").content("héllo")).unwrap();
        assert_eq!(result.bytes_written, 6);
    }

    #[test]
    fn test_overwrite_then_append() {
        let (_dir, accessor) = setup();

        accessor
            .write(&AccessRequest::new("log.txt").content("first\n"))
            .unwrap();
        accessor
            .write(
                &AccessRequest::new("log.txt")
                    .content("second\n")
                    .mode(WriteMode::Append),
            )
            .unwrap();

        let read = accessor.read(&AccessRequest::new("log.txt")).unwrap();
        assert_eq!(read.content, "first\nsecond\n");

        accessor
            .write(&AccessRequest::new("log.txt").content("fresh"))
            .unwrap();
        let read = accessor.read(&AccessRequest::new("log.txt")).unwrap();
        assert_eq!(read.content, "fresh");
    }

    #[test]
    fn test_write_reports_resolved_path() {
        let (dir, accessor) = setup();
        let result = accessor
            .write(&AccessRequest::new("./a/../b.txt").content("x"))
            .unwrap();
        let expected = std::fs::canonicalize(dir.path()).unwrap().join("b.txt");
        assert_eq!(result.resolved_path, expected);
    }

    #[test]
    fn test_execute_dispatch() {
        let (_dir, accessor) = setup();
        let request = AccessRequest::new("d.txt").content("line\n");

        let outcome = accessor.execute(Operation::Write, &request).unwrap();
        assert!(matches!(outcome, AccessOutcome::Write(ref w) if w.bytes_written == 5));

        let outcome = accessor.execute(Operation::Read, &request).unwrap();
        assert!(matches!(outcome, AccessOutcome::Read(ref r) if r.total_lines == 1));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escape_denied() {
        let (dir, accessor) = setup();
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "hidden").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("link")).unwrap();

        let err = accessor.read(&AccessRequest::new("link/secret.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }
}
