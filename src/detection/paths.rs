//! Root containment checks and glob matching beneath a dataset root.
//!
//! Patterns use `/` as the separator. `*`, `?`, `[...]` and `{a,b}` never
//! match a separator; a `**` segment matches zero or more directories.
//! Wildcards skip names starting with `.` unless the pattern segment itself
//! starts with `.`.

use std::ffi::OsStr;
use std::path::{Component, Path};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

const GLOB_META: [char; 5] = ['*', '?', '[', '{', '\\'];

/// Returns true if `path` is relative and stays beneath the root.
///
/// Paths given to requirement methods are not always hardcoded by the
/// detector; they may have been read from a file inside the dataset, so a
/// `false` here is a property of the data rather than a detector bug.
/// Any `..` segment is refused, even one that would normalize away.
pub(crate) fn is_path_within_root(path: &str) -> bool {
    if has_drive_prefix(path) || path.starts_with('\\') {
        return false;
    }

    let as_path = Path::new(path);
    if as_path.is_absolute() || as_path.has_root() {
        return false;
    }
    if as_path
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return false;
    }

    // Split on both separators so `..\\x` is refused on every platform.
    !path.split(['/', '\\']).any(|segment| segment == "..")
}

fn has_drive_prefix(path: &str) -> bool {
    let mut chars = path.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

/// A compiled `require_file` pattern, with the walk bounds derived from it.
#[derive(Debug)]
pub(crate) struct FilePattern {
    /// Leading segments with no glob syntax; the walk starts there.
    literal_prefix: Vec<String>,
    /// `None` when the pattern contains `**`.
    max_depth: Option<usize>,
    matcher: GlobMatcher,
    /// Pattern segments starting with `.`; only these may match hidden names.
    dot_segments: Vec<GlobMatcher>,
    fully_literal: bool,
}

impl FilePattern {
    pub(crate) fn compile(pattern: &str) -> Result<Self, globset::Error> {
        let segments: Vec<&str> = pattern
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();

        let normalized = segments.join("/");
        let matcher = GlobBuilder::new(&normalized)
            .literal_separator(true)
            .backslash_escape(true)
            .build()?
            .compile_matcher();

        let dot_segments = segments
            .iter()
            .filter(|s| s.starts_with('.'))
            .map(|s| {
                GlobBuilder::new(s)
                    .backslash_escape(true)
                    .build()
                    .map(|g| g.compile_matcher())
            })
            .collect::<Result<Vec<_>, _>>()?;

        let literal_len = segments
            .iter()
            .take_while(|s| !s.contains(GLOB_META))
            .count();
        let rest = &segments[literal_len..];
        let max_depth = if rest.iter().any(|s| s.contains("**")) {
            None
        } else {
            Some(rest.len())
        };

        Ok(Self {
            literal_prefix: segments[..literal_len]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_depth,
            matcher,
            dot_segments,
            fully_literal: rest.is_empty(),
        })
    }

    /// Finds a regular file under `root` matching this pattern whose basename
    /// is not excluded. The result is root-relative and `/`-separated.
    ///
    /// Symlinks are followed, so a link to a regular file counts as one.
    /// Unreadable directories, link loops and names that are not valid UTF-8
    /// are skipped.
    pub(crate) fn find_first(&self, root: &Path, exclusions: &GlobSet) -> Option<String> {
        let mut start = root.to_path_buf();
        start.extend(&self.literal_prefix);

        if self.fully_literal {
            let rel = self.literal_prefix.join("/");
            let basename = self.literal_prefix.last()?;
            let meta = std::fs::metadata(&start).ok()?;
            return (meta.is_file() && !exclusions.is_match(basename)).then_some(rel);
        }

        let mut walker = WalkDir::new(&start)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        if let Some(depth) = self.max_depth {
            walker = walker.max_depth(depth);
        }

        walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || self.visible(entry.file_name()))
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                !exclusions.is_match(entry.file_name().to_string_lossy().as_ref())
            })
            .filter_map(|entry| relative_slash_path(root, entry.path()))
            .find(|rel| self.matcher.is_match(rel))
    }

    /// Hidden names are only reachable through a segment that starts with `.`.
    fn visible(&self, name: &OsStr) -> bool {
        let Some(name) = name.to_str() else {
            return false;
        };
        !name.starts_with('.') || self.dot_segments.iter().any(|m| m.is_match(name))
    }
}

/// Compiles basename-only exclusion patterns.
pub(crate) fn compile_exclusions(patterns: &[&str]) -> Result<GlobSet, globset::Error> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    builder.build()
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts = rel
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    Some(parts.join("/"))
}

/// Exposes the containment check to the fuzz targets.
#[cfg(feature = "fuzzing")]
pub fn fuzz_is_path_within_root(path: &str) -> bool {
    is_path_within_root(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn no_exclusions() -> GlobSet {
        compile_exclusions(&[]).unwrap()
    }

    #[test]
    fn containment_accepts_relative_paths() {
        assert!(is_path_within_root("a/b/c.txt"));
        assert!(is_path_within_root("./a/*.txt"));
        assert!(is_path_within_root("**/metadata.jsonl"));
        assert!(is_path_within_root("a..b/c"));
    }

    #[test]
    fn containment_rejects_escapes() {
        assert!(!is_path_within_root("../outside.txt"));
        assert!(!is_path_within_root("a/../../outside.txt"));
        assert!(!is_path_within_root("a/../b.txt"));
        assert!(!is_path_within_root(".."));
        assert!(!is_path_within_root("a\\..\\b"));
        assert!(!is_path_within_root("/etc/passwd"));
        assert!(!is_path_within_root("C:foo"));
        assert!(!is_path_within_root("c:/foo"));
        assert!(!is_path_within_root("\\\\server\\share"));
    }

    #[test]
    fn compile_derives_walk_bounds() {
        let p = FilePattern::compile("a/b/*.txt").unwrap();
        assert_eq!(p.literal_prefix, ["a", "b"]);
        assert_eq!(p.max_depth, Some(1));
        assert!(!p.fully_literal);

        let p = FilePattern::compile("a/**/*.txt").unwrap();
        assert_eq!(p.literal_prefix, ["a"]);
        assert_eq!(p.max_depth, None);

        let p = FilePattern::compile("./x/y.txt").unwrap();
        assert!(p.fully_literal);
    }

    #[test]
    fn recursive_segment_matches_zero_or_more_directories() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a/c.txt");
        touch(temp.path(), "a/b/d/e.csv");

        let txt = FilePattern::compile("a/**/*.txt").unwrap();
        assert_eq!(
            txt.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some("a/c.txt")
        );

        let csv = FilePattern::compile("a/**/*.csv").unwrap();
        assert_eq!(
            csv.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some("a/b/d/e.csv")
        );
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "a/b/c.txt");

        let p = FilePattern::compile("a/*.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());
    }

    #[test]
    fn directories_never_match() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("labels.txt")).unwrap();

        let p = FilePattern::compile("*.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());
        let p = FilePattern::compile("labels.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());
    }

    #[test]
    fn exclusions_match_basenames_only() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "labels/classes.txt");

        let p = FilePattern::compile("labels/*.txt").unwrap();
        let exclusions = compile_exclusions(&["classes.*"]).unwrap();
        assert!(p.find_first(temp.path(), &exclusions).is_none());

        let dir_exclusion = compile_exclusions(&["labels"]).unwrap();
        assert_eq!(
            p.find_first(temp.path(), &dir_exclusion).as_deref(),
            Some("labels/classes.txt")
        );
    }

    #[test]
    fn wildcards_skip_hidden_names() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "labels/.ipynb_checkpoints/a-checkpoint.txt");
        touch(temp.path(), ".hidden.txt");

        let p = FilePattern::compile("labels/**/*.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());
        let p = FilePattern::compile("*.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());

        let p = FilePattern::compile(".*.txt").unwrap();
        assert_eq!(
            p.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some(".hidden.txt")
        );
        let p = FilePattern::compile("labels/.ipynb_checkpoints/*.txt").unwrap();
        assert_eq!(
            p.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some("labels/.ipynb_checkpoints/a-checkpoint.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_files_match() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "store/real.jpg");
        fs::create_dir_all(temp.path().join("images")).unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("store/real.jpg"),
            temp.path().join("images/a.jpg"),
        )
        .unwrap();

        let p = FilePattern::compile("images/*.jpg").unwrap();
        assert_eq!(
            p.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some("images/a.jpg")
        );
        let p = FilePattern::compile("images/a.jpg").unwrap();
        assert_eq!(
            p.find_first(temp.path(), &no_exclusions()).as_deref(),
            Some("images/a.jpg")
        );
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_walked_through_wildcards() {
        let outside = tempfile::tempdir().unwrap();
        touch(outside.path(), "x.txt");
        let temp = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        for pattern in ["link/*.txt", "*/*.txt", "**/x.txt"] {
            let p = FilePattern::compile(pattern).unwrap();
            assert_eq!(
                p.find_first(temp.path(), &no_exclusions()).as_deref(),
                Some("link/x.txt"),
                "pattern {}",
                pattern
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_links_and_non_utf8_names_are_skipped() {
        use std::os::unix::ffi::OsStrExt;

        let temp = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing.txt"), temp.path().join("a.txt"))
            .unwrap();
        if fs::write(temp.path().join(OsStr::from_bytes(b"b\xff.txt")), b"").is_err() {
            // Some filesystems refuse non-UTF-8 names.
            return;
        }

        let p = FilePattern::compile("*.txt").unwrap();
        assert!(p.find_first(temp.path(), &no_exclusions()).is_none());
    }
}
