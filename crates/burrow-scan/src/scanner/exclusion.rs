//! Exclusion policy seam.
//!
//! The walk asks an [`ExclusionOracle`] about every entry it sees. The oracle
//! receives the root-relative path, escaped according to the oracle's
//! [`EscapeStyle`] so that names containing quoting or wildcard characters
//! reach the host's pattern evaluator as literals.

use std::borrow::Cow;
use std::path::Path;

/// Characters with meaning in a filename-expansion context.
const FILENAME_SPECIAL: &[char] = &[
    ' ', '\t', '\n', '*', '?', '[', '{', '`', '$', '\\', '%', '#', '\'', '"', '|', '!', '<',
];

/// How a relative path is escaped before an oracle evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeStyle {
    /// Passed through unchanged.
    #[default]
    Verbatim,
    /// Prepared for embedding in a single-quoted string literal: every `'`
    /// is doubled.
    SingleQuoted,
    /// Backslash-escapes characters significant to filename expansion, plus a
    /// leading `+` or `>` and a path consisting of a lone `-`.
    FileName,
}

impl EscapeStyle {
    pub fn apply<'a>(&self, path: &'a str) -> Cow<'a, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(path),
            Self::SingleQuoted => {
                if path.contains('\'') {
                    Cow::Owned(path.replace('\'', "''"))
                } else {
                    Cow::Borrowed(path)
                }
            }
            Self::FileName => escape_file_name(path),
        }
    }
}

fn escape_file_name(path: &str) -> Cow<'_, str> {
    let leading = path.starts_with(['+', '>']) || path == "-";
    if !leading && !path.contains(FILENAME_SPECIAL) {
        return Cow::Borrowed(path);
    }

    let mut escaped = String::with_capacity(path.len() + 8);
    for (i, ch) in path.chars().enumerate() {
        if FILENAME_SPECIAL.contains(&ch) || (i == 0 && leading) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}

/// Decides whether a path is omitted from scan results.
///
/// Returning `true` for a directory prunes its whole subtree.
pub trait ExclusionOracle {
    /// `relative_path` is relative to the scan root and already escaped per
    /// [`escape_style`](Self::escape_style).
    fn excluded(&self, relative_path: &str) -> bool;

    /// Called by the walk with the entry type it already resolved through
    /// its [`FileSystem`](super::FileSystem). Oracles whose rules depend on
    /// the entry type override this.
    fn excluded_entry(&self, relative_path: &str, is_dir: bool) -> bool {
        let _ = is_dir;
        self.excluded(relative_path)
    }

    fn escape_style(&self) -> EscapeStyle {
        EscapeStyle::Verbatim
    }

    /// The scan root moved to `root`. Oracles holding root-specific state
    /// (ignore files, say) reload it here.
    fn rebase(&mut self, root: &Path) {
        let _ = root;
    }
}

impl<F> ExclusionOracle for F
where
    F: Fn(&str) -> bool,
{
    fn excluded(&self, relative_path: &str) -> bool {
        self(relative_path)
    }
}

/// Oracle that excludes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusions;

impl ExclusionOracle for NoExclusions {
    fn excluded(&self, _relative_path: &str) -> bool {
        false
    }
}

/// An oracle that evaluates paths escaped with a chosen style.
///
/// Useful when the policy is a host callback expecting, say, single-quoted
/// literals.
#[derive(Debug, Clone)]
pub struct Escaped<O> {
    inner: O,
    style: EscapeStyle,
}

impl<O> Escaped<O> {
    pub fn new(inner: O, style: EscapeStyle) -> Self {
        Self { inner, style }
    }
}

impl<O: ExclusionOracle> ExclusionOracle for Escaped<O> {
    fn excluded(&self, relative_path: &str) -> bool {
        self.inner.excluded(relative_path)
    }

    fn excluded_entry(&self, relative_path: &str, is_dir: bool) -> bool {
        self.inner.excluded_entry(relative_path, is_dir)
    }

    fn escape_style(&self) -> EscapeStyle {
        self.style
    }

    fn rebase(&mut self, root: &Path) {
        self.inner.rebase(root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_borrows() {
        let out = EscapeStyle::Verbatim.apply("a b/c's.txt");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "a b/c's.txt");
    }

    #[test]
    fn single_quotes_are_doubled() {
        assert_eq!(EscapeStyle::SingleQuoted.apply("it's/a'b"), "it''s/a''b");
        assert!(matches!(EscapeStyle::SingleQuoted.apply("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn file_name_escapes_wildcards_and_spaces() {
        assert_eq!(
            EscapeStyle::FileName.apply("my dir/[draft]*.md"),
            "my\\ dir/\\[draft]\\*.md"
        );
        assert_eq!(EscapeStyle::FileName.apply("a%b#c"), "a\\%b\\#c");
        assert_eq!(EscapeStyle::FileName.apply("src/lib.rs"), "src/lib.rs");
    }

    #[test]
    fn file_name_escapes_leading_markers() {
        assert_eq!(EscapeStyle::FileName.apply("+x"), "\\+x");
        assert_eq!(EscapeStyle::FileName.apply(">out"), "\\>out");
        assert_eq!(EscapeStyle::FileName.apply("-"), "\\-");
        assert_eq!(EscapeStyle::FileName.apply("-x"), "-x");
        assert_eq!(EscapeStyle::FileName.apply("a+b"), "a+b");
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |p: &str| p.ends_with(".o");
        assert!(oracle.excluded("build/main.o"));
        assert!(!oracle.excluded("src/main.c"));
        assert_eq!(oracle.escape_style(), EscapeStyle::Verbatim);
    }

    /// Excludes directories named `out` only, and remembers its last root.
    #[derive(Default)]
    struct DirsNamedOut {
        root: Option<std::path::PathBuf>,
    }

    impl ExclusionOracle for DirsNamedOut {
        fn excluded(&self, _relative_path: &str) -> bool {
            false
        }

        fn excluded_entry(&self, relative_path: &str, is_dir: bool) -> bool {
            is_dir && relative_path == "out"
        }

        fn rebase(&mut self, root: &Path) {
            self.root = Some(root.to_path_buf());
        }
    }

    #[test]
    fn default_excluded_entry_ignores_entry_type() {
        let oracle = |p: &str| p == "out";
        assert!(oracle.excluded_entry("out", true));
        assert!(oracle.excluded_entry("out", false));
    }

    #[test]
    fn escaped_wrapper_forwards_entry_type_and_rebase() {
        let mut oracle = Escaped::new(DirsNamedOut::default(), EscapeStyle::FileName);
        assert!(oracle.excluded_entry("out", true));
        assert!(!oracle.excluded_entry("out", false));

        oracle.rebase(Path::new("/elsewhere"));
        assert_eq!(oracle.inner.root.as_deref(), Some(Path::new("/elsewhere")));
    }

    #[test]
    fn escaped_wrapper_reports_style() {
        let oracle = Escaped::new(NoExclusions, EscapeStyle::SingleQuoted);
        assert_eq!(oracle.escape_style(), EscapeStyle::SingleQuoted);
        assert!(!oracle.excluded("x"));
    }
}
