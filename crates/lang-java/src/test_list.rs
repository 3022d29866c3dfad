//! Include/exclude selection of test classes.
//!
//! Patterns are globs over class paths (`org/example/FooTest`):
//! - `**/` matches any number of leading directories, `**` anything, `*` and
//!   `?` stay within one path segment.
//! - `.java` and `.class` suffixes are ignored, so are dotted class names
//!   (`org.example.FooTest` is `org/example/FooTest`).
//! - a pattern without a directory part matches in every package.
//! - `Class#method` restricts the pattern to matching methods.

use crate::error::PatternError;
use crate::naming::{JavaNamingConvention, PATH_SEPARATOR, TYPE_SEPARATOR};
use forkpath_api::TestFilter;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_INCLUDES: &[&str] = &["**/Test*", "**/*Test", "**/*Tests", "**/*TestCase"];

/// Inner classes are never selected on their own.
pub const DEFAULT_EXCLUDES: &[&str] = &["**/*$*"];

static DEFAULT_RESOLVER: Lazy<TestListResolver> = Lazy::new(|| {
    TestListResolver::new(DEFAULT_INCLUDES, DEFAULT_EXCLUDES)
        .expect("Default test patterns must compile")
});

#[derive(Debug, Clone)]
struct TestPattern {
    source: String,
    class: Regex,
    method: Option<Regex>,
}

impl TestPattern {
    fn parse(raw: &str) -> Result<Self, PatternError> {
        let raw = raw.trim();
        let (class_part, method_part) = JavaNamingConvention::parse_member_selector(raw);

        let mut class = JavaNamingConvention::strip_type_suffix(class_part).to_string();
        if !class.contains(PATH_SEPARATOR) {
            class = class.replace(TYPE_SEPARATOR, "/");
        }
        if !class.contains(PATH_SEPARATOR) {
            class = format!("**/{class}");
        }

        let compile = |glob: &str| {
            Regex::new(&glob_to_regex(glob)).map_err(|source| PatternError::InvalidGlob {
                pattern: raw.to_string(),
                source,
            })
        };

        Ok(Self {
            source: raw.to_string(),
            class: compile(&class)?,
            method: method_part
                .filter(|m| !m.is_empty())
                .map(compile)
                .transpose()?,
        })
    }

    fn matches_class(&self, class_path: &str) -> bool {
        self.class.is_match(class_path)
    }
}

fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                if chars.peek() == Some(&'/') {
                    chars.next();
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out.push('$');
    out
}

/// Normalise a resource or class name to a suffix-free class path.
fn class_path(resource: &str) -> String {
    let stripped = JavaNamingConvention::strip_type_suffix(resource);
    if stripped.contains(PATH_SEPARATOR) {
        stripped.to_string()
    } else {
        stripped.replace(TYPE_SEPARATOR, "/")
    }
}

/// Selects test classes by include and exclude patterns.
///
/// An empty include list selects every class that is not excluded.
#[derive(Debug, Clone)]
pub struct TestListResolver {
    includes: Vec<TestPattern>,
    excludes: Vec<TestPattern>,
}

impl TestListResolver {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            includes: parse_all(includes)?,
            excludes: parse_all(excludes)?,
        })
    }

    /// The standard selection: `Test*`, `*Test`, `*Tests` and `*TestCase`
    /// classes, excluding inner classes.
    pub fn defaults() -> &'static TestListResolver {
        &DEFAULT_RESOLVER
    }

    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.includes.iter().map(|p| p.source.as_str())
    }

    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.excludes.iter().map(|p| p.source.as_str())
    }

    fn is_included(&self, class_path: &str, method: Option<&str>) -> bool {
        if self.includes.is_empty() {
            return true;
        }
        self.includes.iter().any(|p| {
            p.matches_class(class_path)
                && match (&p.method, method) {
                    (Some(pattern), Some(method)) => pattern.is_match(method),
                    _ => true,
                }
        })
    }

    fn is_excluded(&self, class_path: &str, method: Option<&str>) -> bool {
        // A method-level exclude never removes the whole class.
        self.excludes.iter().any(|p| {
            p.matches_class(class_path)
                && match (&p.method, method) {
                    (None, _) => true,
                    (Some(pattern), Some(method)) => pattern.is_match(method),
                    (Some(_), None) => false,
                }
        })
    }
}

fn parse_all<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<TestPattern>, PatternError> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .filter(|p| !p.trim().is_empty())
        .map(TestPattern::parse)
        .collect()
}

impl TestFilter for TestListResolver {
    fn should_run(&self, resource: &str, method: Option<&str>) -> bool {
        let class_path = class_path(resource);
        self.is_included(&class_path, method) && !self.is_excluded(&class_path, method)
    }
}
