//! Glob matching of changed file paths

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use tracing::warn;

/// Pattern matcher with precompiled glob patterns
///
/// `*` stays within one path segment, `**` crosses separators, and
/// dotfiles match like any other path. Patterns prefixed with `!` exclude
/// paths; a list made only of exclusions matches everything else.
/// A pattern that is not valid glob syntax matches its own text literally.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl PatternMatcher {
    /// Compile a pattern list
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut include_builder = GlobSetBuilder::new();
        let mut exclude_builder = GlobSetBuilder::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let (builder, pattern) = match pattern.strip_prefix('!') {
                Some(negated) => (&mut exclude_builder, negated),
                None => (&mut include_builder, pattern),
            };
            if let Some(glob) = compile(pattern) {
                builder.add(glob);
            }
        }

        Self {
            include_set: build_set(&include_builder),
            exclude_set: build_set(&exclude_builder),
        }
    }

    /// Whether `path` matches the pattern list
    #[inline]
    pub fn matches(&self, path: &str) -> bool {
        if self.include_set.is_empty() && self.exclude_set.is_empty() {
            return false;
        }
        if !self.include_set.is_empty() && !self.include_set.is_match(path) {
            return false;
        }
        !self.exclude_set.is_match(path)
    }

    /// Matching paths, in input order with duplicates removed
    pub fn filter<'a, S: AsRef<str>>(&self, paths: &'a [S]) -> Vec<&'a str> {
        let mut seen = HashSet::with_capacity(paths.len());
        paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|path| self.matches(path) && seen.insert(*path))
            .collect()
    }
}

fn compile(pattern: &str) -> Option<Glob> {
    glob(pattern)
        .or_else(|_| glob(&globset::escape(pattern)))
        .ok()
}

fn glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

// Only regex size limits can fail here; such a set matches nothing.
fn build_set(builder: &GlobSetBuilder) -> GlobSet {
    builder.build().unwrap_or_else(|err| {
        warn!("Ignoring patterns that could not be compiled: {}", err);
        GlobSet::empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_star_crosses_separators() {
        let matcher = PatternMatcher::new(&["db/migrate/**"]);

        assert!(matcher.matches("db/migrate/20250913000000_test.rb"));
        assert!(matcher.matches("db/migrate/nested/deeper.sql"));
        assert!(!matcher.matches("db/schema.rb"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let matcher = PatternMatcher::new(&["spec/*.rb"]);

        assert!(matcher.matches("spec/spec_helper.rb"));
        assert!(!matcher.matches("spec/models/user_spec.rb"));
    }

    #[test]
    fn test_dotfiles_match() {
        let matcher = PatternMatcher::new(&[".github/**", "config/**"]);

        assert!(matcher.matches(".github/codemention.yml"));
        assert!(matcher.matches(".github/workflows/codemention.yml"));
        assert!(matcher.matches("config/.env.production"));
    }

    #[test]
    fn test_negated_patterns_exclude() {
        let matcher = PatternMatcher::new(&["src/**", "!src/**/*.md"]);

        assert!(matcher.matches("src/lib.rs"));
        assert!(!matcher.matches("src/docs/README.md"));

        let only_negations = PatternMatcher::new(&["!*.md"]);
        assert!(only_negations.matches("main.rs"));
        assert!(!only_negations.matches("README.md"));
    }

    #[test]
    fn test_empty_pattern_list_matches_nothing() {
        let matcher = PatternMatcher::new::<&str>(&[]);
        assert!(!matcher.matches("anything"));
    }

    #[test]
    fn test_filter_preserves_order_and_dedups() {
        let matcher = PatternMatcher::new(&["*.rb", "lib/**"]);
        let files = vec![
            "z.rb".to_string(),
            "lib/a.rs".to_string(),
            "README.md".to_string(),
            "z.rb".to_string(),
            "a.rb".to_string(),
        ];

        assert_eq!(matcher.filter(&files), vec!["z.rb", "lib/a.rs", "a.rb"]);
    }

    #[test]
    fn test_invalid_glob_matches_literally() {
        let matcher = PatternMatcher::new(&["src/[oops"]);

        assert!(matcher.matches("src/[oops"));
        assert!(!matcher.matches("src/main.rs"));
        assert!(!matcher.matches("src/o"));
    }

    #[test]
    fn test_invalid_negated_glob_excludes_literally() {
        let matcher = PatternMatcher::new(&["src/**", "!src/{a"]);

        assert!(matcher.matches("src/main.rs"));
        assert!(!matcher.matches("src/{a"));
    }
}
