//! Name patterns for bulk selection of collections and records.
//!
//! A pattern is auto-classified: anything carrying regex syntax is compiled
//! as a regex and searched for anywhere in the candidate; everything else is
//! a shell glob matched against the whole candidate.
//!
//! When a glob cannot be built the matcher degrades to a substring check on
//! the pattern with one leading and one trailing `*` removed. That keeps
//! bulk deletes from failing outright on odd patterns, at the cost of
//! possible over-broad matches; callers that delete should show the selection
//! before acting on it.

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use thiserror::Error;

/// Characters that mark a pattern as a regex.
const REGEX_CHARS: &[char] = &['^', '$', '\\', '[', ']', '(', ')', '{', '}', '|', '+', '?'];

/// Dot-quantifier sequences that mark a pattern as a regex. A lone `.` is a
/// literal so that `*.png` stays a glob.
const REGEX_SEQUENCES: &[&str] = &[".*", ".+", ".?"];

/// Errors for patterns the caller explicitly asked to treat as regex.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// How a compiled pattern evaluates candidates.
#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Glob(GlobMatcher),
    Substring(String),
}

/// A compiled selection pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

/// True when the pattern should be treated as a regex.
#[must_use]
pub fn looks_like_regex(pattern: &str) -> bool {
    pattern.contains(REGEX_CHARS) || REGEX_SEQUENCES.iter().any(|seq| pattern.contains(seq))
}

impl Pattern {
    /// Compile with auto-detection. Never fails; see the module docs for the
    /// fallback chain.
    #[must_use]
    pub fn new(pattern: &str) -> Self {
        let matcher = if looks_like_regex(pattern) {
            match Regex::new(pattern) {
                Ok(regex) => Matcher::Regex(regex),
                Err(err) => {
                    tracing::debug!(pattern, %err, "regex did not compile, trying glob");
                    glob_or_substring(pattern)
                }
            }
        } else {
            glob_or_substring(pattern)
        };

        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    /// Compile as a regex with no fallback.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidRegex` if the pattern does not compile.
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|source| PatternError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: Matcher::Regex(regex),
        })
    }

    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        match &self.matcher {
            Matcher::Regex(regex) => regex.is_match(candidate),
            Matcher::Glob(glob) => glob.is_match(candidate),
            Matcher::Substring(needle) => candidate.contains(needle.as_str()),
        }
    }

    /// True if any of the candidates matches.
    #[must_use]
    pub fn matches_any<I, S>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        candidates.into_iter().any(|c| self.is_match(c.as_ref()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Label of the strategy in use: `regex`, `glob` or `substring`.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self.matcher {
            Matcher::Regex(_) => "regex",
            Matcher::Glob(_) => "glob",
            Matcher::Substring(_) => "substring",
        }
    }
}

fn glob_or_substring(pattern: &str) -> Matcher {
    match GlobBuilder::new(pattern).literal_separator(false).build() {
        Ok(glob) => Matcher::Glob(glob.compile_matcher()),
        Err(err) => {
            tracing::debug!(pattern, %err, "glob did not compile, using substring match");
            let trimmed = pattern.strip_prefix('*').unwrap_or(pattern);
            let trimmed = trimmed.strip_suffix('*').unwrap_or(trimmed);
            Matcher::Substring(trimmed.to_string())
        }
    }
}

/// One-shot match of a candidate against a pattern.
#[must_use]
pub fn matches(candidate: &str, pattern: &str) -> bool {
    Pattern::new(pattern).is_match(candidate)
}
