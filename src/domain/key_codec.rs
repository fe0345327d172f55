//! Short key generation and validation against a configured pattern.
//!
//! A single regular expression drives both directions: keys are sampled from
//! the pattern's language and candidate keys are matched against the whole
//! pattern. The codec is built once from configuration and shared.

use rand::Rng;
use regex::Regex;
use regex_syntax::hir::{Hir, HirKind};
use std::fmt;

/// Upper bound for unbounded repetitions (`*`, `+`, `{n,}`) when sampling.
const MAX_REPEAT: u32 = 16;

/// Number of keys sampled at construction to prove the pattern is self-consistent.
const PROBE_SAMPLES: usize = 64;

/// Default pattern: 3-16 ASCII alphanumerics.
pub const DEFAULT_KEY_PATTERN: &str = "^[a-zA-Z0-9]{3,16}$";

/// Errors raised when a key pattern cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum KeyPatternError {
    #[error("key pattern '{pattern}' is not a valid regular expression: {reason}")]
    Invalid { pattern: String, reason: String },

    #[error("key pattern '{pattern}' cannot be used to generate keys: {reason}")]
    Ungenerable { pattern: String, reason: String },

    #[error("key pattern '{pattern}' generated key '{sample}' which it does not accept")]
    Inconsistent { pattern: String, sample: String },
}

/// Generator and validator for redirect keys.
///
/// # Examples
///
/// ```ignore
/// let codec = KeyCodec::new("^[a-z0-9]{6}$")?;
/// let key = codec.generate();
/// assert!(codec.validate(&key));
/// assert!(!codec.validate("AB!"));
/// ```
pub struct KeyCodec {
    pattern: String,
    matcher: Regex,
    sampler: rand_regex::Regex,
}

impl KeyCodec {
    /// Compiles `pattern` for both matching and sampling.
    ///
    /// # Errors
    ///
    /// - [`KeyPatternError::Invalid`] if the pattern does not compile
    /// - [`KeyPatternError::Ungenerable`] if keys cannot be sampled from it
    /// - [`KeyPatternError::Inconsistent`] if a sampled key is empty or does
    ///   not match the pattern
    pub fn new(pattern: &str) -> Result<Self, KeyPatternError> {
        let matcher = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            KeyPatternError::Invalid {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        let ungenerable = |reason: String| KeyPatternError::Ungenerable {
            pattern: pattern.to_string(),
            reason,
        };
        let hir = regex_syntax::Parser::new()
            .parse(pattern)
            .map_err(|e| ungenerable(e.to_string()))?;
        // rand_regex samples `{n,}` from n..=n+max_repeat
        let sampler = rand_regex::Regex::with_hir(drop_assertions(hir), MAX_REPEAT - 1)
            .map_err(|e| ungenerable(e.to_string()))?;

        let codec = Self {
            pattern: pattern.to_string(),
            matcher,
            sampler,
        };

        let mut rng = rand::rng();
        for _ in 0..PROBE_SAMPLES {
            let sample: String = rng.sample(&codec.sampler);
            if !codec.validate(&sample) {
                return Err(KeyPatternError::Inconsistent {
                    pattern: codec.pattern,
                    sample,
                });
            }
        }

        Ok(codec)
    }

    /// Samples a fresh key from the pattern's language.
    pub fn generate(&self) -> String {
        rand::rng().sample(&self.sampler)
    }

    /// Returns whether `candidate` matches the whole pattern.
    ///
    /// Empty candidates never validate, even if the pattern would accept them.
    pub fn validate(&self, candidate: &str) -> bool {
        !candidate.is_empty() && self.matcher.is_match(candidate)
    }

    /// The configured pattern, as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl fmt::Debug for KeyCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyCodec")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Replaces every zero-width assertion (`^`, `$`, `\b`, ...) with an empty node.
///
/// The matcher enforces anchoring on its own, so the sampler only needs the
/// consuming parts. Assertions that constrain the result beyond anchoring
/// surface later as [`KeyPatternError::Inconsistent`].
fn drop_assertions(hir: Hir) -> Hir {
    match hir.into_kind() {
        HirKind::Empty | HirKind::Look(_) => Hir::empty(),
        HirKind::Literal(literal) => Hir::literal(literal.0),
        HirKind::Class(class) => Hir::class(class),
        HirKind::Repetition(mut repetition) => {
            repetition.sub = Box::new(drop_assertions(*repetition.sub));
            Hir::repetition(repetition)
        }
        HirKind::Capture(mut capture) => {
            capture.sub = Box::new(drop_assertions(*capture.sub));
            Hir::capture(capture)
        }
        HirKind::Concat(subs) => Hir::concat(subs.into_iter().map(drop_assertions).collect()),
        HirKind::Alternation(subs) => {
            Hir::alternation(subs.into_iter().map(drop_assertions).collect())
        }
    }
}
