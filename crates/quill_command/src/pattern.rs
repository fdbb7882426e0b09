//! Command pattern compilation and matching.
//!
//! A pattern string is whitespace-tokenized into literals, positional
//! slots (`<name>`), and at most one trailing rest slot (`<...name>`).
//! Matching is a boolean predicate; value extraction is delegated to the
//! argument decomposer with the compiled slot list.

use quill_foundation::{Error, PatternDefect, Result};

/// A declared capture slot within a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSlot {
    /// The slot name, unique within its pattern.
    pub name: String,
    /// Whether the slot greedily captures all remaining text.
    pub rest: bool,
}

/// A compiled pattern element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternToken {
    /// A word the input must contain verbatim at the same position.
    Literal(String),
    /// A single-token named capture.
    Positional(String),
    /// A final, greedy named capture.
    Rest(String),
}

/// A compiled command pattern.
///
/// Immutable once built. Two patterns with identical tokens are equivalent
/// but never shared; each command owns its own compiled pattern.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    tokens: Vec<PatternToken>,
    slots: Vec<PatternSlot>,
}

impl Pattern {
    /// Compiles a pattern string.
    ///
    /// # Errors
    ///
    /// Rejects malformed patterns at compile time: an empty pattern, a slot
    /// without a name, duplicate slot names, a rest slot that is not the
    /// final token, and more than one rest slot.
    pub fn compile(source: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut slots: Vec<PatternSlot> = Vec::new();

        for word in source.split_whitespace() {
            if slots.last().is_some_and(|slot| slot.rest) {
                let defect = if parse_slot(word).is_some_and(|(_, rest)| rest) {
                    PatternDefect::MultipleRestSlots
                } else {
                    PatternDefect::RestNotLast
                };
                return Err(Error::malformed_pattern(source, defect));
            }

            match parse_slot(word) {
                Some((name, rest)) => {
                    if name.is_empty() {
                        return Err(Error::malformed_pattern(
                            source,
                            PatternDefect::EmptySlotName,
                        ));
                    }
                    if slots.iter().any(|slot| slot.name == name) {
                        return Err(Error::malformed_pattern(
                            source,
                            PatternDefect::DuplicateSlotName(name.to_string()),
                        ));
                    }
                    slots.push(PatternSlot {
                        name: name.to_string(),
                        rest,
                    });
                    tokens.push(if rest {
                        PatternToken::Rest(name.to_string())
                    } else {
                        PatternToken::Positional(name.to_string())
                    });
                }
                None => tokens.push(PatternToken::Literal(word.to_string())),
            }
        }

        if tokens.is_empty() {
            return Err(Error::malformed_pattern(source, PatternDefect::Empty));
        }

        Ok(Self {
            source: source.to_string(),
            tokens,
            slots,
        })
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declared capture slots in order.
    #[must_use]
    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    /// Returns the compiled pattern elements in order.
    #[must_use]
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    /// Whether the pattern ends in a rest slot.
    #[must_use]
    pub fn has_rest(&self) -> bool {
        self.slots.last().is_some_and(|slot| slot.rest)
    }

    /// Tests whether `text` matches this pattern.
    ///
    /// Literal positions require exact string equality (no case folding).
    /// The token count must match exactly, except that a trailing rest slot
    /// accepts any count of at least the non-rest token count (a rest slot
    /// may capture zero tokens).
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let words: Vec<&str> = text.split_whitespace().collect();

        if self.has_rest() {
            if words.len() < self.tokens.len() - 1 {
                return false;
            }
        } else if words.len() != self.tokens.len() {
            return false;
        }

        self.tokens.iter().zip(&words).all(|(token, word)| {
            match token {
                PatternToken::Literal(literal) => literal == word,
                // Presence is guaranteed by the count check above.
                PatternToken::Positional(_) | PatternToken::Rest(_) => true,
            }
        })
    }

    /// Strips literal positions from matching text, returning the argument
    /// portion: slot-bound tokens and the rest span, joined by single
    /// spaces. Returns `None` when the text does not match.
    #[must_use]
    pub fn payload(&self, text: &str) -> Option<String> {
        if !self.matches(text) {
            return None;
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let mut kept: Vec<&str> = Vec::new();
        let mut index = 0;

        for token in &self.tokens {
            match token {
                PatternToken::Literal(_) => index += 1,
                PatternToken::Positional(_) => {
                    if let Some(word) = words.get(index) {
                        kept.push(word);
                    }
                    index += 1;
                }
                PatternToken::Rest(_) => {
                    kept.extend(&words[index..]);
                    index = words.len();
                }
            }
        }

        Some(kept.join(" "))
    }
}

/// Parses a `<name>` or `<...name>` slot declaration.
///
/// Returns `(name, rest)`, or `None` for a literal token.
fn parse_slot(word: &str) -> Option<(&str, bool)> {
    let inner = word.strip_prefix('<')?.strip_suffix('>')?;
    match inner.strip_prefix("...") {
        Some(name) => Some((name, true)),
        None => Some((inner, false)),
    }
}
