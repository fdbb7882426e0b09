//! Argument decomposition.
//!
//! Splits matched command text into named positional captures, a greedy
//! rest capture, long options (`--flag` / `--flag value`), and leftover
//! unnamed tokens.

use std::collections::HashMap;

use crate::pattern::PatternSlot;

/// A single argument value: a string or a boolean flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    /// A captured string value.
    Text(String),
    /// A valueless `--flag`.
    Flag,
}

impl ArgValue {
    /// Returns the string value, if this is a text argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag => None,
        }
    }

    /// Whether this is a boolean flag.
    #[must_use]
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

/// The argument bag produced by [`decompose`].
///
/// Named entries hold positional/rest captures and recognized options;
/// `unnamed` holds leftover tokens in their original left-to-right order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandArgs {
    named: HashMap<String, ArgValue>,
    unnamed: Vec<String>,
}

impl CommandArgs {
    /// Looks up a named argument.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.named.get(name)
    }

    /// Returns the string value of a named argument, if present and textual.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.named.get(name).and_then(ArgValue::as_text)
    }

    /// Whether `name` was given as a valueless `--flag`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.named.get(name).is_some_and(ArgValue::is_flag)
    }

    /// Returns the leftover unnamed tokens, in order of appearance.
    #[must_use]
    pub fn unnamed(&self) -> &[String] {
        &self.unnamed
    }

    /// Number of named entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// Whether the bag holds no named entries and no unnamed tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.named.is_empty() && self.unnamed.is_empty()
    }
}

/// Decomposes `text` into an argument bag against the declared slots.
///
/// Left to right over whitespace tokens:
///
/// 1. Before the rest slot engages, a token starting with `--` is a long
///    option: if the next token exists and does not itself start with
///    `--`, it is consumed as the option's value, otherwise the option is
///    a boolean flag.
/// 2. Other tokens bind to the declared slots in order. A rest slot
///    consumes every remaining token verbatim (options are not extracted
///    from a rest span), joined with single spaces.
/// 3. Tokens left over once all slots are satisfied go to the unnamed
///    list in order.
///
/// A bare `--` token is not an option. The function never mutates `slots`
/// and allocates a fresh bag per call.
#[must_use]
pub fn decompose(text: &str, slots: &[PatternSlot]) -> CommandArgs {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let mut named = HashMap::new();
    let mut unnamed = Vec::new();
    let mut slot_index = 0;
    let mut index = 0;

    while index < tokens.len() {
        let token = tokens[index];

        if let Some(name) = token.strip_prefix("--").filter(|name| !name.is_empty()) {
            match tokens.get(index + 1) {
                Some(value) if !value.starts_with("--") => {
                    named.insert(name.to_string(), ArgValue::Text((*value).to_string()));
                    index += 2;
                }
                _ => {
                    named.insert(name.to_string(), ArgValue::Flag);
                    index += 1;
                }
            }
            continue;
        }

        match slots.get(slot_index) {
            // A plain token reaching the rest slot engages it for everything
            // that remains, option lookalikes included.
            Some(slot) if slot.rest => {
                named.insert(slot.name.clone(), ArgValue::Text(tokens[index..].join(" ")));
                slot_index += 1;
                break;
            }
            Some(slot) => {
                named.insert(slot.name.clone(), ArgValue::Text(token.to_string()));
                slot_index += 1;
            }
            None => unnamed.push(token.to_string()),
        }
        index += 1;
    }

    // A trailing rest slot that no token reached still captures (empty).
    if let Some(slot) = slots.get(slot_index) {
        if slot.rest {
            named.insert(slot.name.clone(), ArgValue::Text(String::new()));
        }
    }

    CommandArgs { named, unnamed }
}
