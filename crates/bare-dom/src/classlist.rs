//! Class token list (classList)
//!
//! Ordered, duplicate-free set of class names backing the `class` attribute.

use crate::{DomError, DomResult};

/// Class token list for an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `class` attribute value. Duplicates collapse to the first occurrence.
    pub fn parse(value: &str) -> Self {
        let mut list = Self::new();
        for token in value.split_ascii_whitespace() {
            if !list.contains(token) {
                list.tokens.push(token.to_string());
            }
        }
        list
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Membership test. Never fails, even for tokens `add` would reject.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add a token. Adding a present token is a no-op.
    pub fn add(&mut self, token: &str) -> DomResult<()> {
        validate(token)?;
        if !self.contains(token) {
            self.tokens.push(token.to_string());
        }
        Ok(())
    }

    /// Remove a token. Removing an absent token is a no-op.
    pub fn remove(&mut self, token: &str) -> DomResult<()> {
        validate(token)?;
        self.tokens.retain(|t| t != token);
        Ok(())
    }

    /// Toggle a token, returns whether it is present afterwards.
    ///
    /// `Some(true)` only adds and `Some(false)` only removes.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> DomResult<bool> {
        validate(token)?;
        let present = self.contains(token);
        match force {
            Some(true) | None if !present => {
                self.tokens.push(token.to_string());
                Ok(true)
            }
            Some(false) | None if present => {
                self.tokens.retain(|t| t != token);
                Ok(false)
            }
            _ => Ok(present),
        }
    }

    /// Replace `old` with `new` in place, returns whether `old` was present
    pub fn replace(&mut self, old: &str, new: &str) -> DomResult<bool> {
        validate(old)?;
        validate(new)?;
        let Some(pos) = self.tokens.iter().position(|t| t == old) else {
            return Ok(false);
        };
        if self.contains(new) {
            self.tokens.remove(pos);
        } else {
            self.tokens[pos] = new.to_string();
        }
        Ok(true)
    }

    /// Serialized attribute value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}

fn validate(token: &str) -> DomResult<()> {
    if token.is_empty() {
        return Err(DomError::EmptyToken);
    }
    if token.bytes().any(|b| b.is_ascii_whitespace()) {
        return Err(DomError::InvalidCharacter { token: token.to_string() });
    }
    Ok(())
}
