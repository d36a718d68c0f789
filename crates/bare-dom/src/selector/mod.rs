//! CSS Selector engine
//!
//! Parses selector lists and matches them against a [`DomTree`](crate::DomTree).
//! Only syntax that can be answered from the tree alone is supported:
//! interaction states such as `:hover` are rejected as syntax errors.

mod matching;
mod parser;

use crate::DomResult;

/// Comma-separated selector list, e.g. `h1, h2 > span`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> DomResult<Self> {
        parser::parse_selector_list(input)
    }
}

/// Compound selectors joined by combinators
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Combinator between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Sequence of simple selectors without combinators, e.g. `span.child:first-child`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    /// Type selector (lower-cased)
    pub tag: Option<String>,
    /// Universal selector `*`
    pub universal: bool,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<AttributeSelector>,
    pub pseudo_classes: Vec<PseudoClass>,
}

impl CompoundSelector {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && !self.universal
            && self.ids.is_empty()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(value)) = (&self.matcher, value) else {
            return self.matcher.is_none() && value.is_some();
        };
        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_ascii_lowercase()
            } else {
                s.to_string()
            }
        };
        let value = fold(value);
        match matcher {
            AttributeMatcher::Exact(expected) => value == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                value.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                value == expected || value.starts_with(&format!("{expected}-"))
            }
            // Empty operands never match for the substring family
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && value.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && value.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && value.contains(&fold(expected))
            }
        }
    }
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// "odd" (2n+1)
    pub fn odd() -> Self {
        Self::new(2, 1)
    }

    /// "even" (2n)
    pub fn even() -> Self {
        Self::new(2, 0)
    }

    /// Plain index (0n+b)
    pub fn index(n: i32) -> Self {
        Self::new(0, n)
    }

    /// Parse "2n+1", "odd", "even", "-n+3", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match s.as_str() {
            "" => return None,
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else if rest.starts_with('+') || rest.starts_with('-') {
            rest.parse().ok()?
        } else {
            return None;
        };
        Some(Self::new(a, b))
    }

    /// Check if 1-based position `n` matches
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }
        let a = i64::from(self.a);
        let diff = i64::from(n) - i64::from(self.b);
        if a > 0 { diff >= 0 && diff % a == 0 } else { diff <= 0 && diff % a == 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse("EVEN"), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n"), Some(NthExpression::new(2, 0)));
        assert_eq!(NthExpression::parse("2n + 1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("n-1"), Some(NthExpression::new(1, -1)));
        assert_eq!(NthExpression::parse("2n1"), None);
        assert_eq!(NthExpression::parse(""), None);
    }

    #[test]
    fn test_nth_expression_matches() {
        let odd = NthExpression::odd();
        assert!(odd.matches(1) && !odd.matches(2) && odd.matches(3));

        let first_three = NthExpression::new(-1, 3);
        assert!(first_three.matches(1) && first_three.matches(3));
        assert!(!first_three.matches(4));

        assert!(NthExpression::index(2).matches(2));
        assert!(!NthExpression::index(2).matches(4));
    }

    #[test]
    fn test_nth_expression_extreme_offsets() {
        let every = NthExpression::parse("n-2147483648").unwrap();
        assert_eq!(every, NthExpression::new(1, i32::MIN));
        assert!(every.matches(1) && every.matches(i32::MAX));

        let up_to_max = NthExpression::parse("-n+2147483647").unwrap();
        assert!(up_to_max.matches(1) && up_to_max.matches(i32::MAX));

        assert!(!NthExpression::new(-1, i32::MIN).matches(1));
        assert!(NthExpression::new(-1, i32::MAX).matches(i32::MIN + 1));
        assert!(NthExpression::parse("n+2147483648").is_none());
    }

    #[test]
    fn test_attribute_selector() {
        let sel = AttributeSelector {
            name: "lang".to_string(),
            matcher: Some(AttributeMatcher::DashMatch("en".to_string())),
            case_insensitive: false,
        };
        assert!(sel.matches(Some("en")));
        assert!(sel.matches(Some("en-US")));
        assert!(!sel.matches(Some("eng")));
        assert!(!sel.matches(None));

        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("TEXT".to_string())),
            case_insensitive: true,
        };
        assert!(sel.matches(Some("text")));

        let sel = AttributeSelector {
            name: "href".to_string(),
            matcher: Some(AttributeMatcher::Prefix(String::new())),
            case_insensitive: false,
        };
        assert!(!sel.matches(Some("https://")));
    }
}
