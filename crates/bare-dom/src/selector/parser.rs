//! Selector parser

use super::{
    AttributeMatcher, AttributeSelector, Combinator, ComplexSelector, CompoundSelector,
    NthExpression, PseudoClass, SelectorList,
};
use crate::{DomError, DomResult};

pub(super) fn parse_selector_list(input: &str) -> DomResult<SelectorList> {
    let mut parser = Parser { input, pos: 0 };
    let list = parser.list(false).ok_or_else(|| DomError::syntax(input))?;
    if parser.peek().is_some() {
        return Err(DomError::syntax(input));
    }
    Ok(list)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skip whitespace, returns whether any was skipped
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos != start
    }

    /// Selector list; `nested` lists end at an unconsumed `)`
    fn list(&mut self, nested: bool) -> Option<SelectorList> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.complex()?);
            self.skip_ws();
            match self.peek() {
                None if !nested => break,
                Some(')') if nested => break,
                Some(',') => {
                    self.bump();
                }
                _ => return None,
            }
        }
        Some(SelectorList { selectors })
    }

    fn complex(&mut self) -> Option<ComplexSelector> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                None | Some(',') | Some(')') => break,
                Some(_) if had_ws => Combinator::Descendant,
                Some(_) => return None,
            };
            if combinator != Combinator::Descendant {
                self.bump();
                self.skip_ws();
            }
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        Some(ComplexSelector { compounds, combinators })
    }

    fn compound(&mut self) -> Option<CompoundSelector> {
        let mut compound = CompoundSelector::default();

        if self.eat('*') {
            compound.universal = true;
        } else if self.peek().is_some_and(is_ident_start) {
            compound.tag = Some(self.ident()?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.ids.push(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                Some('[') => {
                    self.bump();
                    compound.attributes.push(self.attribute()?);
                }
                Some(':') => {
                    self.bump();
                    compound.pseudo_classes.push(self.pseudo_class()?);
                }
                _ => break,
            }
        }

        (!compound.is_empty()).then_some(compound)
    }

    fn ident(&mut self) -> Option<String> {
        let mut out = String::new();
        match self.peek()? {
            '\\' => {
                self.bump();
                out.push(self.bump()?);
            }
            '-' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => return None,
            c if is_ident_start(c) => {
                self.bump();
                out.push(c);
            }
            _ => return None,
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                out.push(self.bump()?);
            } else if is_ident_char(c) {
                self.bump();
                out.push(c);
            } else {
                break;
            }
        }
        Some(out)
    }

    /// After `[`
    fn attribute(&mut self) -> Option<AttributeSelector> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();

        if self.eat(']') {
            return Some(AttributeSelector { name, matcher: None, case_insensitive: false });
        }

        let op = match self.bump()? {
            '=' => None,
            c @ ('~' | '|' | '^' | '$' | '*') if self.eat('=') => Some(c),
            _ => return None,
        };
        self.skip_ws();
        let value = match self.peek()? {
            quote @ ('"' | '\'') => {
                self.bump();
                self.string(quote)?
            }
            _ => self.ident()?,
        };
        let had_ws = self.skip_ws();
        let case_insensitive = match self.peek()? {
            'i' | 'I' if had_ws => {
                self.bump();
                true
            }
            's' | 'S' if had_ws => {
                self.bump();
                false
            }
            _ => false,
        };
        self.skip_ws();
        if !self.eat(']') {
            return None;
        }

        let matcher = match op {
            None => AttributeMatcher::Exact(value),
            Some('~') => AttributeMatcher::Contains(value),
            Some('|') => AttributeMatcher::DashMatch(value),
            Some('^') => AttributeMatcher::Prefix(value),
            Some('$') => AttributeMatcher::Suffix(value),
            Some(_) => AttributeMatcher::Substring(value),
        };
        Some(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    /// Quoted string body, after the opening quote
    fn string(&mut self, quote: char) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                '\\' => out.push(self.bump()?),
                c if c == quote => return Some(out),
                c => out.push(c),
            }
        }
    }

    /// After `:`
    fn pseudo_class(&mut self) -> Option<PseudoClass> {
        // `::pseudo-element` starts with an ident-less colon
        let name = self.ident()?.to_ascii_lowercase();

        if !self.eat('(') {
            return Some(match name.as_str() {
                "root" => PseudoClass::Root,
                "empty" => PseudoClass::Empty,
                "first-child" => PseudoClass::FirstChild,
                "last-child" => PseudoClass::LastChild,
                "only-child" => PseudoClass::OnlyChild,
                "first-of-type" => PseudoClass::FirstOfType,
                "last-of-type" => PseudoClass::LastOfType,
                "only-of-type" => PseudoClass::OnlyOfType,
                _ => return None,
            });
        }

        let pseudo = match name.as_str() {
            "nth-child" => PseudoClass::NthChild(self.nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.nth()?),
            "not" => PseudoClass::Not(self.list(true)?),
            "is" => PseudoClass::Is(self.list(true)?),
            "where" => PseudoClass::Where(self.list(true)?),
            _ => return None,
        };
        self.eat(')').then_some(pseudo)
    }

    /// Raw An+B argument up to, not including, `)`
    fn nth(&mut self) -> Option<NthExpression> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c != ')') {
            self.bump();
        }
        NthExpression::parse(&self.input[start..self.pos])
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SelectorList {
        parse_selector_list(s).unwrap_or_else(|e| panic!("{s}: {e}"))
    }

    #[test]
    fn test_compound() {
        let list = parse("span.child.child-1#x[data-k='v']:first-child");
        let compound = &list.selectors[0].compounds[0];
        assert_eq!(compound.tag.as_deref(), Some("span"));
        assert_eq!(compound.classes, vec!["child", "child-1"]);
        assert_eq!(compound.ids, vec!["x"]);
        assert_eq!(compound.attributes[0].name, "data-k");
        assert_eq!(compound.pseudo_classes, vec![PseudoClass::FirstChild]);
    }

    #[test]
    fn test_combinators_with_and_without_spaces() {
        let spaced = parse("div:first-child + .div > span:nth-child(2) ~ .span + .child");
        let tight = parse("div:first-child+.div>span:nth-child(2)~.span+.child");
        assert_eq!(spaced, tight);
        assert_eq!(
            spaced.selectors[0].combinators,
            vec![
                Combinator::NextSibling,
                Combinator::Child,
                Combinator::SubsequentSibling,
                Combinator::NextSibling,
            ]
        );
    }

    #[test]
    fn test_descendant_and_list() {
        let list = parse("  ul li ,  p  ");
        assert_eq!(list.selectors.len(), 2);
        assert_eq!(list.selectors[0].combinators, vec![Combinator::Descendant]);
        assert_eq!(list.selectors[1].compounds[0].tag.as_deref(), Some("p"));
    }

    #[test]
    fn test_attribute_forms() {
        let list = parse(r#"a[href^="https"][ rel ~= noopener ][lang|=en i]"#);
        let attrs = &list.selectors[0].compounds[0].attributes;
        assert_eq!(attrs[0].matcher, Some(AttributeMatcher::Prefix("https".into())));
        assert_eq!(attrs[1].matcher, Some(AttributeMatcher::Contains("noopener".into())));
        assert_eq!(attrs[2].matcher, Some(AttributeMatcher::DashMatch("en".into())));
        assert!(attrs[2].case_insensitive);
    }

    #[test]
    fn test_functional_pseudo_classes() {
        let list = parse("li:not(.a, .b):nth-last-of-type( 2n + 1 )");
        let pseudos = &list.selectors[0].compounds[0].pseudo_classes;
        let PseudoClass::Not(inner) = &pseudos[0] else {
            panic!("expected :not");
        };
        assert_eq!(inner.selectors.len(), 2);
        assert_eq!(pseudos[1], PseudoClass::NthLastOfType(NthExpression::new(2, 1)));
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in [
            "", "   ", "#", ".", "div >", "> div", "a,,b", "a,", "[", "[x", "[x=]", "p:hover",
            "p::before", ":nth-child(x)", "#1a", "div!", "a:not(b", "a)",
        ] {
            assert!(
                matches!(parse_selector_list(bad), Err(DomError::Syntax { .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
