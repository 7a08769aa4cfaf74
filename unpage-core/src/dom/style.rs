//! Inline `style` attribute declarations.
//!
//! Parsed with `cssparser` as a declaration list: comments are skipped, declarations the
//! tokenizer cannot read are dropped, and a trailing `!important` is not part of the value.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser, ToCss, Token,
};

/// One `property: value` pair from a style attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

struct InlineStyleParser;

impl<'i> AtRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type AtRule = StyleDeclaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineStyleParser {
    type Prelude = ();
    type QualifiedRule = StyleDeclaration;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> DeclarationParser<'i> for InlineStyleParser {
    type Declaration = StyleDeclaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let mut value = String::new();
        let important = write_value(input, &mut value, true)?;
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok(StyleDeclaration {
            property: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'i> RuleBodyItemParser<'i, StyleDeclaration, ()> for InlineStyleParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Re-serialize the tokens of a value, collapsing whitespace and dropping comments.
/// Returns whether the value ended in `!important`.
fn write_value<'i>(
    input: &mut Parser<'i, '_>,
    out: &mut String,
    top_level: bool,
) -> Result<bool, ParseError<'i, ()>> {
    loop {
        if top_level && input.try_parse(cssparser::parse_important).is_ok() {
            input.expect_exhausted()?;
            return Ok(true);
        }
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(false),
        };
        let close = match token {
            Token::WhiteSpace(_) => {
                if !out.is_empty() && !out.ends_with(' ') {
                    out.push(' ');
                }
                continue;
            }
            Token::Function(_) | Token::ParenthesisBlock => Some(')'),
            Token::SquareBracketBlock => Some(']'),
            Token::CurlyBracketBlock => Some('}'),
            _ => None,
        };
        let _ = token.to_css(out);
        if let Some(close) = close {
            input.parse_nested_block(|nested| write_value(nested, out, false).map(|_| ()))?;
            out.push(close);
        }
    }
}

/// Every readable declaration of a `style` attribute, in source order.
pub fn declarations(style: &str) -> Vec<StyleDeclaration> {
    let mut input = ParserInput::new(style);
    let mut parser = Parser::new(&mut input);
    let mut style_parser = InlineStyleParser;
    RuleBodyParser::new(&mut parser, &mut style_parser)
        .filter_map(Result::ok)
        .collect()
}

/// Value of `property` in a `style` attribute, following the cascade inside one
/// attribute: an important declaration beats a normal one, otherwise the last one wins.
pub fn declaration(style: &str, property: &str) -> Option<String> {
    let matching: Vec<StyleDeclaration> = declarations(style)
        .into_iter()
        .filter(|decl| decl.property.eq_ignore_ascii_case(property))
        .collect();
    matching
        .iter()
        .rev()
        .find(|decl| decl.important)
        .or_else(|| matching.last())
        .map(|decl| decl.value.clone())
}
