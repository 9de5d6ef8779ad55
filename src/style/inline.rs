//! Parsing of author-typed declaration blocks (`width: 10px; color: red`).

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
};
use serde_json::Value;

use super::StyleDeclaration;

/// Parse an inline declaration block into declarations.
///
/// Values are kept as raw CSS text. Invalid declarations, nested rules and
/// at-rules are skipped; absent values are dropped.
///
/// ```
/// use costered::style::parse_inline_declarations;
///
/// let decls = parse_inline_declarations("width: 10px; color: red !important; bogus");
/// assert_eq!(decls.len(), 2);
/// assert!(decls[1].important);
/// ```
pub fn parse_inline_declarations(css: &str) -> Vec<StyleDeclaration> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();

    let mut decl_parser = InlineDeclarationParser {
        declarations: &mut declarations,
    };

    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        // Ignore errors - lenient parsing
        let _ = result;
    }

    declarations
}

struct InlineDeclarationParser<'a> {
    declarations: &'a mut Vec<StyleDeclaration>,
}

impl<'i> DeclarationParser<'i> for InlineDeclarationParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start);

        if let Some(decl) = StyleDeclaration::from_wire(&name, &Value::String(raw.to_string())) {
            self.declarations.retain(|d| !d.matches(&decl.property));
            self.declarations.push(decl);
        }
        Ok(())
    }
}

impl<'i> AtRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> QualifiedRuleParser<'i> for InlineDeclarationParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for InlineDeclarationParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleValue;

    #[test]
    fn test_parse_simple_block() {
        let decls = parse_inline_declarations("width: 80rem; grid-template-columns: repeat(3, 1fr)");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "width");
        assert_eq!(decls[0].value, StyleValue::from("80rem"));
        assert_eq!(decls[1].value, StyleValue::from("repeat(3, 1fr)"));
    }

    #[test]
    fn test_parse_important() {
        let decls = parse_inline_declarations("color: red !important");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].value, StyleValue::from("red"));
        assert!(decls[0].important);
    }

    #[test]
    fn test_parse_skips_invalid() {
        let decls = parse_inline_declarations("; ; nonsense; width: ; gap: 1rem; .x { color: red }");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].property, "gap");
    }

    #[test]
    fn test_duplicate_last_wins() {
        let decls = parse_inline_declarations("gap: 1rem; gap: 2rem");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].value, StyleValue::from("2rem"));
    }
}
