use crate::commands::{CommandDescriptor, CommandRegistry};
use crate::error::{MacroError, Result};
use crate::lexer::{tokenize, SpannedToken};

/// Read position over an immutable token sequence
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [SpannedToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at current token
    pub fn peek(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.pos)
    }

    /// Advance to next token
    pub fn advance(&mut self) -> Option<&'a SpannedToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Skip any run of whitespace tokens
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(SpannedToken::is_whitespace) {
            self.pos += 1;
        }
    }
}

/// Open-bracket counters, one per bracket kind.
///
/// Counters are signed: a stray closing bracket drives its counter below
/// zero and is never reported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct BracketDepth {
    round: i32,
    square: i32,
    curly: i32,
}

impl BracketDepth {
    fn track(&mut self, token: &str) {
        match token {
            "(" => self.round += 1,
            "[" => self.square += 1,
            "{" => self.curly += 1,
            ")" => self.round -= 1,
            "]" => self.square -= 1,
            "}" => self.curly -= 1,
            _ => {}
        }
    }

    fn is_open(&self) -> bool {
        self.round > 0 || self.square > 0 || self.curly > 0
    }

    fn first_unmatched(&self) -> Option<char> {
        [('(', self.round), ('[', self.square), ('{', self.curly)]
            .into_iter()
            .find(|(_, depth)| *depth > 0)
            .map(|(bracket, _)| bracket)
    }
}

/// Consume one argument: tokens up to the next whitespace seen while no
/// bracket is open, or to the end of input.
pub fn parse_argument(cursor: &mut TokenCursor<'_>) -> Result<String> {
    let mut arg = String::new();
    let mut depth = BracketDepth::default();

    while let Some(token) = cursor.peek() {
        if token.is_whitespace() && !depth.is_open() {
            break;
        }
        cursor.advance();
        depth.track(&token.text);
        arg.push_str(&token.text);
    }

    match depth.first_unmatched() {
        Some(bracket) => Err(MacroError::UnmatchedToken { bracket }),
        None => Ok(arg),
    }
}

/// One parsed `@name arg…` call
#[derive(Debug, Clone)]
pub struct Invocation<'r> {
    pub command: &'r CommandDescriptor,
    pub args: Vec<String>,
}

impl Invocation<'_> {
    pub fn name(&self) -> &str {
        &self.command.name
    }
}

/// Parser turning a directive block body into invocations
pub struct Parser<'a, 'r> {
    cursor: TokenCursor<'a>,
    registry: &'r CommandRegistry,
}

impl<'a, 'r> Parser<'a, 'r> {
    pub fn new(tokens: &'a [SpannedToken], registry: &'r CommandRegistry) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            registry,
        }
    }

    /// Parse every directive in the block. Tokens between directives that
    /// do not start with `@` are ignored.
    pub fn parse(&mut self) -> Result<Vec<Invocation<'r>>> {
        let mut invocations = Vec::new();

        while let Some(token) = self.cursor.advance() {
            if let Some(name) = token.directive_name() {
                invocations.push(self.parse_invocation(name)?);
            }
            self.cursor.skip_whitespace();
        }

        Ok(invocations)
    }

    fn parse_invocation(&mut self, name: &str) -> Result<Invocation<'r>> {
        let registry = self.registry;
        let command = registry
            .get(name)
            .ok_or_else(|| MacroError::InvalidCommand {
                name: name.to_string(),
            })?;

        self.cursor.skip_whitespace();

        let mut args = Vec::with_capacity(command.arity);
        while !self.cursor.is_eof() && args.len() < command.arity {
            args.push(parse_argument(&mut self.cursor)?);
            self.cursor.skip_whitespace();
        }

        if args.len() < command.arity {
            return Err(MacroError::ArityMismatch {
                name: name.to_string(),
                expected: command.arity,
                found: args.len(),
            });
        }

        Ok(Invocation { command, args })
    }
}

/// Tokenize and parse a directive block body
pub fn parse_block<'r>(body: &str, registry: &'r CommandRegistry) -> Result<Vec<Invocation<'r>>> {
    let tokens = tokenize(body);
    Parser::new(&tokens, registry).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_stops_at_whitespace() {
        let tokens = tokenize("foo bar");
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(parse_argument(&mut cursor).unwrap(), "foo");
        assert_eq!(cursor.peek().map(|t| t.text.as_str()), Some(" "));
    }

    #[test]
    fn test_argument_spans_whitespace_inside_brackets() {
        let tokens = tokenize("f(a, [b c]) rest");
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(parse_argument(&mut cursor).unwrap(), "f(a, [b c])");
    }

    #[test]
    fn test_stray_closing_bracket_is_accepted() {
        let tokens = tokenize("a) b");
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(parse_argument(&mut cursor).unwrap(), "a)");
    }

    #[test]
    fn test_mismatched_kinds_balance_independently() {
        // `(]` leaves round open even though a closing bracket followed
        let tokens = tokenize("(]");
        let mut cursor = TokenCursor::new(&tokens);
        let err = parse_argument(&mut cursor).unwrap_err();
        assert!(matches!(err, MacroError::UnmatchedToken { bracket: '(', .. }));
    }
}
