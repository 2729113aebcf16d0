use std::{collections::VecDeque, fmt};

use logos::{Lexer, Logos, Skip};

use crate::error::LexError;

/// Represents the category of a lexeme.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Literal categories carry their decoded value; every other category is
/// fully described by its variant.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(error = LexFailure)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Float literal tokens, such as `3.14` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    FloatLiteral(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    IntLiteral(i64),
    /// String literal tokens. The payload is the raw text between the quotes.
    #[regex(r#""[^"]*""#, parse_string)]
    StringLiteral(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// `int`
    #[token("int")]
    Int,
    /// `float`
    #[token("float")]
    Float,
    /// `string`
    #[token("string")]
    String,
    /// `void`
    #[token("void")]
    Void,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `return`
    #[token("return")]
    Return,

    /// `// Comments.`
    #[token("//", skip_line_comment)]
    Comment,
    /// ```text
    /// /* Block comments. */
    /// ```
    #[token("/*", skip_block_comment)]
    BlockComment,
    /// Line breaks; they only advance the line counter.
    #[token("\n", newline)]
    NewLine,

    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Pipe,
    /// `^`
    #[token("^")]
    Caret,
    /// `~`
    #[token("~")]
    Tilde,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// `=`
    #[token("=")]
    Assign,
    /// `+=`
    #[token("+=")]
    PlusAssign,
    /// `-=`
    #[token("-=")]
    MinusAssign,
    /// `*=`
    #[token("*=")]
    StarAssign,
    /// `/=`
    #[token("/=")]
    SlashAssign,
    /// `%=`
    #[token("%=")]
    PercentAssign,
    /// `&=`
    #[token("&=")]
    AmpersandAssign,
    /// `|=`
    #[token("|=")]
    PipeAssign,
    /// `^=`
    #[token("^=")]
    CaretAssign,
    /// `<<=`
    #[token("<<=")]
    ShiftLeftAssign,
    /// `>>=`
    #[token(">>=")]
    ShiftRightAssign,

    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,

    /// End of input. Never produced by the generated lexer itself; the
    /// [`LexemeStream`] appends it once the source is exhausted.
    Eof,
}

/// Why the generated lexer rejected a piece of input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LexFailure {
    #[default]
    UnrecognizedCharacter,
    /// A run of digits that does not fit in an `i64`.
    IntegerOutOfRange,
}

/// Position bookkeeping carried through the generated lexer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexerExtras {
    /// The current 1-based line.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for Token {
    fn default() -> Self {
        Self::Eof
    }
}

impl Token {
    /// Returns `true` for the `int`, `float` and `string` keywords.
    #[must_use]
    pub const fn is_value_type(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::String)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::FloatLiteral(_) => "float literal",
            Self::IntLiteral(_) => "int literal",
            Self::StringLiteral(_) => "string literal",
            Self::Identifier(_) => "identifier",
            Self::Int => "'int'",
            Self::Float => "'float'",
            Self::String => "'string'",
            Self::Void => "'void'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::For => "'for'",
            Self::While => "'while'",
            Self::Do => "'do'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Return => "'return'",
            Self::Comment | Self::BlockComment => "comment",
            Self::NewLine => "newline",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Ampersand => "'&'",
            Self::Pipe => "'|'",
            Self::Caret => "'^'",
            Self::Tilde => "'~'",
            Self::ShiftLeft => "'<<'",
            Self::ShiftRight => "'>>'",
            Self::AndAnd => "'&&'",
            Self::OrOr => "'||'",
            Self::Bang => "'!'",
            Self::EqualEqual => "'=='",
            Self::NotEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::Assign => "'='",
            Self::PlusAssign => "'+='",
            Self::MinusAssign => "'-='",
            Self::StarAssign => "'*='",
            Self::SlashAssign => "'/='",
            Self::PercentAssign => "'%='",
            Self::AmpersandAssign => "'&='",
            Self::PipeAssign => "'|='",
            Self::CaretAssign => "'^='",
            Self::ShiftLeftAssign => "'<<='",
            Self::ShiftRightAssign => "'>>='",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Eof => "end of input",
        };
        f.write_str(text)
    }
}

fn parse_float(lex: &mut Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

fn parse_integer(lex: &mut Lexer<Token>) -> Result<i64, LexFailure> {
    lex.slice().parse().map_err(|_| LexFailure::IntegerOutOfRange)
}

fn parse_string(lex: &mut Lexer<Token>) -> String {
    let slice = lex.slice();
    let start = lex.span().start;
    track_newlines(&mut lex.extras, slice, start);
    slice[1..slice.len() - 1].to_string()
}

fn newline(lex: &mut Lexer<Token>) -> Skip {
    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;
    Skip
}

fn skip_line_comment(lex: &mut Lexer<Token>) -> Skip {
    let rest = lex.remainder();
    lex.bump(rest.find('\n').unwrap_or(rest.len()));
    Skip
}

// An unterminated block comment runs to the end of the input.
fn skip_block_comment(lex: &mut Lexer<Token>) -> Skip {
    let rest = lex.remainder();
    let length = rest.find("*/").map_or(rest.len(), |end| end + 2);
    let body_start = lex.span().end;
    track_newlines(&mut lex.extras, &rest[..length], body_start);
    lex.bump(length);
    Skip
}

fn track_newlines(extras: &mut LexerExtras, text: &str, offset: usize) {
    for (index, _) in text.match_indices('\n') {
        extras.line += 1;
        extras.line_start = offset + index + 1;
    }
}

/// A classified, positioned token.
///
/// `literal` holds the exact source spelling (including the quotes of a
/// string literal). `line` and `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lexeme {
    /// The token category and any decoded literal value.
    pub token:   Token,
    /// The source text the lexeme was produced from.
    pub literal: String,
    /// Line of the first character.
    pub line:    usize,
    /// Column of the first character.
    pub column:  usize,
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token == Token::Eof {
            write!(f, "end of input at {}:{}", self.line, self.column)
        } else {
            write!(f, "'{}' at {}:{}", self.literal, self.line, self.column)
        }
    }
}

/// Pull-based lexeme source with unbounded lookahead.
///
/// Lexemes are produced on demand by the generated [`Token`] lexer and kept in
/// a buffer until the parser consumes them, so [`LexemeStream::peek`] may look
/// arbitrarily far ahead. Once the source is exhausted the stream keeps
/// returning the same [`Token::Eof`] lexeme.
///
/// # Example
/// ```
/// use clite::interpreter::lexer::{LexemeStream, Token};
///
/// let mut stream = LexemeStream::new("int x;");
/// assert_eq!(stream.peek(1).unwrap().token, Token::Identifier("x".into()));
/// assert_eq!(stream.advance().unwrap().token, Token::Int);
/// ```
pub struct LexemeStream<'src> {
    lexer:  Lexer<'src, Token>,
    buffer: VecDeque<Lexeme>,
}

impl<'src> LexemeStream<'src> {
    /// Creates a stream over `source`, positioned at line 1, column 1.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { lexer:  Token::lexer_with_extras(source, LexerExtras { line:       1,
                                                                      line_start: 0, }),
               buffer: VecDeque::new(), }
    }

    /// Returns the lexeme `n` positions ahead of the current one without
    /// consuming anything. `peek(0)` is the current lexeme.
    ///
    /// # Errors
    /// Returns a [`LexError`] if an unrecognized character is met while
    /// filling the lookahead buffer.
    pub fn peek(&mut self, n: usize) -> Result<&Lexeme, LexError> {
        self.fill(n)?;
        let index = n.min(self.buffer.len() - 1);
        Ok(&self.buffer[index])
    }

    /// Consumes and returns the current lexeme.
    ///
    /// # Errors
    /// Returns a [`LexError`] if the current lexeme cannot be produced.
    pub fn advance(&mut self) -> Result<Lexeme, LexError> {
        self.fill(0)?;
        match self.buffer.front() {
            Some(lexeme) if lexeme.token == Token::Eof => Ok(lexeme.clone()),
            _ => Ok(self.buffer.pop_front().unwrap_or_default()),
        }
    }

    /// Lexes until the buffer holds `n + 1` lexemes or ends with end of input.
    fn fill(&mut self, n: usize) -> Result<(), LexError> {
        while self.buffer.len() <= n {
            if self.buffer.back().is_some_and(|lexeme| lexeme.token == Token::Eof) {
                break;
            }
            let lexeme = match self.lexer.next() {
                Some(Ok(token)) => {
                    let (line, column) = self.position();
                    Lexeme { token,
                             literal: self.lexer.slice().to_string(),
                             line,
                             column }
                },
                Some(Err(failure)) => {
                    let (line, column) = self.position();
                    let text = self.lexer.slice().to_string();
                    return Err(match failure {
                                   LexFailure::UnrecognizedCharacter => {
                                       LexError::UnrecognizedCharacter { character: text,
                                                                         line,
                                                                         column }
                                   },
                                   LexFailure::IntegerOutOfRange => {
                                       LexError::IntegerOutOfRange { literal: text,
                                                                     line,
                                                                     column }
                                   },
                               });
                },
                None => {
                    let extras = self.lexer.extras;
                    let source = self.lexer.source();
                    let column = source[extras.line_start..].chars().count() + 1;
                    Lexeme { token: Token::Eof,
                             literal: String::new(),
                             line: extras.line,
                             column }
                },
            };
            self.buffer.push_back(lexeme);
        }
        Ok(())
    }

    /// Line and column of the lexeme the generated lexer just produced.
    fn position(&self) -> (usize, usize) {
        let span = self.lexer.span();
        let source = self.lexer.source();
        let extras = self.lexer.extras;
        // A string literal spanning lines has already moved `line_start` past
        // its own start, so measure from the line the literal began on.
        if extras.line_start > span.start {
            let before = &source[..span.start];
            let line = before.matches('\n').count() + 1;
            let line_start = before.rfind('\n').map_or(0, |index| index + 1);
            return (line, source[line_start..span.start].chars().count() + 1);
        }
        (extras.line, source[extras.line_start..span.start].chars().count() + 1)
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut stream = LexemeStream::new(source);
        let mut out = Vec::new();
        loop {
            let lexeme = stream.advance().unwrap();
            if lexeme.token == Token::Eof {
                return out;
            }
            out.push(lexeme.token);
        }
    }

    #[test]
    fn numbers_split_into_int_and_float() {
        assert_eq!(tokens("42 3.5 7."),
                   vec![Token::IntLiteral(42), Token::FloatLiteral(3.5), Token::FloatLiteral(7.0)]);
    }

    #[test]
    fn keywords_win_over_identifiers_only_on_exact_match() {
        assert_eq!(tokens("int integer _if if"),
                   vec![Token::Int,
                        Token::Identifier("integer".into()),
                        Token::Identifier("_if".into()),
                        Token::If]);
    }

    #[test]
    fn longest_symbol_is_preferred() {
        assert_eq!(tokens("< <= << <<= >>= &&&"),
                   vec![Token::Less,
                        Token::LessEqual,
                        Token::ShiftLeft,
                        Token::ShiftLeftAssign,
                        Token::ShiftRightAssign,
                        Token::AndAnd,
                        Token::Ampersand]);
    }

    #[test]
    fn string_literal_keeps_raw_escapes() {
        assert_eq!(tokens(r#""a\nb""#), vec![Token::StringLiteral(r"a\nb".into())]);
    }

    #[test]
    fn comments_are_discarded_and_lines_tracked() {
        let source = indoc! {"
            // leading comment
            int /* inline
            spanning */ x;
        "};
        let mut stream = LexemeStream::new(source);
        let int = stream.advance().unwrap();
        assert_eq!((int.token, int.line, int.column), (Token::Int, 2, 1));
        let x = stream.advance().unwrap();
        assert_eq!((x.literal.as_str(), x.line, x.column), ("x", 3, 13));
    }

    #[test]
    fn peek_reaches_past_the_buffer_and_eof_repeats() {
        let mut stream = LexemeStream::new("(int) y");
        assert_eq!(stream.peek(3).unwrap().token, Token::Identifier("y".into()));
        assert_eq!(stream.peek(10).unwrap().token, Token::Eof);
        for _ in 0..4 {
            stream.advance().unwrap();
        }
        assert_eq!(stream.advance().unwrap().token, Token::Eof);
        assert_eq!(stream.advance().unwrap().token, Token::Eof);
    }

    #[test]
    fn oversized_integer_literal_is_its_own_error() {
        let mut stream = LexemeStream::new("x = 9223372036854775808;");
        stream.advance().unwrap();
        stream.advance().unwrap();
        assert_eq!(stream.advance().unwrap_err(),
                   LexError::IntegerOutOfRange { literal: "9223372036854775808".into(),
                                                 line:    1,
                                                 column:  5, });

        let mut stream = LexemeStream::new("9223372036854775807");
        assert_eq!(stream.advance().unwrap().token, Token::IntLiteral(i64::MAX));
    }

    #[test]
    fn unknown_character_reports_position() {
        let mut stream = LexemeStream::new("int a;\n  @");
        for _ in 0..3 {
            stream.advance().unwrap();
        }
        let err = stream.advance().unwrap_err();
        assert_eq!(err,
                   LexError::UnrecognizedCharacter { character: "@".into(),
                                                     line:      2,
                                                     column:    3, });
    }
}
