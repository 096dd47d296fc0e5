use std::fmt;

use crate::text::TextSpan;

/// Token kinds shared by the lexer and the parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No kind; used where an operator lookup finds nothing.
    #[default]
    NullToken,
    /// End-of-input sentinel.
    EndToken,

    // Token-level trivia. The lexer folds these into `SyntaxTrivia`, so the
    // parser only ever skips them.
    Whitespace,
    Tabspace,
    Newline,

    Identifier,
    Integer,
    Float,
    Char,
    String,

    /// Character the lexer could not classify.
    BadToken,
    /// Expected token the parser did not find.
    MissingToken,

    ExclamationMark,
    DoubleQuote,
    Octothorpe,
    Percentage,
    Ampersand,
    SingleQuote,
    LeftParen,
    RightParen,
    Asterisk,
    Plus,
    Comma,
    Minus,
    Dot,
    ForwardSlash,
    Colon,
    Semicolon,
    LessThanSign,
    Equals,
    GreaterThanSign,
    QuestionMark,
    AtSymbol,
    LeftSquareBracket,
    BackwardSlash,
    RightSquareBracket,
    Caret,
    Backtick,
    LeftCurlyBrace,
    VerticalBar,
    RightCurlyBrace,
    Tilde,

    // Compound operators, produced only by the parser.
    EqualsEquals,
    ExclamationEquals,
    LessThanEquals,
    GreaterThanEquals,
    LessThanLessThan,
    GreaterThanGreaterThan,
    LessThanLessThanLessThan,
    AmpersandAmpersand,
    VerticalBarVerticalBar,
}

impl TokenKind {
    /// Kind of a single punctuation character, if it has one.
    #[must_use]
    pub const fn punctuation(ch: char) -> Option<Self> {
        let kind = match ch {
            '!' => Self::ExclamationMark,
            '"' => Self::DoubleQuote,
            '#' => Self::Octothorpe,
            '%' => Self::Percentage,
            '&' => Self::Ampersand,
            '\'' => Self::SingleQuote,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '*' => Self::Asterisk,
            '+' => Self::Plus,
            ',' => Self::Comma,
            '-' => Self::Minus,
            '.' => Self::Dot,
            '/' => Self::ForwardSlash,
            ':' => Self::Colon,
            ';' => Self::Semicolon,
            '<' => Self::LessThanSign,
            '=' => Self::Equals,
            '>' => Self::GreaterThanSign,
            '?' => Self::QuestionMark,
            '@' => Self::AtSymbol,
            '[' => Self::LeftSquareBracket,
            '\\' => Self::BackwardSlash,
            ']' => Self::RightSquareBracket,
            '^' => Self::Caret,
            '`' => Self::Backtick,
            '{' => Self::LeftCurlyBrace,
            '|' => Self::VerticalBar,
            '}' => Self::RightCurlyBrace,
            '~' => Self::Tilde,
            _ => return None,
        };
        Some(kind)
    }

    /// Fixed spelling of punctuation and operator kinds.
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        let text = match self {
            Self::ExclamationMark => "!",
            Self::DoubleQuote => "\"",
            Self::Octothorpe => "#",
            Self::Percentage => "%",
            Self::Ampersand => "&",
            Self::SingleQuote => "'",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Asterisk => "*",
            Self::Plus => "+",
            Self::Comma => ",",
            Self::Minus => "-",
            Self::Dot => ".",
            Self::ForwardSlash => "/",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::LessThanSign => "<",
            Self::Equals => "=",
            Self::GreaterThanSign => ">",
            Self::QuestionMark => "?",
            Self::AtSymbol => "@",
            Self::LeftSquareBracket => "[",
            Self::BackwardSlash => "\\",
            Self::RightSquareBracket => "]",
            Self::Caret => "^",
            Self::Backtick => "`",
            Self::LeftCurlyBrace => "{",
            Self::VerticalBar => "|",
            Self::RightCurlyBrace => "}",
            Self::Tilde => "~",
            Self::EqualsEquals => "==",
            Self::ExclamationEquals => "!=",
            Self::LessThanEquals => "<=",
            Self::GreaterThanEquals => ">=",
            Self::LessThanLessThan => "<<",
            Self::GreaterThanGreaterThan => ">>",
            Self::LessThanLessThanLessThan => "<<<",
            Self::AmpersandAmpersand => "&&",
            Self::VerticalBarVerticalBar => "||",
            _ => return None,
        };
        Some(text)
    }

    /// Token-level trivia kinds, skipped by the parser's lookahead.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Tabspace | Self::Newline)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "'{text}'"),
            None => write!(f, "{self:?}"),
        }
    }
}

/// Trivia kinds attached to tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxTriviaKind {
    /// A run of spaces and tabs.
    Whitespace,
    /// One line break: `\n`, `\r`, or `\r\n`.
    EndOfLine,
    /// `// ...` up to the line break.
    SingleLineComment,
    /// `/* ... */`.
    MultiLineComment,
}

/// Source text that carries no grammar, kept for exact reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxTrivia<'src> {
    pub text: &'src str,
    pub kind: SyntaxTriviaKind,
    pub span: TextSpan,
}

/// A token with its text, location, kind, and surrounding trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub value: &'src str,
    pub span: TextSpan,
    pub kind: TokenKind,
    pub leading_trivia: Vec<SyntaxTrivia<'src>>,
    pub trailing_trivia: Vec<SyntaxTrivia<'src>>,
}

impl<'src> Token<'src> {
    /// Sentinel token at `position` with no text and no trivia.
    #[must_use]
    pub const fn end(position: usize) -> Self {
        Self {
            value: "",
            span: TextSpan::new(position, 0),
            kind: TokenKind::EndToken,
            leading_trivia: Vec::new(),
            trailing_trivia: Vec::new(),
        }
    }

    /// The same token re-tagged as missing.
    #[must_use]
    pub fn into_missing(self) -> Self {
        Self {
            kind: TokenKind::MissingToken,
            ..self
        }
    }

    /// Span including leading and trailing trivia.
    #[must_use]
    pub fn full_span(&self) -> TextSpan {
        let start = self
            .leading_trivia
            .first()
            .map_or(self.span.start, |trivia| trivia.span.start);
        let end = self
            .trailing_trivia
            .last()
            .map_or(self.span.end(), |trivia| trivia.span.end());
        TextSpan::from_bounds(start, end)
    }

    #[must_use]
    pub fn has_trailing_trivia(&self) -> bool {
        !self.trailing_trivia.is_empty()
    }

    #[must_use]
    pub fn has_leading_trivia(&self) -> bool {
        !self.leading_trivia.is_empty()
    }

    /// Append leading trivia, value, and trailing trivia to `out`.
    pub fn write_full_text(&self, out: &mut String) {
        for trivia in &self.leading_trivia {
            out.push_str(trivia.text);
        }
        out.push_str(self.value);
        for trivia in &self.trailing_trivia {
            out.push_str(trivia.text);
        }
    }
}
