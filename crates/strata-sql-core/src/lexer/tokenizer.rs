//! Character scanner producing [`Token`]s.

use super::{Keyword, Position, Span, Token, TokenKind};

/// Single-pass scanner over SQL text.
///
/// Malformed input never aborts the scan: it becomes a
/// [`TokenKind::Error`] token which the parser reports at that position.
pub struct Lexer<'a> {
    src: &'a str,
    cursor: usize,
    token_start: usize,
    line: usize,
    /// One-based character column of `cursor` within `line`.
    column: usize,
    token_position: Position,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self {
            src,
            cursor: 0,
            token_start: 0,
            line: 1,
            column: 1,
            token_position: Position::new(1, 1),
        }
    }

    /// Scans the whole input. The last token is always EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.token_start = self.cursor;
        self.token_position = self.position();

        let Some(c) = self.current() else {
            return Token::eof(self.cursor, self.token_position);
        };

        if let Some(kind) = punctuation(c) {
            self.bump();
            return self.emit(kind);
        }

        match c {
            '\'' => self.scan_string(),
            '"' | '`' => self.scan_quoted_identifier(c),
            'X' | 'x' if self.lookahead() == Some('\'') => self.scan_binary(),
            '0'..='9' => self.scan_number(),
            '.' if self.lookahead().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(),
            c if c.is_ascii_alphabetic() || c == '_' => self.scan_word(),
            _ => self.scan_operator(c),
        }
    }

    fn current(&self) -> Option<char> {
        self.src[self.cursor..].chars().next()
    }

    fn lookahead(&self) -> Option<char> {
        self.src[self.cursor..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.cursor += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current().is_some_and(&pred) {
            self.bump();
        }
    }

    const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn lexeme(&self) -> &'a str {
        let src = self.src;
        &src[self.token_start..self.cursor]
    }

    fn emit(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            self.lexeme(),
            Span::new(self.token_start, self.cursor),
            self.token_position,
        )
    }

    fn fail(&self, message: impl Into<String>) -> Token {
        self.emit(TokenKind::Error(message.into()))
    }

    fn skip_trivia(&mut self) {
        loop {
            self.bump_while(char::is_whitespace);
            match (self.current(), self.lookahead()) {
                (Some('-'), Some('-')) => self.bump_while(|c| c != '\n'),
                (Some('/'), Some('*')) => {
                    self.bump();
                    self.bump();
                    // An unclosed block comment runs to the end of input
                    while let Some(c) = self.bump() {
                        if c == '*' && self.current() == Some('/') {
                            self.bump();
                            break;
                        }
                    }
                }
                _ => return,
            }
        }
    }

    /// Operators of one or two characters.
    fn scan_operator(&mut self, first: char) -> Token {
        self.bump();
        let second = self.current();
        let (kind, width) = match (first, second) {
            ('-', Some('>')) => (TokenKind::Arrow, 2),
            ('-', _) => (TokenKind::Minus, 1),
            ('=', Some('>')) => (TokenKind::FatArrow, 2),
            ('=', _) => (TokenKind::Eq, 1),
            ('<', Some('=')) => (TokenKind::LtEq, 2),
            ('<', Some('>')) | ('!', Some('=')) => (TokenKind::NotEq, 2),
            ('<', _) => (TokenKind::Lt, 1),
            ('>', Some('=')) => (TokenKind::GtEq, 2),
            ('>', _) => (TokenKind::Gt, 1),
            ('|', Some('|')) => (TokenKind::Concat, 2),
            ('.', _) => (TokenKind::Dot, 1),
            _ => return self.fail(format!("Unexpected character: {first}")),
        };
        if width == 2 {
            self.bump();
        }
        self.emit(kind)
    }

    /// Keyword or plain identifier. Keywords keep the text as written.
    fn scan_word(&mut self) -> Token {
        self.bump_while(is_word_char);
        let text = self.lexeme();
        let kind = Keyword::from_str(text)
            .map_or_else(|| TokenKind::Identifier(text.to_owned()), TokenKind::Keyword);
        self.emit(kind)
    }

    /// Body of a `quote`-delimited run where a doubled quote stands for one.
    /// The cursor must sit on the opening quote.
    fn scan_delimited(&mut self, quote: char) -> Option<String> {
        self.bump();
        let mut body = String::new();
        loop {
            let c = self.bump()?;
            if c != quote {
                body.push(c);
            } else if self.current() == Some(quote) {
                self.bump();
                body.push(quote);
            } else {
                return Some(body);
            }
        }
    }

    fn scan_string(&mut self) -> Token {
        match self.scan_delimited('\'') {
            Some(value) => self.emit(TokenKind::String(value)),
            None => self.fail("Unterminated string literal"),
        }
    }

    fn scan_quoted_identifier(&mut self, quote: char) -> Token {
        match self.scan_delimited(quote) {
            None => self.fail("Unterminated quoted identifier"),
            Some(name) if name.is_empty() => self.fail("Zero-length delimited identifier"),
            Some(name) if quote == '"' => self.emit(TokenKind::QuotedIdentifier(name)),
            Some(name) => self.emit(TokenKind::BackquotedIdentifier(name)),
        }
    }

    /// `X'..'`: pairs of hex digits, whitespace between digits ignored.
    fn scan_binary(&mut self) -> Token {
        self.bump();
        let Some(body) = self.scan_delimited('\'') else {
            return self.fail("Unterminated binary literal");
        };
        let digits: Vec<u8> = body
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d).ok()))
            .collect::<Option<_>>()
            .unwrap_or_default();
        let expected = body.chars().filter(|c| !c.is_whitespace()).count();
        if digits.len() != expected {
            return self.fail("Binary literal can only contain hexadecimal digits");
        }
        let pairs = digits.chunks_exact(2);
        if !pairs.remainder().is_empty() {
            return self.fail("Binary literal must contain an even number of digits");
        }
        let bytes = pairs.map(|pair| (pair[0] << 4) | pair[1]).collect();
        self.emit(TokenKind::Binary(bytes))
    }

    /// Integer, decimal (`1.5`, `.5`, `1.`) or double (`1e3`).
    ///
    /// Digits followed by identifier characters (`1st`, `1e`) form a
    /// digit-led identifier instead.
    fn scan_number(&mut self) -> Token {
        let word_end = self.token_start
            + self.src[self.token_start..]
                .chars()
                .take_while(|&c| is_word_char(c))
                .map(char::len_utf8)
                .sum::<usize>();

        self.bump_while(|c| c.is_ascii_digit());
        let mut fractional = false;
        if self.current() == Some('.') {
            fractional = true;
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        let exponent = self.exponent_len();
        if exponent > 0 {
            for _ in 0..exponent {
                self.bump();
            }
            self.bump_while(|c| c.is_ascii_digit());
        }

        if !fractional && word_end > self.cursor {
            self.bump_while(is_word_char);
            return self.emit(TokenKind::DigitIdentifier(self.lexeme().to_owned()));
        }

        let text = self.lexeme();
        if exponent > 0 {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => self.emit(TokenKind::Double(value)),
                Ok(_) => self.fail("Double literal out of range"),
                Err(e) => self.fail(format!("Invalid double: {e}")),
            }
        } else if fractional {
            self.emit(TokenKind::Decimal(text.to_owned()))
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.emit(TokenKind::Integer(value)),
                Err(e) => self.fail(format!("Invalid integer: {e}")),
            }
        }
    }

    /// Width of an exponent marker (`e`, `E+`, `e-`) at the cursor when a
    /// digit follows it, zero otherwise.
    fn exponent_len(&self) -> usize {
        let mut rest = self.src[self.cursor..].chars();
        if !matches!(rest.next(), Some('e' | 'E')) {
            return 0;
        }
        match rest.next() {
            Some('+' | '-') if rest.next().is_some_and(|c| c.is_ascii_digit()) => 2,
            Some(c) if c.is_ascii_digit() => 1,
            _ => 0,
        }
    }
}

const fn punctuation(c: char) -> Option<TokenKind> {
    Some(match c {
        '(' => TokenKind::LeftParen,
        ')' => TokenKind::RightParen,
        '[' => TokenKind::LeftBracket,
        ']' => TokenKind::RightBracket,
        ',' => TokenKind::Comma,
        ';' => TokenKind::Semicolon,
        '+' => TokenKind::Plus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '?' => TokenKind::Question,
        _ => return None,
    })
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        Lexer::new(sql).tokenize().into_iter().map(|t| t.kind).collect()
    }

    fn first(sql: &str) -> TokenKind {
        kinds(sql).remove(0)
    }

    fn ident(s: &str) -> TokenKind {
        TokenKind::Identifier(String::from(s))
    }

    fn is_error(kind: &TokenKind, fragment: &str) -> bool {
        matches!(kind, TokenKind::Error(m) if m.contains(fragment))
    }

    #[test]
    fn test_blank_input_is_only_eof() {
        for sql in ["", "  \n\t ", "-- only a comment", "/* unclosed"] {
            assert_eq!(kinds(sql), vec![TokenKind::Eof], "{sql:?}");
        }
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("SELECT -- line\n/* block\n */ a"),
            vec![TokenKind::Keyword(Keyword::Select), ident("a"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords_ignore_case_and_keep_text() {
        let tokens = Lexer::new("select FROM wHeRe").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Select));
        assert_eq!(tokens[0].text, "select");
        assert_eq!(tokens[2].kind, TokenKind::Keyword(Keyword::Where));
        assert_eq!(tokens[2].text, "wHeRe");
    }

    #[test]
    fn test_plain_identifiers() {
        assert_eq!(
            kinds("foo _bar a@b c:d"),
            vec![ident("foo"), ident("_bar"), ident("a@b"), ident("c:d"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_delimited_identifiers() {
        assert_eq!(
            kinds("\"Order Id\" `tbl` \"a\"\"b\" `x``y`"),
            vec![
                TokenKind::QuotedIdentifier(String::from("Order Id")),
                TokenKind::BackquotedIdentifier(String::from("tbl")),
                TokenKind::QuotedIdentifier(String::from("a\"b")),
                TokenKind::BackquotedIdentifier(String::from("x`y")),
                TokenKind::Eof,
            ]
        );
        assert!(is_error(&first("\"\""), "Zero-length"));
        assert!(is_error(&first("\"abc"), "Unterminated"));
    }

    #[test]
    fn test_digit_identifiers() {
        assert_eq!(
            kinds("1st 123abc 1e"),
            vec![
                TokenKind::DigitIdentifier(String::from("1st")),
                TokenKind::DigitIdentifier(String::from("123abc")),
                TokenKind::DigitIdentifier(String::from("1e")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("7 3.25 .5 1. 1e10 2.5E-3 .5e2"),
            vec![
                TokenKind::Integer(7),
                TokenKind::Decimal(String::from("3.25")),
                TokenKind::Decimal(String::from(".5")),
                TokenKind::Decimal(String::from("1.")),
                TokenKind::Double(1e10),
                TokenKind::Double(2.5e-3),
                TokenKind::Double(50.0),
                TokenKind::Eof,
            ]
        );
        assert!(is_error(&first("99999999999999999999"), "Invalid integer"));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds("'abc' 'it''s' ''"),
            vec![
                TokenKind::String(String::from("abc")),
                TokenKind::String(String::from("it's")),
                TokenKind::String(String::new()),
                TokenKind::Eof,
            ]
        );
        assert!(is_error(&first("'abc"), "Unterminated"));
    }

    #[test]
    fn test_binary_literals() {
        assert_eq!(
            kinds("X'CAFE' x'0a 0B'"),
            vec![
                TokenKind::Binary(vec![0xCA, 0xFE]),
                TokenKind::Binary(vec![0x0A, 0x0B]),
                TokenKind::Eof,
            ]
        );
        assert!(is_error(&first("X'ABC'"), "even number"));
        assert!(is_error(&first("X'zz'"), "hexadecimal"));
        assert_eq!(kinds("x"), vec![ident("x"), TokenKind::Eof]);
    }

    #[test]
    fn test_operators_and_punctuation() {
        assert_eq!(
            kinds("+ - * / % = != <> < <= > >= || -> => ( ) [ ] , ; . ?"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::Arrow,
                TokenKind::FatArrow,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Question,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_stray_characters() {
        assert!(is_error(&first("#"), "#"));
        assert!(is_error(&kinds("a | b")[1], "|"));
        assert!(is_error(&first("!"), "!"));
    }

    #[test]
    fn test_spans_and_positions() {
        let tokens = Lexer::new("SELECT\n  a,\n\tb").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(9, 10));
        let positions: Vec<_> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(
            positions,
            vec![
                Position::new(1, 1),
                Position::new(2, 3),
                Position::new(2, 4),
                Position::new(3, 2),
                Position::new(3, 3),
            ]
        );
    }

    #[test]
    fn test_columns_count_characters_after_digit_identifiers() {
        let tokens = Lexer::new("é 1x ü").tokenize();
        let positions: Vec<_> = tokens.iter().map(|t| t.position.column).collect();
        assert_eq!(positions, vec![1, 3, 6, 7]);
    }

    #[test]
    fn test_long_single_line_lexes_in_linear_time() {
        let terms = 100_000;
        let sql = format!("SELECT {}a", "a + ".repeat(terms));
        let start = std::time::Instant::now();
        let tokens = Lexer::new(&sql).tokenize();
        assert!(
            start.elapsed() < std::time::Duration::from_secs(2),
            "{:?}",
            start.elapsed()
        );

        let last = &tokens[tokens.len() - 2];
        assert_eq!(last.text, "a");
        assert_eq!(last.position, Position::new(1, sql.len()));
        assert_eq!(tokens.last().map(|t| t.position), Some(Position::new(1, sql.len() + 1)));
    }

    #[test]
    fn test_dot_between_names_is_not_a_decimal() {
        assert_eq!(
            kinds("a.b"),
            vec![ident("a"), TokenKind::Dot, ident("b"), TokenKind::Eof]
        );
    }
}
