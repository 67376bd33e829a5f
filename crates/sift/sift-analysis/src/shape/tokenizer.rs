//! SQL tokenizer for shape extraction.
//!
//! Lenient by construction: unknown characters become `Token::Other` and
//! unterminated literals run to end of input, so tokenizing never fails.

/// One lexical unit of a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unquoted identifier or keyword, original spelling.
    Word(String),
    /// `"x"`, `` `x` `` or `[x]` identifier, unescaped.
    Quoted(String),
    /// `'...'` string literal.
    Str(String),
    Number(String),
    /// `?`, `?1`, `:name`, `@name`, `$name`.
    Param(String),
    /// Comparison or arithmetic operator.
    Op(&'static str),
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
    Other(char),
}

impl Token {
    /// Case-insensitive keyword match on an unquoted word.
    pub fn is_kw(&self, kw: &str) -> bool {
        matches!(self, Token::Word(w) if w.eq_ignore_ascii_case(kw))
    }

    /// Identifier text for words and quoted identifiers.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Word(w) | Token::Quoted(w) => Some(w),
            _ => None,
        }
    }
}

pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the whole input. Comments and whitespace are dropped.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace_and_comments();
            match self.current() {
                None => break,
                Some(ch) => tokens.push(self.next_token(ch)),
            }
        }
        tokens
    }

    fn next_token(&mut self, ch: char) -> Token {
        match ch {
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            ',' => self.single(Token::Comma),
            ';' => self.single(Token::Semicolon),
            '.' if self.peek(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
            '.' => self.single(Token::Dot),
            '\'' => Token::Str(self.delimited('\'')),
            '"' => Token::Quoted(self.delimited('"')),
            '`' => Token::Quoted(self.delimited('`')),
            '[' => Token::Quoted(self.bracketed()),
            '0'..='9' => self.number(),
            '?' | ':' | '@' | '$' => self.param(ch),
            c if c.is_alphabetic() || c == '_' => self.word(),
            _ => self.operator(ch),
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn word(&mut self) -> Token {
        let start = self.position;
        while self
            .current()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }
        Token::Word(self.input[start..self.position].iter().collect())
    }

    fn number(&mut self) -> Token {
        let start = self.position;
        while let Some(c) = self.current() {
            let exponent_sign = (c == '+' || c == '-')
                && matches!(self.position.checked_sub(1).map(|p| self.input[p]), Some('e' | 'E'));
            if c.is_ascii_alphanumeric() || c == '.' || exponent_sign {
                self.advance();
            } else {
                break;
            }
        }
        Token::Number(self.input[start..self.position].iter().collect())
    }

    fn param(&mut self, sigil: char) -> Token {
        let start = self.position;
        self.advance();
        while self
            .current()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.advance();
        }
        if sigil == ':' && self.position == start + 1 {
            return Token::Other(':');
        }
        Token::Param(self.input[start..self.position].iter().collect())
    }

    /// Quoted run where a doubled delimiter escapes itself.
    fn delimited(&mut self, quote: char) -> String {
        self.advance();
        let mut text = String::new();
        while let Some(c) = self.current() {
            self.advance();
            if c == quote {
                if self.current() == Some(quote) {
                    text.push(quote);
                    self.advance();
                } else {
                    return text;
                }
            } else {
                text.push(c);
            }
        }
        text
    }

    fn bracketed(&mut self) -> String {
        self.advance();
        let mut text = String::new();
        while let Some(c) = self.current() {
            self.advance();
            if c == ']' {
                break;
            }
            text.push(c);
        }
        text
    }

    fn operator(&mut self, ch: char) -> Token {
        let next = self.peek(1);
        let (op, width): (&'static str, usize) = match (ch, next) {
            ('<', Some('>')) => ("<>", 2),
            ('<', Some('=')) => ("<=", 2),
            ('>', Some('=')) => (">=", 2),
            ('!', Some('=')) => ("!=", 2),
            ('=', Some('=')) => ("==", 2),
            ('|', Some('|')) => ("||", 2),
            ('<', _) => ("<", 1),
            ('>', _) => (">", 1),
            ('=', _) => ("=", 1),
            ('+', _) => ("+", 1),
            ('-', _) => ("-", 1),
            ('*', _) => ("*", 1),
            ('/', _) => ("/", 1),
            ('%', _) => ("%", 1),
            _ => return self.single(Token::Other(ch)),
        };
        for _ in 0..width {
            self.advance();
        }
        Token::Op(op)
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.current().is_some_and(char::is_whitespace) {
                self.advance();
            }
            match (self.current(), self.peek(1)) {
                (Some('-'), Some('-')) => {
                    while self.current().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.current() {
                        self.advance();
                        if c == '*' && self.current() == Some('/') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }
}

/// Tokenize `sql`.
pub fn tokenize(sql: &str) -> Vec<Token> {
    Tokenizer::new(sql).tokenize()
}
