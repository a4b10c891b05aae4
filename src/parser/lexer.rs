//! Lexer (tokenizer) for stack-language source
//!
//! Hands out one classified [`Token`] per [`Lexer::scan`] call. Whitespace
//! and comments are tokens here rather than being discarded: comments are
//! statements in this language (they can carry debug directives), and
//! whitespace is skipped one layer up by the token reader. After the input
//! is exhausted every further `scan` returns [`Token::Eof`].

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals and names
    Number(String, SourceLocation),
    Ident(String, SourceLocation),

    // Keywords (matched case-insensitively)
    Variable(SourceLocation),
    Cells(SourceLocation),
    Mod(SourceLocation),
    Drop(SourceLocation),
    Dup(SourceLocation),
    Swap(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    Then(SourceLocation),
    While(SourceLocation),
    Repeat(SourceLocation),
    Quit(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),  // +
    Minus(SourceLocation), // -
    Star(SourceLocation),  // *
    Slash(SourceLocation), // /

    // Comparison
    Eq(SourceLocation), // =
    Lt(SourceLocation), // <
    Gt(SourceLocation), // >
    Le(SourceLocation), // <=
    Ge(SourceLocation), // >=

    // Memory access
    At(SourceLocation),   // @
    Bang(SourceLocation), // !

    // Function delimiters
    Colon(SourceLocation),     // :
    Semicolon(SourceLocation), // ;

    /// `( ... )` with both parentheses included in the text
    Comment(String, SourceLocation),

    /// A run of whitespace, emitted so the reader above can skip it
    Whitespace(String, SourceLocation),

    /// A character no rule matched; rejected by the parser, not here
    Illegal(char, SourceLocation),

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Number(_, loc)
            | Token::Ident(_, loc)
            | Token::Variable(loc)
            | Token::Cells(loc)
            | Token::Mod(loc)
            | Token::Drop(loc)
            | Token::Dup(loc)
            | Token::Swap(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::Then(loc)
            | Token::While(loc)
            | Token::Repeat(loc)
            | Token::Quit(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Eq(loc)
            | Token::Lt(loc)
            | Token::Gt(loc)
            | Token::Le(loc)
            | Token::Ge(loc)
            | Token::At(loc)
            | Token::Bang(loc)
            | Token::Colon(loc)
            | Token::Semicolon(loc)
            | Token::Comment(_, loc)
            | Token::Whitespace(_, loc)
            | Token::Illegal(_, loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Variable(_) => write!(f, "'VARIABLE'"),
            Token::Cells(_) => write!(f, "'CELLS'"),
            Token::Mod(_) => write!(f, "'MOD'"),
            Token::Drop(_) => write!(f, "'DROP'"),
            Token::Dup(_) => write!(f, "'DUP'"),
            Token::Swap(_) => write!(f, "'SWAP'"),
            Token::If(_) => write!(f, "'IF'"),
            Token::Else(_) => write!(f, "'ELSE'"),
            Token::Then(_) => write!(f, "'THEN'"),
            Token::While(_) => write!(f, "'WHILE'"),
            Token::Repeat(_) => write!(f, "'REPEAT'"),
            Token::Quit(_) => write!(f, "'QUIT'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::At(_) => write!(f, "'@'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comment(_, _) => write!(f, "comment"),
            Token::Whitespace(_, _) => write!(f, "whitespace"),
            Token::Illegal(c, _) => write!(f, "illegal character '{}'", c),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer for stack-language source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan the next token.
    pub fn scan(&mut self) -> Token {
        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::Eof(loc),
        };

        match ch {
            ch if ch.is_whitespace() => self.whitespace(ch, loc),

            // Numeric literals; `-` only starts one when a digit follows
            '0'..='9' => self.number(ch, loc),
            '-' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.number(ch, loc)
                } else {
                    Token::Minus(loc)
                }
            }

            // Identifiers and keywords
            ch if ch.is_alphabetic() => self.identifier_or_keyword(ch, loc),

            // Comments
            '(' => self.comment(loc),

            // Operators
            '+' => Token::Plus(loc),
            '*' => Token::Star(loc),
            '/' => Token::Slash(loc),
            '=' => Token::Eq(loc),
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::Le(loc)
                } else {
                    Token::Lt(loc)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::Ge(loc)
                } else {
                    Token::Gt(loc)
                }
            }
            '@' => Token::At(loc),
            '!' => Token::Bang(loc),
            ':' => Token::Colon(loc),
            ';' => Token::Semicolon(loc),

            other => Token::Illegal(other, loc),
        }
    }

    /// Scan a run of whitespace into a single token.
    fn whitespace(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Whitespace(text, loc)
    }

    /// Scan a numeric literal. The text is kept as written; the parser turns
    /// it into a value.
    fn number(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut text = String::new();
        text.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Number(text, loc)
    }

    /// Scan an identifier, classifying keywords case-insensitively. The
    /// lexeme keeps its original spelling.
    fn identifier_or_keyword(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.to_ascii_uppercase().as_str() {
            "VARIABLE" => Token::Variable(loc),
            "CELLS" => Token::Cells(loc),
            "MOD" => Token::Mod(loc),
            "DROP" => Token::Drop(loc),
            "DUP" => Token::Dup(loc),
            "SWAP" => Token::Swap(loc),
            "IF" => Token::If(loc),
            "ELSE" => Token::Else(loc),
            "THEN" => Token::Then(loc),
            "WHILE" => Token::While(loc),
            "REPEAT" => Token::Repeat(loc),
            "QUIT" => Token::Quit(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Scan a `( ... )` comment. The text keeps both parentheses; a comment
    /// left open simply ends with the input.
    fn comment(&mut self, loc: SourceLocation) -> Token {
        let mut text = String::from('(');

        while let Some(ch) = self.advance() {
            text.push(ch);
            if ch == ')' {
                break;
            }
        }

        Token::Comment(text, loc)
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        if self.position < self.input.len() {
            Some(self.input[self.position])
        } else {
            None
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        if self.position >= self.input.len() {
            return None;
        }

        let ch = self.input[self.position];
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.scan();
            let done = matches!(token, Token::Eof(_));
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = scan_all("VARIABLE x 3 CELLS");

        assert!(matches!(tokens[0], Token::Variable(_)));
        assert!(matches!(tokens[1], Token::Whitespace(..)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[3], Token::Whitespace(..)));
        assert!(matches!(tokens[4], Token::Number(ref n, _) if n == "3"));
        assert!(matches!(tokens[5], Token::Whitespace(..)));
        assert!(matches!(tokens[6], Token::Cells(_)));
        assert!(matches!(tokens[7], Token::Eof(_)));
    }

    #[test]
    fn test_operators() {
        let tokens: Vec<Token> = scan_all("+ * / = < <= > >= @ ! : ;")
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(..)))
            .collect();

        assert!(matches!(tokens[0], Token::Plus(_)));
        assert!(matches!(tokens[1], Token::Star(_)));
        assert!(matches!(tokens[2], Token::Slash(_)));
        assert!(matches!(tokens[3], Token::Eq(_)));
        assert!(matches!(tokens[4], Token::Lt(_)));
        assert!(matches!(tokens[5], Token::Le(_)));
        assert!(matches!(tokens[6], Token::Gt(_)));
        assert!(matches!(tokens[7], Token::Ge(_)));
        assert!(matches!(tokens[8], Token::At(_)));
        assert!(matches!(tokens[9], Token::Bang(_)));
        assert!(matches!(tokens[10], Token::Colon(_)));
        assert!(matches!(tokens[11], Token::Semicolon(_)));
    }

    #[test]
    fn test_minus_starts_number_only_before_digit() {
        let tokens: Vec<Token> = scan_all("1 -2 - 3")
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(..)))
            .collect();

        assert!(matches!(tokens[0], Token::Number(ref n, _) if n == "1"));
        assert!(matches!(tokens[1], Token::Number(ref n, _) if n == "-2"));
        assert!(matches!(tokens[2], Token::Minus(_)));
        assert!(matches!(tokens[3], Token::Number(ref n, _) if n == "3"));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let tokens: Vec<Token> = scan_all("variable While dUp quit")
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(..)))
            .collect();

        assert!(matches!(tokens[0], Token::Variable(_)));
        assert!(matches!(tokens[1], Token::While(_)));
        assert!(matches!(tokens[2], Token::Dup(_)));
        assert!(matches!(tokens[3], Token::Quit(_)));
    }

    #[test]
    fn test_ident_keeps_case() {
        let tokens = scan_all("Counter");
        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "Counter"));
    }

    #[test]
    fn test_comment_keeps_delimiters() {
        let tokens = scan_all("(debug stack here)");
        assert!(
            matches!(tokens[0], Token::Comment(ref text, _) if text == "(debug stack here)")
        );
    }

    #[test]
    fn test_unterminated_comment_ends_with_input() {
        let tokens = scan_all("(left open");
        assert!(matches!(tokens[0], Token::Comment(ref text, _) if text == "(left open"));
        assert!(matches!(tokens[1], Token::Eof(_)));
    }

    #[test]
    fn test_whitespace_is_one_token_per_run() {
        let tokens = scan_all("1 \t\n 2");
        assert!(matches!(tokens[0], Token::Number(..)));
        assert!(matches!(tokens[1], Token::Whitespace(ref text, _) if text == " \t\n "));
        assert!(matches!(tokens[2], Token::Number(..)));
    }

    #[test]
    fn test_illegal_character() {
        let tokens = scan_all("&");
        assert!(matches!(tokens[0], Token::Illegal('&', _)));
    }

    #[test]
    fn test_locations_track_lines() {
        let tokens: Vec<Token> = scan_all("a\nbc")
            .into_iter()
            .filter(|t| !matches!(t, Token::Whitespace(..)))
            .collect();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(2, 1));
    }

    #[test]
    fn test_scan_past_end_repeats_eof() {
        let mut lexer = Lexer::new("");
        assert!(matches!(lexer.scan(), Token::Eof(_)));
        assert!(matches!(lexer.scan(), Token::Eof(_)));
    }
}
