//! Token reader with pushback
//!
//! Sits between the lexer and the parser. [`TokenReader::next`] hands out
//! tokens with whitespace already skipped; [`TokenReader::unread`] steps one
//! token back, any number of times in a row. The grammar needs this: a
//! variable declaration looks ahead two tokens for a `NUMBER CELLS` suffix
//! and has to put both back when the suffix is absent.
//!
//! Every delivered token is kept in a growing buffer and replayed from
//! there, so unreading never re-runs the lexer.

use super::lexer::{Lexer, Token};

/// Pushback-capable reader over a [`Lexer`].
pub struct TokenReader {
    lexer: Lexer,
    buffer: Vec<Token>,
    cursor: usize,
}

impl TokenReader {
    pub fn new(lexer: Lexer) -> Self {
        TokenReader {
            lexer,
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    /// Next non-whitespace token, replayed from the buffer when a token was
    /// unread, pulled from the lexer otherwise.
    pub fn next(&mut self) -> Token {
        if let Some(token) = self.buffer.get(self.cursor) {
            self.cursor += 1;
            return token.clone();
        }

        loop {
            let token = self.lexer.scan();
            if matches!(token, Token::Whitespace(..)) {
                continue;
            }
            self.buffer.push(token.clone());
            self.cursor += 1;
            return token;
        }
    }

    /// Step back one token, so the next `next` call returns it again.
    /// Unreading more tokens than have been read is a caller bug.
    pub fn unread(&mut self) {
        debug_assert!(self.cursor > 0, "unread with nothing read");
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(source: &str) -> TokenReader {
        TokenReader::new(Lexer::new(source))
    }

    #[test]
    fn test_whitespace_is_skipped() {
        let mut tokens = reader("  1 \n 2  ");

        assert!(matches!(tokens.next(), Token::Number(ref n, _) if n == "1"));
        assert!(matches!(tokens.next(), Token::Number(ref n, _) if n == "2"));
        assert!(matches!(tokens.next(), Token::Eof(_)));
    }

    #[test]
    fn test_unread_replays_the_same_token() {
        let mut tokens = reader("VARIABLE x");

        assert!(matches!(tokens.next(), Token::Variable(_)));
        let first = tokens.next();
        tokens.unread();
        let second = tokens.next();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unread_twice_restores_order() {
        let mut tokens = reader("1 2 3");

        tokens.next();
        tokens.next();
        tokens.next();
        tokens.unread();
        tokens.unread();

        assert!(matches!(tokens.next(), Token::Number(ref n, _) if n == "2"));
        assert!(matches!(tokens.next(), Token::Number(ref n, _) if n == "3"));
    }

    #[test]
    fn test_unread_at_eof() {
        let mut tokens = reader("");

        assert!(matches!(tokens.next(), Token::Eof(_)));
        tokens.unread();
        assert!(matches!(tokens.next(), Token::Eof(_)));
    }
}
