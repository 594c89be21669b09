//! Token stream for command lines.
//!
//! The lexer is deliberately simple - a command line is one short string, and
//! all command-specific structure lives in the parser's per-command argument
//! extraction. Words stay raw here; enum membership is a semantic check.

use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token type for a command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Left bracket `[` opening a required-parameter group.
    LBracket,
    /// Right bracket `]`.
    RBracket,
    /// Integer literal.
    Integer(i64),
    /// Bare word (command name, location, behavior, ...).
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// Internal logos token - borrows from source, converted to owned `Token`.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"[a-zA-Z][a-zA-Z0-9_-]*")]
    Word,
}

/// A lexer error with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    /// Byte range of the erroneous input.
    pub span: Range<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Lex a command line into `(Token, Span)` pairs.
///
/// Lexing continues past errors to collect as many tokens as possible.
pub fn lex(source: &str) -> (Vec<(Token, Range<usize>)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(raw) => {
                let token = match raw {
                    RawToken::LBracket => Token::LBracket,
                    RawToken::RBracket => Token::RBracket,
                    RawToken::Integer => match lexer.slice().parse::<i64>() {
                        Ok(n) => Token::Integer(n),
                        Err(_) => {
                            errors.push(LexError {
                                span: span.clone(),
                                message: format!("invalid integer: {}", lexer.slice()),
                            });
                            continue;
                        }
                    },
                    RawToken::Word => Token::Word(lexer.slice().to_string()),
                };
                tokens.push((token, span));
            }
            Err(()) => {
                errors.push(LexError {
                    span: span.clone(),
                    message: format!("unexpected character: {:?}", &source[span.clone()]),
                });
            }
        }
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_deploy_command() {
        let (tokens, errors) = lex("DeployAgent[3] north scout");
        assert!(errors.is_empty(), "errors: {errors:?}");

        let rendered: Vec<_> = tokens.iter().map(|(t, _)| t.to_string()).collect();
        assert_eq!(rendered, vec!["DeployAgent", "[", "3", "]", "north", "scout"]);
    }

    #[test]
    fn lex_scan_command() {
        let (tokens, errors) = lex("ScanArea 25 25 10");
        assert!(errors.is_empty());
        assert!(matches!(tokens[1].0, Token::Integer(25)));
        assert!(matches!(tokens[3].0, Token::Integer(10)));
    }

    #[test]
    fn lex_negative_integer() {
        let (tokens, errors) = lex("ScanArea -5 10");
        assert!(errors.is_empty());
        assert!(matches!(tokens[1].0, Token::Integer(-5)));
    }

    #[test]
    fn lex_reports_unexpected_characters() {
        let (tokens, errors) = lex("Deploy@gent");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains('@'));
        // Both word fragments still lexed.
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn lex_preserves_spans() {
        let (tokens, _) = lex("Status now");
        assert_eq!(tokens[0].1, 0..6);
        assert_eq!(tokens[1].1, 7..10);
    }
}
