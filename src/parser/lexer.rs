//! This module contains the lexer that turns a textual signature into a
//! stream of positioned lexemes for the parser to consume.

use crate::error::{
    container::Locatable,
    parsing::{Error, Result},
};

/// The kinds of lexeme that can occur in a textual signature.
///
/// Note that sized base types such as `uint256` or `fixed128x18` lex as a
/// single [`Self::Identifier`]; digits only stand alone inside array
/// suffixes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexemeKind {
    /// A name or base-type keyword: `[A-Za-z_][A-Za-z0-9_]*`.
    Identifier,

    /// A run of decimal digits.
    Digits,

    /// The `(` character.
    OpenParen,

    /// The `)` character.
    CloseParen,

    /// The `[` character.
    OpenBracket,

    /// The `]` character.
    CloseBracket,

    /// The `,` character.
    Comma,
}

/// A single lexeme together with its byte offset in the input text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lexeme {
    /// The kind of the lexeme.
    pub kind: LexemeKind,

    /// The text that the lexeme covers.
    pub text: String,

    /// The byte offset at which the lexeme starts.
    pub position: u32,
}

impl Lexeme {
    fn new(kind: LexemeKind, text: impl Into<String>, position: u32) -> Self {
        let text = text.into();
        Self {
            kind,
            text,
            position,
        }
    }
}

/// Lexes the signature text in `input` into a sequence of lexemes.
///
/// Whitespace between lexemes is skipped, as descriptive sources frequently
/// write `f(address, uint256)`; the canonical form never contains any.
///
/// # Errors
///
/// When a character that cannot begin any lexeme is encountered, an error
/// carrying the byte offset of that character is returned.
pub fn lex(input: &str) -> Result<Vec<Lexeme>> {
    let mut lexemes = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        let position = u32::try_from(offset).unwrap_or(u32::MAX);
        match c {
            '(' => lexemes.push(Lexeme::new(LexemeKind::OpenParen, "(", position)),
            ')' => lexemes.push(Lexeme::new(LexemeKind::CloseParen, ")", position)),
            '[' => lexemes.push(Lexeme::new(LexemeKind::OpenBracket, "[", position)),
            ']' => lexemes.push(Lexeme::new(LexemeKind::CloseBracket, "]", position)),
            ',' => lexemes.push(Lexeme::new(LexemeKind::Comma, ",", position)),
            c if c.is_ascii_digit() => {
                let mut text = String::from(c);
                while let Some((_, next)) = chars.peek() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    text.push(*next);
                    chars.next();
                }
                lexemes.push(Lexeme::new(LexemeKind::Digits, text, position));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut text = String::from(c);
                while let Some((_, next)) = chars.peek() {
                    if !next.is_ascii_alphanumeric() && *next != '_' {
                        break;
                    }
                    text.push(*next);
                    chars.next();
                }
                lexemes.push(Lexeme::new(LexemeKind::Identifier, text, position));
            }
            c if c.is_whitespace() => continue,
            c => return Err(Error::UnexpectedCharacter(c).locate(position)),
        }
    }

    Ok(lexemes)
}

#[cfg(test)]
mod test {
    use crate::{
        error::parsing::Error,
        parser::lexer::{lex, LexemeKind},
    };

    #[test]
    fn lexes_a_simple_signature() {
        let lexemes = lex("transfer(address,uint256)").unwrap();
        let kinds: Vec<LexemeKind> = lexemes.iter().map(|l| l.kind).collect();

        assert_eq!(
            kinds,
            vec![
                LexemeKind::Identifier,
                LexemeKind::OpenParen,
                LexemeKind::Identifier,
                LexemeKind::Comma,
                LexemeKind::Identifier,
                LexemeKind::CloseParen,
            ]
        );
        assert_eq!(lexemes[0].text, "transfer");
        assert_eq!(lexemes[2].text, "address");
        assert_eq!(lexemes[4].text, "uint256");
    }

    #[test]
    fn keeps_digits_inside_identifiers() {
        let lexemes = lex("bytes32").unwrap();
        assert_eq!(lexemes.len(), 1);
        assert_eq!(lexemes[0].kind, LexemeKind::Identifier);
        assert_eq!(lexemes[0].text, "bytes32");
    }

    #[test]
    fn splits_digits_in_array_suffixes() {
        let lexemes = lex("uint8[42]").unwrap();
        let kinds: Vec<LexemeKind> = lexemes.iter().map(|l| l.kind).collect();

        assert_eq!(
            kinds,
            vec![
                LexemeKind::Identifier,
                LexemeKind::OpenBracket,
                LexemeKind::Digits,
                LexemeKind::CloseBracket,
            ]
        );
        assert_eq!(lexemes[2].text, "42");
        assert_eq!(lexemes[2].position, 6);
    }

    #[test]
    fn skips_whitespace() {
        let lexemes = lex("f(address, uint256)").unwrap();
        assert_eq!(lexemes.len(), 6);
    }

    #[test]
    fn rejects_unexpected_characters() {
        let error = lex("f(uint256;bool)").unwrap_err();
        assert_eq!(error.location, 9);
        assert_eq!(error.payload, Error::UnexpectedCharacter(';'));
    }
}
