//! This module contains the parser for the textual signature grammar, turning
//! strings such as `transfer(address,uint256)` or bare type strings such as
//! `(uint8,bool)[4]` into the library's rich type representation.
//!
//! # Implementation Note
//!
//! While it might make sense in the future to build a more robust parser
//! based on parser combinators from a library like
//! [`nom`](https://docs.rs/nom), the grammar is small enough that a
//! hand-rolled recursive descent over the lexeme stream stays simpler.

pub mod lexer;

use crate::{
    constant::{
        BYTE_SIZE_BITS,
        DEFAULT_FIXED_POINT_BITS,
        DEFAULT_FIXED_POINT_EXPONENT,
        DEFAULT_INTEGER_BITS,
        ENUM_INTEGER_BITS,
        MAXIMUM_FIXED_BYTES_LENGTH,
        MAXIMUM_FIXED_POINT_EXPONENT,
        MAXIMUM_INTEGER_BITS,
    },
    error::{
        container::Locatable,
        parsing::{Error, Result},
    },
    parser::lexer::{Lexeme, LexemeKind},
    types::AbiType,
};

/// The outcome of parsing a full textual signature: the declared name, if
/// any, together with the declared input types.
///
/// The declaration is deliberately hash-free; computing a method identifier
/// from it is the concern of [`crate::selector`], so that parsing never needs
/// a keccak provider.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureDeclaration {
    /// The declared name, absent for anonymous signatures such as
    /// `(string)`.
    pub name: Option<String>,

    /// The declared input types, in order.
    pub inputs: Vec<AbiType>,
}

/// Parses `text` as a single type string, such as `uint256` or
/// `(bool,string)[3]`.
///
/// # Errors
///
/// When `text` does not conform to the type grammar, an error carrying the
/// byte offset of the offending lexeme is returned.
pub fn parse_type(text: &str) -> Result<AbiType> {
    let mut parser = Parser::new(lexer::lex(text)?);
    let tp = parser.type_expression()?;
    parser.finish()?;

    Ok(tp)
}

/// Parses `text` as a full signature: an optional name followed by a
/// parenthesised, comma-separated, possibly empty list of input types.
///
/// # Errors
///
/// When `text` does not conform to the signature grammar, an error carrying
/// the byte offset of the offending lexeme is returned.
pub fn parse_declaration(text: &str) -> Result<SignatureDeclaration> {
    let mut parser = Parser::new(lexer::lex(text)?);
    let name = parser.optional_identifier();
    let inputs = parser.parenthesised_types()?;
    parser.finish()?;

    Ok(SignatureDeclaration { name, inputs })
}

/// A cursor over the lexeme stream with the recursive descent methods for the
/// signature grammar.
struct Parser {
    lexemes: Vec<Lexeme>,
    cursor:  usize,
}

impl Parser {
    fn new(lexemes: Vec<Lexeme>) -> Self {
        let cursor = 0;
        Self { lexemes, cursor }
    }

    /// Gets the lexeme at the cursor without consuming it.
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.cursor)
    }

    /// Consumes and returns the lexeme at the cursor.
    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.cursor).cloned();
        if lexeme.is_some() {
            self.cursor += 1;
        }
        lexeme
    }

    /// The byte offset at which the cursor currently sits, saturating to the
    /// end of the input once the lexemes run out.
    fn position(&self) -> u32 {
        self.peek().map_or_else(
            || {
                self.lexemes
                    .last()
                    .map_or(0, |l| l.position + u32::try_from(l.text.len()).unwrap_or(0))
            },
            |l| l.position,
        )
    }

    /// Consumes an identifier if one is next, returning its text.
    fn optional_identifier(&mut self) -> Option<String> {
        match self.peek() {
            Some(lexeme) if lexeme.kind == LexemeKind::Identifier => {
                self.advance().map(|l| l.text)
            }
            _ => None,
        }
    }

    /// Requires that the input has been fully consumed.
    fn finish(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(lexeme) => {
                Err(Error::TrailingInput(lexeme.text.clone()).locate(lexeme.position))
            }
        }
    }

    /// Parses a type expression: a base type followed by any number of array
    /// suffixes.
    fn type_expression(&mut self) -> Result<AbiType> {
        let base = self.base_type()?;
        self.array_suffixes(base)
    }

    /// Parses a base type: either a parenthesised tuple or a keyword
    /// identifier.
    fn base_type(&mut self) -> Result<AbiType> {
        match self.peek() {
            Some(lexeme) if lexeme.kind == LexemeKind::OpenParen => {
                let types = self.parenthesised_types()?;
                Ok(AbiType::Tuple { types })
            }
            Some(lexeme) if lexeme.kind == LexemeKind::Identifier => {
                let lexeme = self.advance().expect("The lexeme was just peeked");
                keyword_type(&lexeme.text, lexeme.position)
            }
            Some(lexeme) => Err(Error::UnexpectedToken {
                found:    lexeme.text.clone(),
                expected: "a type".to_string(),
            }
            .locate(lexeme.position)),
            None => {
                Err(Error::UnexpectedEndOfInput("a type".to_string()).locate(self.position()))
            }
        }
    }

    /// Parses a parenthesised, comma-separated, possibly empty list of type
    /// expressions, consuming both parentheses.
    fn parenthesised_types(&mut self) -> Result<Vec<AbiType>> {
        let open_position = self.position();
        match self.advance() {
            Some(lexeme) if lexeme.kind == LexemeKind::OpenParen => (),
            Some(lexeme) => {
                return Err(Error::UnexpectedToken {
                    found:    lexeme.text,
                    expected: "`(`".to_string(),
                }
                .locate(lexeme.position))
            }
            None => {
                return Err(Error::UnexpectedEndOfInput("`(`".to_string()).locate(open_position))
            }
        }

        let mut types = Vec::new();
        if matches!(self.peek(), Some(l) if l.kind == LexemeKind::CloseParen) {
            self.advance();
            return Ok(types);
        }

        loop {
            types.push(self.type_expression()?);
            match self.advance() {
                Some(lexeme) if lexeme.kind == LexemeKind::Comma => continue,
                Some(lexeme) if lexeme.kind == LexemeKind::CloseParen => break,
                Some(lexeme) => {
                    return Err(Error::UnbalancedParentheses.locate(lexeme.position));
                }
                None => return Err(Error::UnbalancedParentheses.locate(self.position())),
            }
        }

        Ok(types)
    }

    /// Wraps `tp` in array types for each `[]` or `[N]` suffix present,
    /// innermost suffix first.
    fn array_suffixes(&mut self, mut tp: AbiType) -> Result<AbiType> {
        while matches!(self.peek(), Some(l) if l.kind == LexemeKind::OpenBracket) {
            self.advance();
            match self.advance() {
                Some(lexeme) if lexeme.kind == LexemeKind::CloseBracket => {
                    tp = AbiType::DynArray { tp: Box::new(tp) };
                }
                Some(lexeme) if lexeme.kind == LexemeKind::Digits => {
                    let length = lexeme
                        .text
                        .parse::<usize>()
                        .map_err(|_| Error::InvalidSize(lexeme.text.clone()))
                        .locate(lexeme.position)?;
                    match self.advance() {
                        Some(l) if l.kind == LexemeKind::CloseBracket => (),
                        Some(l) => {
                            return Err(Error::UnexpectedToken {
                                found:    l.text,
                                expected: "`]`".to_string(),
                            }
                            .locate(l.position))
                        }
                        None => {
                            return Err(Error::UnexpectedEndOfInput("`]`".to_string())
                                .locate(self.position()))
                        }
                    }
                    tp = AbiType::Array {
                        length,
                        tp: Box::new(tp),
                    };
                }
                Some(lexeme) => {
                    return Err(Error::UnexpectedToken {
                        found:    lexeme.text,
                        expected: "an array length or `]`".to_string(),
                    }
                    .locate(lexeme.position))
                }
                None => {
                    return Err(Error::UnexpectedEndOfInput("`]`".to_string())
                        .locate(self.position()))
                }
            }
        }

        Ok(tp)
    }
}

/// Resolves a base-type keyword, applying the grammar's defaults: bare `uint`
/// and `int` are 256 bits wide, bare `fixed` and `ufixed` are 128x18, and
/// `enum` normalises to `uint8`.
///
/// The `tuple` keyword resolves to an empty tuple placeholder. It never
/// occurs in compact signatures, but descriptive ABI documents spell their
/// composite types that way and substitute the component list in afterwards.
fn keyword_type(text: &str, position: u32) -> Result<AbiType> {
    match text {
        "address" => return Ok(AbiType::Address),
        "bool" => return Ok(AbiType::Bool),
        "function" => return Ok(AbiType::Function),
        "string" => return Ok(AbiType::String),
        "bytes" => return Ok(AbiType::DynBytes),
        "tuple" => return Ok(AbiType::Tuple { types: Vec::new() }),
        "enum" => return Ok(AbiType::UInt { size: ENUM_INTEGER_BITS }),
        "uint" => return Ok(AbiType::UInt { size: DEFAULT_INTEGER_BITS }),
        "int" => return Ok(AbiType::Int { size: DEFAULT_INTEGER_BITS }),
        "fixed" => {
            return Ok(AbiType::Fixed {
                size:     DEFAULT_FIXED_POINT_BITS,
                exponent: DEFAULT_FIXED_POINT_EXPONENT,
            })
        }
        "ufixed" => {
            return Ok(AbiType::UFixed {
                size:     DEFAULT_FIXED_POINT_BITS,
                exponent: DEFAULT_FIXED_POINT_EXPONENT,
            })
        }
        _ => (),
    }

    if let Some(rest) = sized_remainder(text, "uint") {
        let size = integer_bits(rest, position)?;
        return Ok(AbiType::UInt { size });
    }
    if let Some(rest) = sized_remainder(text, "int") {
        let size = integer_bits(rest, position)?;
        return Ok(AbiType::Int { size });
    }
    if let Some(rest) = sized_remainder(text, "bytes") {
        let length = fixed_bytes_length(rest, position)?;
        return Ok(AbiType::Bytes { length });
    }
    if let Some(rest) = text.strip_prefix("ufixed") {
        let (size, exponent) = fixed_point_size(rest, position)?;
        return Ok(AbiType::UFixed { size, exponent });
    }
    if let Some(rest) = text.strip_prefix("fixed") {
        let (size, exponent) = fixed_point_size(rest, position)?;
        return Ok(AbiType::Fixed { size, exponent });
    }

    Err(Error::UnknownBaseType(text.to_string()).locate(position))
}

/// Strips `keyword` from `text` when what remains is a pure run of digits,
/// which distinguishes `uint256` from an unrelated identifier such as
/// `uinty`.
fn sized_remainder<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
        Some(rest)
    } else {
        None
    }
}

/// Parses and validates an integer bit size: a multiple of 8 between 8
/// and 256.
fn integer_bits(digits: &str, position: u32) -> Result<u16> {
    let size = digits
        .parse::<u16>()
        .map_err(|_| Error::InvalidSize(digits.to_string()))
        .locate(position)?;

    if size == 0 || size > MAXIMUM_INTEGER_BITS {
        return Err(Error::InvalidSize(digits.to_string()).locate(position));
    }
    if size % BYTE_SIZE_BITS != 0 {
        return Err(Error::SizeNotMultipleOfEight(size).locate(position));
    }

    Ok(size)
}

/// Parses and validates a fixed-bytes width: between 1 and 32 inclusive.
fn fixed_bytes_length(digits: &str, position: u32) -> Result<u16> {
    let length = digits
        .parse::<u16>()
        .map_err(|_| Error::InvalidSize(digits.to_string()))
        .locate(position)?;

    if length == 0 || length > MAXIMUM_FIXED_BYTES_LENGTH {
        return Err(Error::InvalidBytesWidth(length).locate(position));
    }

    Ok(length)
}

/// Parses and validates a fixed-point `MxN` size: `M` a multiple of 8
/// between 8 and 256, `N` at most 80.
fn fixed_point_size(rest: &str, position: u32) -> Result<(u16, u8)> {
    let Some((size_digits, exponent_digits)) = rest.split_once('x') else {
        return Err(Error::InvalidSize(rest.to_string()).locate(position));
    };

    let size = integer_bits(size_digits, position)?;
    let exponent = exponent_digits
        .parse::<u8>()
        .map_err(|_| Error::InvalidSize(exponent_digits.to_string()))
        .locate(position)?;

    if exponent > MAXIMUM_FIXED_POINT_EXPONENT {
        return Err(Error::InvalidSize(exponent_digits.to_string()).locate(position));
    }

    Ok((size, exponent))
}
