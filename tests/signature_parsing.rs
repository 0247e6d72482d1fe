//! This module tests the public signature-parsing surface: grammar defaults,
//! canonical rendering, identifier derivation, and failure positions.
#![cfg(test)]

use solidity_abi_codec::{
    error::{parsing, Error},
    parse_signature,
    parse_type,
    selector::SelectorKind,
    types::AbiType,
};

mod common;

#[test]
fn applies_the_width_defaults_before_hashing() -> anyhow::Result<()> {
    let selector = parse_signature("baz(uint,address)")?;

    assert_eq!(selector.canonical_signature(), "baz(uint256,address)");
    assert_eq!(
        selector.method_id().map(hex::encode),
        Some("a291add6".to_string())
    );

    Ok(())
}

#[test]
fn parsing_the_canonical_form_is_idempotent() -> anyhow::Result<()> {
    for signature in [
        "transfer(address,uint256)",
        "f(uint8[4][],(bool,bytes3),string)",
        "g(enum,fixed,ufixed64x2)",
        "h()",
        "(bytes,int)",
    ] {
        let parsed = parse_signature(signature)?;
        let reparsed = parse_signature(&parsed.canonical_signature())?;

        assert_eq!(parsed.inputs, reparsed.inputs);
        assert_eq!(parsed.name, reparsed.name);
        assert_eq!(parsed.id, reparsed.id);
        assert_eq!(
            parsed.canonical_signature(),
            reparsed.canonical_signature()
        );
    }

    Ok(())
}

#[test]
fn parses_bare_types_in_type_mode() -> anyhow::Result<()> {
    assert_eq!(parse_type("uint")?, AbiType::UInt { size: 256 });
    assert_eq!(parse_type("bytes24")?, AbiType::Bytes { length: 24 });
    assert_eq!(
        parse_type("(uint256,bool)[]")?,
        AbiType::DynArray {
            tp: Box::new(AbiType::Tuple {
                types: vec![AbiType::UInt { size: 256 }, AbiType::Bool],
            }),
        }
    );

    Ok(())
}

#[test]
fn parsed_selectors_are_functions_with_no_outputs() -> anyhow::Result<()> {
    let selector = parse_signature("transfer(address,uint256)")?;

    assert_eq!(selector.kind, SelectorKind::Function);
    assert!(selector.outputs.is_empty());
    assert!(selector.indexed.is_none());
    assert!(selector.state_mutability.is_none());

    Ok(())
}

#[test]
fn tolerates_whitespace_between_lexemes() -> anyhow::Result<()> {
    let spaced = parse_signature("transfer(address, uint256)")?;
    let compact = parse_signature("transfer(address,uint256)")?;

    assert_eq!(spaced.id, compact.id);

    Ok(())
}

#[test]
fn failures_carry_the_offending_position() {
    let Err(Error::Parsing(located)) = parse_signature("f(uint256,%bool)") else {
        panic!("A parse error was expected");
    };

    assert_eq!(located.location, 10);
    assert_eq!(located.payload, parsing::Error::UnexpectedCharacter('%'));
}

#[test]
fn rejects_malformed_signatures() {
    assert!(parse_signature("f(uint256").is_err());
    assert!(parse_signature("f)uint256(").is_err());
    assert!(parse_signature("f(uint7)").is_err());
    assert!(parse_signature("f(bytes33)").is_err());
    assert!(parse_signature("f(uint256))").is_err());
    assert!(parse_signature("f(,)").is_err());
}
