//! This module tests the normalisation of descriptive JSON ABI documents
//! into selectors, including tuple component rewriting and the
//! standard-type gate.
#![cfg(test)]

use serde_json::json;
use solidity_abi_codec::{
    keccak::Keccak,
    parse_abi,
    parse_abi_with,
    selector::{SelectorId, SelectorKind, StateMutability},
    types::AbiType,
};

mod common;

/// A keccak stand-in with a predictable digest, for checking that the
/// injected provider is the one consulted for identifier derivation.
#[derive(Debug)]
struct LengthKeccak;

impl Keccak for LengthKeccak {
    fn hash256(&self, data: &[u8]) -> [u8; 32] {
        [u8::try_from(data.len()).unwrap_or(u8::MAX); 32]
    }
}

#[test]
fn normalises_a_function_entry() -> anyhow::Result<()> {
    let document = json!([{
        "type": "function",
        "name": "transfer",
        "stateMutability": "nonpayable",
        "inputs": [
            {"name": "recipient", "type": "address"},
            {"name": "amount", "type": "uint256"},
        ],
        "outputs": [{"name": "", "type": "bool"}],
    }]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors.len(), 1);

    let selector = &selectors[0];
    assert_eq!(selector.kind, SelectorKind::Function);
    assert_eq!(selector.name.as_deref(), Some("transfer"));
    assert_eq!(selector.inputs, vec![AbiType::Address, AbiType::UInt { size: 256 }]);
    assert_eq!(selector.input_names, vec!["recipient", "amount"]);
    assert_eq!(selector.outputs, vec![AbiType::Bool]);
    assert_eq!(selector.state_mutability, Some(StateMutability::NonPayable));
    assert_eq!(selector.method_id(), Some([0xa9, 0x05, 0x9c, 0xbb]));

    Ok(())
}

#[test]
fn events_carry_their_full_topic_hash() -> anyhow::Result<()> {
    let document = json!([{
        "type": "event",
        "name": "Transfer",
        "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false},
        ],
    }]);

    let selectors = parse_abi(&document, true)?;
    assert_eq!(selectors.len(), 1);

    let selector = &selectors[0];
    assert_eq!(selector.kind, SelectorKind::Event);
    assert_eq!(selector.indexed, Some(vec![true, true, false]));
    assert_eq!(
        selector.topic().map(hex::encode),
        Some("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".to_string())
    );

    Ok(())
}

#[test]
fn events_are_omitted_unless_requested() -> anyhow::Result<()> {
    let document = json!([
        {
            "type": "event",
            "name": "Transfer",
            "inputs": [{"name": "value", "type": "uint256", "indexed": false}],
        },
        {
            "type": "function",
            "name": "totalSupply",
            "stateMutability": "view",
            "inputs": [],
            "outputs": [{"name": "", "type": "uint256"}],
        },
    ]);

    let without_events = parse_abi(&document, false)?;
    assert_eq!(without_events.len(), 1);
    assert_eq!(without_events[0].kind, SelectorKind::Function);

    let with_events = parse_abi(&document, true)?;
    assert_eq!(with_events.len(), 2);

    Ok(())
}

#[test]
fn constructors_and_fallbacks_normalise() -> anyhow::Result<()> {
    let document = json!([
        {
            "type": "constructor",
            "stateMutability": "payable",
            "inputs": [{"name": "owner", "type": "address"}],
        },
        {"type": "fallback", "stateMutability": "payable"},
    ]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors.len(), 2);

    let constructor = &selectors[0];
    assert_eq!(constructor.kind, SelectorKind::Constructor);
    assert_eq!(constructor.name, None);
    assert!(matches!(constructor.id, Some(SelectorId::Method(_))));

    let fallback = &selectors[1];
    assert_eq!(fallback.kind, SelectorKind::Fallback);
    assert_eq!(fallback.name, None);
    assert!(fallback.inputs.is_empty());
    assert_eq!(fallback.id, None);

    Ok(())
}

#[test]
fn errors_normalise_with_method_ids() -> anyhow::Result<()> {
    let document = json!([{
        "type": "error",
        "name": "InsufficientBalance",
        "inputs": [
            {"name": "available", "type": "uint256"},
            {"name": "required", "type": "uint256"},
        ],
    }]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].kind, SelectorKind::Error);
    assert_eq!(
        selectors[0].canonical_signature(),
        "InsufficientBalance(uint256,uint256)"
    );
    assert!(matches!(selectors[0].id, Some(SelectorId::Method(_))));

    Ok(())
}

#[test]
fn rewrites_tuple_components() -> anyhow::Result<()> {
    let document = json!([{
        "type": "function",
        "name": "submit",
        "stateMutability": "nonpayable",
        "inputs": [{
            "name": "order",
            "type": "tuple",
            "components": [
                {"name": "id", "type": "uint256"},
                {"name": "note", "type": "string"},
            ],
        }],
        "outputs": [],
    }]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(
        selectors[0].inputs,
        vec![AbiType::Tuple {
            types: vec![AbiType::UInt { size: 256 }, AbiType::String],
        }]
    );
    assert_eq!(
        selectors[0].canonical_signature(),
        "submit((uint256,string))"
    );

    Ok(())
}

#[test]
fn rewrites_multidimensional_tuple_arrays() -> anyhow::Result<()> {
    let document = json!([{
        "type": "function",
        "name": "batch",
        "stateMutability": "nonpayable",
        "inputs": [{
            "name": "orders",
            "type": "tuple[2][]",
            "components": [
                {"name": "id", "type": "uint256"},
                {"name": "flags", "type": "bool[3]"},
            ],
        }],
        "outputs": [],
    }]);

    let selectors = parse_abi(&document, false)?;
    let expected_tuple = AbiType::Tuple {
        types: vec![
            AbiType::UInt { size: 256 },
            AbiType::Array {
                length: 3,
                tp:     Box::new(AbiType::Bool),
            },
        ],
    };

    assert_eq!(selectors[0].inputs, vec![AbiType::DynArray {
        tp: Box::new(AbiType::Array {
            length: 2,
            tp:     Box::new(expected_tuple),
        }),
    }]);
    assert_eq!(
        selectors[0].canonical_signature(),
        "batch((uint256,bool[3])[2][])"
    );

    Ok(())
}

#[test]
fn rewrites_nested_tuple_components() -> anyhow::Result<()> {
    let document = json!([{
        "type": "function",
        "name": "wrap",
        "stateMutability": "nonpayable",
        "inputs": [{
            "name": "outer",
            "type": "tuple",
            "components": [
                {"name": "inner", "type": "tuple[]", "components": [
                    {"name": "x", "type": "uint8"},
                ]},
            ],
        }],
        "outputs": [],
    }]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors[0].canonical_signature(), "wrap(((uint8)[]))");

    Ok(())
}

#[test]
fn skips_entries_with_non_standard_leaf_types() -> anyhow::Result<()> {
    let document = json!([
        {
            "type": "function",
            "name": "setToken",
            "stateMutability": "nonpayable",
            "inputs": [{"name": "token", "type": "MyToken"}],
            "outputs": [],
        },
        {
            "type": "function",
            "name": "kept",
            "stateMutability": "view",
            "inputs": [],
            "outputs": [],
        },
    ]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].name.as_deref(), Some("kept"));

    Ok(())
}

#[test]
fn skips_entries_of_unknown_kind() -> anyhow::Result<()> {
    let document = json!([
        {"type": "receive", "stateMutability": "payable"},
        {"type": "function", "name": "f", "stateMutability": "pure", "inputs": [], "outputs": []},
    ]);

    let selectors = parse_abi(&document, false)?;
    assert_eq!(selectors.len(), 1);

    Ok(())
}

#[test]
fn surfaces_grammar_violations_in_gated_types() {
    let document = json!([{
        "type": "function",
        "name": "broken",
        "stateMutability": "pure",
        "inputs": [{"name": "x", "type": "uint7"}],
        "outputs": [],
    }]);

    assert!(parse_abi(&document, false).is_err());
}

#[test]
fn threads_an_injected_keccak_provider_through() -> anyhow::Result<()> {
    let document = json!([
        {
            "type": "function",
            "name": "transfer",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "recipient", "type": "address"},
                {"name": "amount", "type": "uint256"},
            ],
            "outputs": [{"name": "", "type": "bool"}],
        },
        {
            "type": "event",
            "name": "Transfer",
            "inputs": [
                {"name": "from", "type": "address", "indexed": true},
                {"name": "to", "type": "address", "indexed": true},
                {"name": "value", "type": "uint256", "indexed": false},
            ],
        },
    ]);

    let selectors = parse_abi_with(&document, true, &LengthKeccak)?;

    let function = &selectors[0];
    let function_length = u8::try_from(function.canonical_signature().len())?;
    assert_eq!(function.method_id(), Some([function_length; 4]));

    let event = &selectors[1];
    let event_length = u8::try_from(event.canonical_signature().len())?;
    assert_eq!(event.topic(), Some([event_length; 32]));

    // The default provider hashes for real and therefore disagrees.
    let with_default = parse_abi(&document, true)?;
    assert_ne!(with_default[0].id, function.id);
    assert_ne!(with_default[1].id, event.id);

    Ok(())
}

#[test]
fn derives_identifiers_deterministically() -> anyhow::Result<()> {
    let document = json!([{
        "type": "function",
        "name": "transfer",
        "stateMutability": "nonpayable",
        "inputs": [
            {"name": "recipient", "type": "address"},
            {"name": "amount", "type": "uint256"},
        ],
        "outputs": [{"name": "", "type": "bool"}],
    }]);

    let first = parse_abi(&document, false)?;
    let second = parse_abi(&document, false)?;
    assert_eq!(first[0].id, second[0].id);

    Ok(())
}
