//! This module contains the normalisation of descriptive ABI documents,
//! already parsed into a JSON tree, into selectors.
//!
//! # Soft Failures
//!
//! A document routinely describes more than this codec models: entries for
//! unknown kinds, or inputs typed as bare contract or struct references that
//! some compilers emit. Such entries are skipped, with a warning for the
//! non-standard ones, so that one odd entry never blocks the rest of the
//! document. A type string that looks standard but breaks the grammar is a
//! hard error, as that indicates a corrupt document rather than an exotic
//! one.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{
    error::Result,
    keccak::{Keccak, Sha3Keccak},
    parser,
    selector::{Selector, SelectorKind, StateMutability},
    types::AbiType,
};

/// The portion of a descriptive ABI entry that the codec cares about.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(rename = "type")]
    kind: String,
    name: Option<String>,
    #[serde(default)]
    inputs: Vec<RawParameter>,
    #[serde(default)]
    outputs: Vec<RawParameter>,
    state_mutability: Option<StateMutability>,
}

/// A single input or output of a descriptive ABI entry.
#[derive(Clone, Debug, Deserialize)]
struct RawParameter {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    components: Option<Vec<RawParameter>>,
    indexed: Option<bool>,
}

/// Normalises the descriptive ABI document in `document`, a JSON array of
/// entries, into selectors, using the default keccak provider for
/// identifiers.
///
/// Event entries are only returned when `include_events` is set.
///
/// # Errors
///
/// When an entry that passes the standard-type gate carries a type string
/// that does not conform to the grammar.
pub fn parse_abi(document: &Value, include_events: bool) -> Result<Vec<Selector>> {
    parse_abi_with(document, include_events, &Sha3Keccak)
}

/// Normalises the descriptive ABI document in `document` into selectors,
/// deriving identifiers with the provided keccak provider.
///
/// # Errors
///
/// When an entry that passes the standard-type gate carries a type string
/// that does not conform to the grammar.
pub fn parse_abi_with(
    document: &Value,
    include_events: bool,
    keccak: &dyn Keccak,
) -> Result<Vec<Selector>> {
    let entries = match document.as_array() {
        Some(entries) => entries.as_slice(),
        None => std::slice::from_ref(document),
    };

    let mut selectors = Vec::new();
    for entry in entries {
        if let Some(selector) = parse_entry(entry, keccak)? {
            if selector.kind == SelectorKind::Event && !include_events {
                continue;
            }
            selectors.push(selector);
        }
    }

    Ok(selectors)
}

/// Normalises a single document entry, producing nothing for entries of
/// unknown kind and for entries that are skipped softly.
fn parse_entry(entry: &Value, keccak: &dyn Keccak) -> Result<Option<Selector>> {
    let Ok(raw) = RawEntry::deserialize(entry) else {
        warn!("Skipping a malformed ABI entry: {entry}");
        return Ok(None);
    };

    if !entry_is_standard(&raw) {
        warn!("Skipping an ABI entry with a non-standard type: {entry}");
        return Ok(None);
    }

    let selector = match raw.kind.as_str() {
        "function" => {
            let Some(name) = raw.name.clone() else {
                warn!("Skipping a function entry with no name: {entry}");
                return Ok(None);
            };
            let (inputs, input_names) = parameter_lists(&raw.inputs)?;
            let (outputs, output_names) = parameter_lists(&raw.outputs)?;
            let mut selector = Selector::new(SelectorKind::Function, Some(name), inputs)
                .with_input_names(input_names)
                .with_outputs(outputs, output_names);
            if let Some(state_mutability) = raw.state_mutability {
                selector = selector.with_state_mutability(state_mutability);
            }
            selector
        }
        "constructor" => {
            let (inputs, input_names) = parameter_lists(&raw.inputs)?;
            let mut selector = Selector::new(SelectorKind::Constructor, None, inputs)
                .with_input_names(input_names);
            if let Some(state_mutability) = raw.state_mutability {
                selector = selector.with_state_mutability(state_mutability);
            }
            selector
        }
        "error" => {
            let (inputs, input_names) = parameter_lists(&raw.inputs)?;
            Selector::new(SelectorKind::Error, raw.name.clone(), inputs)
                .with_input_names(input_names)
        }
        "event" => {
            let (inputs, input_names) = parameter_lists(&raw.inputs)?;
            let indexed = raw
                .inputs
                .iter()
                .map(|parameter| parameter.indexed.unwrap_or(false))
                .collect();
            Selector::new(SelectorKind::Event, raw.name.clone(), inputs)
                .with_input_names(input_names)
                .with_indexed(indexed)
        }
        "fallback" => Selector::new(SelectorKind::Fallback, None, Vec::new()),
        _ => return Ok(None),
    };

    Ok(Some(selector.finalised(keccak)))
}

/// Parses a raw parameter list into its types and its parallel names.
fn parameter_lists(parameters: &[RawParameter]) -> Result<(Vec<AbiType>, Vec<String>)> {
    let mut types = Vec::with_capacity(parameters.len());
    let mut names = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        types.push(parameter_type(parameter)?);
        names.push(parameter.name.clone());
    }

    Ok((types, names))
}

/// Parses the type of a single parameter, substituting its components into
/// the tuple placeholder when the parameter is tuple-shaped.
///
/// The outer type string (`tuple`, `tuple[]`, `tuple[2][]`, and so on)
/// parses to a shape in which the innermost element is an empty tuple
/// placeholder; the components then replace exactly that placeholder, which
/// is what makes multidimensional tuple arrays come out right.
fn parameter_type(parameter: &RawParameter) -> Result<AbiType> {
    let outer = parser::parse_type(&parameter.type_name)?;

    match &parameter.components {
        Some(components) => {
            let mut parsed = Vec::with_capacity(components.len());
            for component in components {
                parsed.push(parameter_type(component)?);
            }
            Ok(substitute_tuple(outer, &parsed))
        }
        None => Ok(outer),
    }
}

/// Replaces the innermost tuple placeholder in `tp` with a tuple of
/// `components`.
fn substitute_tuple(tp: AbiType, components: &[AbiType]) -> AbiType {
    match tp {
        AbiType::Tuple { .. } => AbiType::Tuple {
            types: components.to_vec(),
        },
        AbiType::Array { length, tp } => AbiType::Array {
            length,
            tp: Box::new(substitute_tuple(*tp, components)),
        },
        AbiType::DynArray { tp } => AbiType::DynArray {
            tp: Box::new(substitute_tuple(*tp, components)),
        },
        other => other,
    }
}

/// Checks that every leaf type mentioned by the entry is one of the base
/// Solidity keywords, optionally sized and suffixed.
///
/// Compilers and hand-written documents sometimes leave contract or struct
/// references (`MyToken`) in type position; those entries never reach the
/// parser.
fn entry_is_standard(entry: &RawEntry) -> bool {
    entry.inputs.iter().all(parameter_is_standard)
        && entry.outputs.iter().all(parameter_is_standard)
}

fn parameter_is_standard(parameter: &RawParameter) -> bool {
    if !leaf_is_standard(&parameter.type_name) {
        return false;
    }

    parameter
        .components
        .as_deref()
        .unwrap_or_default()
        .iter()
        .all(parameter_is_standard)
}

/// Checks a single type string against the standard shape: a base keyword,
/// optional size digits (`MxN` for the fixed-point types), and any number of
/// array suffixes.
fn leaf_is_standard(type_name: &str) -> bool {
    let mut base = type_name;
    while let Some(stripped) = base.strip_suffix(']') {
        let Some(open) = stripped.rfind('[') else {
            return false;
        };
        if !stripped[open + 1..].chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        base = &stripped[..open];
    }

    let keyword_end = base
        .char_indices()
        .find(|(_, c)| !c.is_ascii_lowercase())
        .map_or(base.len(), |(at, _)| at);
    let (keyword, sizes) = base.split_at(keyword_end);

    let sized_ok = match keyword {
        "uint" | "int" | "bytes" => sizes.chars().all(|c| c.is_ascii_digit()),
        "fixed" | "ufixed" => {
            sizes.is_empty()
                || matches!(
                    sizes.split_once('x'),
                    Some((m, n)) if !m.is_empty()
                        && m.chars().all(|c| c.is_ascii_digit())
                        && !n.is_empty()
                        && n.chars().all(|c| c.is_ascii_digit())
                )
        }
        "address" | "bool" | "string" | "tuple" => sizes.is_empty(),
        _ => false,
    };

    sized_ok
}
