//! This module contains the selector representation: the normalised
//! description of a function, constructor, event, error, or fallback against
//! which values are encoded and decoded.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    codec::{decoder, encoder},
    constant::{METHOD_ID_SIZE_BYTES, TOPIC_SIZE_BYTES},
    error::Result,
    keccak::{Keccak, Sha3Keccak},
    parser,
    parser::SignatureDeclaration,
    types::AbiType,
    value::AbiValue,
};

/// The kind of declaration that a selector describes.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    Function,
    Constructor,
    Fallback,
    Event,
    Error,
}

/// The declared state mutability of a function.
///
/// The serialised spellings match the `stateMutability` field of descriptive
/// ABI documents.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

/// The identifier derived from a selector's canonical signature.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectorId {
    /// The 4-byte method identifier carried by functions, constructors, and
    /// errors.
    Method([u8; METHOD_ID_SIZE_BYTES]),

    /// The full 32-byte topic hash carried by events.
    ///
    /// Older revisions of the library truncated this to 4 bytes as well; the
    /// full hash is kept so that it can be compared against `topic0` of a log
    /// without re-hashing.
    Topic([u8; TOPIC_SIZE_BYTES]),
}

/// Which of a selector's two type lists an operation runs against.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// The declared inputs: call data for functions.
    Input,

    /// The declared outputs: return data for functions.
    Output,
}

/// A normalised, immutable description of a single ABI declaration.
///
/// # Invariants
///
/// `input_names` is parallel to `inputs` and `output_names` to `outputs`.
/// `indexed` is present exactly when `kind` is [`SelectorKind::Event`], and
/// is then parallel to `inputs`. `id` is the KECCAK-256 of the canonical
/// signature, truncated to 4 bytes for everything except events; fallbacks
/// and anonymous declarations carry no id at all.
///
/// Selectors are built once by the signature or document parser and freely
/// shared afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selector {
    /// The kind of declaration being described.
    pub kind: SelectorKind,

    /// The declared name, absent for constructors, fallbacks, and anonymous
    /// signatures.
    pub name: Option<String>,

    /// The declared input types, in order.
    pub inputs: Vec<AbiType>,

    /// The declared input names, parallel to `inputs`; unnamed inputs hold
    /// an empty string.
    pub input_names: Vec<String>,

    /// The declared output types, in order; only functions have any.
    pub outputs: Vec<AbiType>,

    /// The declared output names, parallel to `outputs`.
    pub output_names: Vec<String>,

    /// Which inputs are indexed, parallel to `inputs`; present only for
    /// events.
    pub indexed: Option<Vec<bool>>,

    /// The declared state mutability, when the source document carried one.
    pub state_mutability: Option<StateMutability>,

    /// The identifier derived from the canonical signature, when the kind
    /// carries one.
    pub id: Option<SelectorId>,
}

impl Selector {
    /// Constructs a new selector of `kind` over the given `name` and
    /// `inputs`, with every other field empty.
    ///
    /// The identifier is not computed here; call [`Self::finalised`] once the
    /// selector's fields are complete.
    #[must_use]
    pub fn new(kind: SelectorKind, name: Option<String>, inputs: Vec<AbiType>) -> Self {
        let input_names = vec![String::new(); inputs.len()];
        Self {
            kind,
            name,
            inputs,
            input_names,
            outputs: Vec::new(),
            output_names: Vec::new(),
            indexed: None,
            state_mutability: None,
            id: None,
        }
    }

    /// Replaces the input names with `names`.
    #[must_use]
    pub fn with_input_names(mut self, names: Vec<String>) -> Self {
        self.input_names = names;
        self
    }

    /// Replaces the outputs and their names.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<AbiType>, names: Vec<String>) -> Self {
        self.outputs = outputs;
        self.output_names = names;
        self
    }

    /// Attaches the indexed mask of an event.
    #[must_use]
    pub fn with_indexed(mut self, indexed: Vec<bool>) -> Self {
        self.indexed = Some(indexed);
        self
    }

    /// Attaches the declared state mutability.
    #[must_use]
    pub fn with_state_mutability(mut self, state_mutability: StateMutability) -> Self {
        self.state_mutability = Some(state_mutability);
        self
    }

    /// Computes and attaches the selector's identifier using the provided
    /// keccak provider.
    #[must_use]
    pub fn finalised(mut self, keccak: &dyn Keccak) -> Self {
        self.id = self.compute_id(keccak);
        self
    }

    /// Renders the canonical signature: the name (empty when absent)
    /// followed by the parenthesised, comma-separated canonical forms of the
    /// input types, with no whitespace anywhere.
    #[must_use]
    pub fn canonical_signature(&self) -> String {
        let name = self.name.as_deref().unwrap_or("");
        let inputs = self.inputs.iter().map(ToString::to_string).join(",");
        format!("{name}({inputs})")
    }

    /// Computes the identifier implied by the selector's kind and canonical
    /// signature.
    ///
    /// Fallbacks have no signature to hash. Anonymous function selectors
    /// also go without: they exist to describe bare type lists, and an
    /// identifier derived from a nameless signature would never appear on
    /// the wire.
    #[must_use]
    pub fn compute_id(&self, keccak: &dyn Keccak) -> Option<SelectorId> {
        match self.kind {
            SelectorKind::Fallback => None,
            SelectorKind::Function if self.name.is_none() => None,
            SelectorKind::Event => {
                Some(SelectorId::Topic(
                    keccak.hash256(self.canonical_signature().as_bytes()),
                ))
            }
            _ => {
                let digest = keccak.hash256(self.canonical_signature().as_bytes());
                let mut id = [0u8; METHOD_ID_SIZE_BYTES];
                id.copy_from_slice(&digest[..METHOD_ID_SIZE_BYTES]);
                Some(SelectorId::Method(id))
            }
        }
    }

    /// Gets the 4-byte method identifier, if the selector carries one.
    #[must_use]
    pub fn method_id(&self) -> Option<[u8; METHOD_ID_SIZE_BYTES]> {
        match self.id {
            Some(SelectorId::Method(id)) => Some(id),
            _ => None,
        }
    }

    /// Gets the 32-byte topic identifier, if the selector carries one.
    #[must_use]
    pub fn topic(&self) -> Option<[u8; TOPIC_SIZE_BYTES]> {
        match self.id {
            Some(SelectorId::Topic(id)) => Some(id),
            _ => None,
        }
    }

    /// Gets the type list for the given `direction`.
    #[must_use]
    pub fn type_list(&self, direction: Direction) -> &[AbiType] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
        }
    }

    /// Counts the indexed inputs of an event selector.
    #[must_use]
    pub fn indexed_count(&self) -> usize {
        self.indexed
            .as_ref()
            .map_or(0, |mask| mask.iter().filter(|indexed| **indexed).count())
    }

    /// Encodes `values` against the type list selected by `direction` in the
    /// standard head/tail layout.
    ///
    /// When encoding the inputs of a named function the 4-byte method
    /// identifier is prepended, producing complete call data.
    ///
    /// # Errors
    ///
    /// When any value does not inhabit its paired type, or the value count
    /// differs from the type count.
    pub fn encode(&self, values: &[AbiValue], direction: Direction) -> Result<Vec<u8>> {
        let body = encoder::encode_sequence(self.type_list(direction), values)?;

        let prefix = match (direction, self.kind, self.id) {
            (Direction::Input, SelectorKind::Function, Some(SelectorId::Method(id))) => {
                id.to_vec()
            }
            _ => Vec::new(),
        };

        let mut out = prefix;
        out.extend(body);
        Ok(out)
    }

    /// Decodes `data` against the type list selected by `direction`.
    ///
    /// When the selector carries a 4-byte method identifier and `data` begins
    /// with exactly those bytes, the identifier is stripped before decoding;
    /// otherwise the entire input is treated as the body.
    ///
    /// # Errors
    ///
    /// When the data is truncated, contains offsets that escape it, or holds
    /// bytes that do not decode at their expected type.
    pub fn decode(&self, data: &[u8], direction: Direction) -> Result<Vec<AbiValue>> {
        let body = match self.method_id() {
            Some(id) if data.len() >= METHOD_ID_SIZE_BYTES && data[..METHOD_ID_SIZE_BYTES] == id => {
                &data[METHOD_ID_SIZE_BYTES..]
            }
            _ => data,
        };

        Ok(decoder::decode_sequence(self.type_list(direction), body)?)
    }
}

/// Parses `text` as a compact textual signature and finalises the resulting
/// selector with the default keccak provider.
///
/// # Errors
///
/// When `text` does not conform to the signature grammar.
pub fn parse_signature(text: &str) -> Result<Selector> {
    parse_signature_with(text, &Sha3Keccak)
}

/// Parses `text` as a compact textual signature, deriving the method
/// identifier with the provided keccak provider.
///
/// # Errors
///
/// When `text` does not conform to the signature grammar.
pub fn parse_signature_with(text: &str, keccak: &dyn Keccak) -> Result<Selector> {
    let SignatureDeclaration { name, inputs } = parser::parse_declaration(text)?;
    Ok(Selector::new(SelectorKind::Function, name, inputs).finalised(keccak))
}
