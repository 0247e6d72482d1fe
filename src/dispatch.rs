//! This module contains the lookup operations that match call data and log
//! topics back to selectors, and the event decoder that builds on them.

use crate::{
    codec::decoder,
    constant::{METHOD_ID_SIZE_BYTES, TOPIC_SIZE_BYTES},
    error,
    error::dispatch::{Error, Result},
    selector::{Direction, Selector, SelectorId, SelectorKind},
    types::AbiType,
    value::AbiValue,
};

/// A single decoded event input, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedEventParameter {
    /// The declared input name; empty when the declaration was unnamed.
    pub name: String,

    /// The declared input type.
    pub tp: AbiType,

    /// Whether the input was indexed into a topic rather than the data blob.
    pub indexed: bool,

    /// The recovered value.
    pub value: EventValue,
}

/// The value recovered for a single event input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EventValue {
    /// A fully decoded value.
    Plain(AbiValue),

    /// The topic word of an indexed dynamic input.
    ///
    /// Indexed values of dynamic type are stored on-chain as the keccak hash
    /// of their encoding, so the original value is unrecoverable; the hash is
    /// handed back verbatim instead.
    OpaqueHash([u8; TOPIC_SIZE_BYTES]),
}

/// Finds the first selector whose 4-byte method identifier matches the start
/// of `data`.
///
/// # Errors
///
/// When `data` holds fewer than 4 bytes, or no selector matches.
pub fn find_by_method_id<'a>(selectors: &'a [Selector], data: &[u8]) -> Result<&'a Selector> {
    let Some(id) = data.get(..METHOD_ID_SIZE_BYTES) else {
        return Err(Error::MissingMethodId);
    };
    let id: [u8; METHOD_ID_SIZE_BYTES] =
        id.try_into().expect("A 4-byte slice converts to a 4-byte array");

    selectors
        .iter()
        .find(|selector| selector.method_id() == Some(id))
        .ok_or(Error::NoSelectorMatch(id))
}

/// Finds the matching selector for `data` and decodes the remainder of the
/// input against its declared inputs.
///
/// # Errors
///
/// When no selector matches, or the matched selector's inputs do not decode
/// from the data.
pub fn find_and_decode<'a>(
    selectors: &'a [Selector],
    data: &[u8],
) -> error::Result<(&'a Selector, Vec<AbiValue>)> {
    let selector = find_by_method_id(selectors, data)?;
    let values = selector.decode(data, Direction::Input)?;

    Ok((selector, values))
}

/// Finds the event selector whose topic identifier equals `topic0` and whose
/// number of indexed inputs equals the number of topics present in `topics`.
///
/// Two events can share a signature, and hence a `topic0`, while indexing
/// different inputs; counting the provided topics is what tells them apart.
///
/// # Errors
///
/// When no event selector matches both the topic and the indexed count.
pub fn find_event<'a>(
    selectors: &'a [Selector],
    topic0: [u8; TOPIC_SIZE_BYTES],
    topics: &[Option<[u8; TOPIC_SIZE_BYTES]>],
) -> Result<&'a Selector> {
    let provided = topics.iter().flatten().count();

    selectors
        .iter()
        .find(|selector| {
            selector.kind == SelectorKind::Event
                && selector.id == Some(SelectorId::Topic(topic0))
                && selector.indexed_count() == provided
        })
        .ok_or(Error::NoEventMatch(topic0))
}

/// Decodes a log against an event selector: `topics` carries the indexed
/// parameter topics (`topic1` onwards, in order) and `data` the blob holding
/// the unindexed inputs as a flat sequence.
///
/// Indexed inputs of static type decode from their topic word; indexed
/// inputs of dynamic type come back as [`EventValue::OpaqueHash`].
///
/// # Errors
///
/// When the selector is not an event, the topic count does not match the
/// declared indexed inputs, or the data blob does not decode.
pub fn decode_event(
    selector: &Selector,
    topics: &[[u8; TOPIC_SIZE_BYTES]],
    data: &[u8],
) -> error::Result<Vec<DecodedEventParameter>> {
    let Some(indexed) = selector.indexed.as_ref() else {
        return Err(Error::NotAnEvent.into());
    };

    let expected = selector.indexed_count();
    if topics.len() != expected {
        return Err(Error::TopicCountMismatch {
            expected,
            actual: topics.len(),
        }
        .into());
    }

    let unindexed_types: Vec<AbiType> = selector
        .inputs
        .iter()
        .zip(indexed)
        .filter(|(_, indexed)| !**indexed)
        .map(|(tp, _)| tp.clone())
        .collect();
    let mut unindexed_values = decoder::decode_sequence(&unindexed_types, data)?.into_iter();

    let mut next_topic = topics.iter();
    let mut parameters = Vec::with_capacity(selector.inputs.len());

    for (position, (tp, is_indexed)) in selector.inputs.iter().zip(indexed).enumerate() {
        let value = if *is_indexed {
            let topic = next_topic.next().expect("The topic count was checked above");
            if tp.is_dynamic() {
                EventValue::OpaqueHash(*topic)
            } else {
                let decoded =
                    decoder::decode_sequence(std::slice::from_ref(tp), topic)?.remove(0);
                EventValue::Plain(decoded)
            }
        } else {
            EventValue::Plain(
                unindexed_values
                    .next()
                    .expect("The unindexed sequence decoded one value per type"),
            )
        };

        parameters.push(DecodedEventParameter {
            name: selector.input_names.get(position).cloned().unwrap_or_default(),
            tp: tp.clone(),
            indexed: *is_indexed,
            value,
        });
    }

    Ok(parameters)
}
