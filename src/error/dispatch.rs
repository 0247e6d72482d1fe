//! This module contains the error type that pertains to looking selectors up
//! by their identifiers and decoding event logs.

use thiserror::Error;

/// Errors that occur while matching call data or log topics against a set of
/// selectors.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("The input is too short to contain a 4-byte method identifier")]
    MissingMethodId,

    #[error("No selector matches the method identifier 0x{}", hex::encode(.0))]
    NoSelectorMatch([u8; 4]),

    #[error("No event selector matches the topic 0x{}", hex::encode(.0))]
    NoEventMatch([u8; 32]),

    #[error("The selector does not describe an event")]
    NotAnEvent,

    #[error("The event declares {expected} indexed inputs but {actual} topics were provided")]
    TopicCountMismatch { expected: usize, actual: usize },
}

/// The result type for functions that may return dispatch errors.
pub type Result<T> = std::result::Result<T, Error>;
