use std::fmt::Formatter;

use thiserror::Error;

/// An error that is localised to a particular byte offset in the input text.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct Located<E>
where
    E: Clone,
{
    /// The byte offset in the input where the error occurred.
    pub location: u32,

    /// The error data
    pub payload: E,
}

/// Displays the error associated with the byte offset in the input text where
/// the error occurred.
impl<E> std::fmt::Display for Located<E>
where
    E: std::fmt::Display + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]: {}", self.location, self.payload)
    }
}

/// A trait for types that can have a byte-offset location attached to them.
pub trait Locatable
where
    Self: Sized,
{
    /// The return type with the attached byte-offset location.
    type Located;

    /// Attach the location described by `position` (a byte offset in the
    /// input text) to the error.
    fn locate(self, position: u32) -> Self::Located;
}

/// A blanket implementation that allows for attaching a location to any
/// result.
impl<T, E> Locatable for Result<T, E>
where
    E: std::error::Error + Clone,
{
    type Located = Result<T, Located<E>>;

    fn locate(self, position: u32) -> Self::Located {
        self.map_err(|e| Located {
            location: position,
            payload:  e,
        })
    }
}
