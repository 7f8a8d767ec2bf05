use thiserror::Error;

/// Reasons a counter could not be constructed from its input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("unsupported input: cannot count a value of shape '{0}'")]
    UnsupportedInput(&'static str),
}

impl CounterError {
    pub(crate) fn map_element_not_int() -> Self {
        Self::TypeMismatch("map element must be of type 'int'".to_string())
    }
}
