//! Classification of counter inputs into one of three shapes (text, sequence,
//! mapping) and their conversion into a [`Normalized`] form.
//!
//! Shape dispatch happens at compile time: every accepted input type
//! implements [`Normalize`]. Callers who want to pick the shape explicitly can
//! build a [`Shape`]; the only runtime dispatch lives in
//! [`crate::element`], for JSON values.

use crate::error::CounterError;
use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

/// Canonical intermediate form of a counter input: either the individual
/// occurrences still to be tallied, or counts to be adopted as they are.
#[derive(Clone, Debug)]
pub enum Normalized<T> {
    Elements(Vec<T>),
    Counts(HashMap<T, i64>),
}

impl<T> Normalized<T> {
    /// Number of occurrences for `Elements`, number of keys for `Counts`.
    pub fn len(&self) -> usize {
        match self {
            Self::Elements(elements) => elements.len(),
            Self::Counts(counts) => counts.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> &'static str {
        match self {
            Self::Elements(_) => "elements",
            Self::Counts(_) => "counts",
        }
    }
}

/// Conversion of an input value into a [`Normalized`] form with elements of
/// type `T`.
pub trait Normalize<T> {
    fn normalize(self) -> Result<Normalized<T>, CounterError>;
}

/// Explicitly tagged counter input.
#[derive(Clone, Debug)]
pub enum Shape<T> {
    Text(String),
    Sequence(Vec<T>),
    Mapping(HashMap<T, i64>),
}

/// Integral types accepted as the value type of a count mapping.
pub trait CountValue {
    /// The value as a signed count, or `None` if it does not fit in one.
    fn to_count(self) -> Option<i64>;
}

macro_rules! impl_count_value {
    ($($int:ty),*) => {
        $(
            impl CountValue for $int {
                #[inline]
                fn to_count(self) -> Option<i64> {
                    i64::try_from(self).ok()
                }
            }
        )*
    };
}

impl_count_value!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Splits text into its Unicode scalar values, each as a one-character string.
pub fn split_text<T: From<String>>(text: &str) -> Vec<T> {
    text.chars().map(|ch| T::from(ch.to_string())).collect()
}

/// Adopts precomputed counts, checking that every value fits a signed count.
pub fn adopt_counts<T, V, I>(pairs: I) -> Result<Normalized<T>, CounterError>
    where T: Eq + Hash, V: CountValue, I: IntoIterator<Item = (T, V)>
{
    let pairs = pairs.into_iter();
    let mut counts = HashMap::with_capacity(pairs.size_hint().0);
    for (key, value) in pairs {
        let count = value.to_count().ok_or_else(CounterError::map_element_not_int)?;
        counts.insert(key, count);
    }
    Ok(Normalized::Counts(counts))
}

impl<T> Normalize<T> for Normalized<T> {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        Ok(self)
    }
}

impl<T: From<String>> Normalize<T> for Shape<T> {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        match self {
            Self::Text(text) => Ok(Normalized::Elements(split_text(&text))),
            Self::Sequence(elements) => Ok(Normalized::Elements(elements)),
            Self::Mapping(counts) => Ok(Normalized::Counts(counts)),
        }
    }
}

impl<T: From<String>> Normalize<T> for &str {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        Ok(Normalized::Elements(split_text(self)))
    }
}

impl<T: From<String>> Normalize<T> for &String {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        self.as_str().normalize()
    }
}

impl<T: From<String>> Normalize<T> for String {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        self.as_str().normalize()
    }
}

impl<T> Normalize<T> for Vec<T> {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        Ok(Normalized::Elements(self))
    }
}

impl<T: Clone> Normalize<T> for &[T] {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        Ok(Normalized::Elements(self.to_vec()))
    }
}

impl<T, const N: usize> Normalize<T> for [T; N] {
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        Ok(Normalized::Elements(Vec::from(self)))
    }
}

impl<T, V, S> Normalize<T> for HashMap<T, V, S>
    where T: Eq + Hash, V: CountValue, S: BuildHasher
{
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        adopt_counts(self)
    }
}

impl<T, V, S> Normalize<T> for &HashMap<T, V, S>
    where T: Eq + Hash + Clone, V: CountValue + Copy, S: BuildHasher
{
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        adopt_counts(self.iter().map(|(key, &value)| (key.clone(), value)))
    }
}

impl<T, V> Normalize<T> for BTreeMap<T, V>
    where T: Eq + Hash, V: CountValue
{
    fn normalize(self) -> Result<Normalized<T>, CounterError> {
        adopt_counts(self)
    }
}
