#![forbid(unsafe_code)]

pub mod cli;
pub mod counter;
pub mod element;
pub mod error;
pub mod normalize;
pub mod output;
pub mod report;
pub mod settings;

pub use crate::{
    counter::Counter,
    element::Element,
    error::CounterError,
    normalize::{Normalize, Normalized, Shape},
};
