use crate::{counter::Counter, element::Element};
use std::cmp::Reverse;
use serde::{Deserialize, Serialize};

/// Summary of a counter as written by the command line front end.
///
/// `counts` holds `[element, count]` pairs. Without a `top` limit they are
/// ordered by element; with one, by descending count with ties ordered by
/// element.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CountReport {
    total: i64,
    distinct: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    top: Option<usize>,
    counts: Vec<(Element, i64)>,
}

impl CountReport {
    pub fn from_counter(counter: &Counter<Element>, top: Option<usize>) -> Self {
        let mut counts: Vec<(Element, i64)> = counter.iter()
            .map(|(element, &count)| (element.clone(), count))
            .collect();
        if let Some(n) = top {
            counts.sort_unstable_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
            counts.truncate(n);
        } else {
            counts.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        }
        Self {
            total: counter.total(),
            distinct: counter.len(),
            top,
            counts,
        }
    }

    #[inline]
    pub fn total(&self) -> i64 {
        self.total
    }

    #[inline]
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    #[inline]
    pub fn top(&self) -> Option<usize> {
        self.top
    }

    #[inline]
    pub fn counts(&self) -> &[(Element, i64)] {
        &self.counts
    }

    /// Count recorded for `element`, if it is part of the report.
    pub fn get(&self, element: &Element) -> Option<i64> {
        self.counts.iter().find(|(e, _)| e == element).map(|&(_, count)| count)
    }
}
