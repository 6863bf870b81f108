//! Adjacency list input.
//!
//! The list arrives as a nested list literal such as `[[1,2],[0],[]]`. It is parsed with a
//! strict JSON parser; anything that is not a list of lists of integers is rejected.

use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Outgoing edges per vertex, in input order.
///
/// Targets are kept as signed integers so that `[[-1]]` surfaces as an out-of-range edge
/// rather than as a syntax error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyList {
    rows: Vec<Vec<i64>>,
}

impl AdjacencyList {
    pub fn new(rows: Vec<Vec<i64>>) -> Self {
        Self { rows }
    }

    pub fn parse(literal: &str) -> Result<Self> {
        let trimmed = literal.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidLiteral {
                message: "input is empty".to_string(),
            });
        }
        serde_json::from_str::<Self>(trimmed).map_err(|err| Error::InvalidLiteral {
            message: err.to_string(),
        })
    }

    /// Number of rows in the literal. This may differ from the declared graph size.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// `(source, target)` pairs in row order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, i64)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(source, targets)| targets.iter().map(move |&target| (source, target)))
    }
}

impl FromStr for AdjacencyList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
