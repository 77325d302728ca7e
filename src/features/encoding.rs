//! One-hot encoding for team identity

use crate::{FootyError, Result};
use std::collections::BTreeSet;

/// One-hot encoder over a fixed set of categories
///
/// Categories are sorted, so the column order only depends on the set of values seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneHotEncoder {
    /// Name of the encoded column (e.g. "HomeTeam"), used in error messages
    name: String,
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Fit the encoder on every distinct value
    pub fn fit<'a>(name: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        let categories: BTreeSet<&str> = values.into_iter().collect();
        OneHotEncoder {
            name: name.to_string(),
            categories: categories.into_iter().map(String::from).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column labels, in encoding order
    pub fn columns(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Column index of a category, by exact name
    pub fn column_index(&self, category: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(category))
            .ok()
    }

    /// Encode a single category
    ///
    /// Unknown categories are an error rather than an all-zero row.
    pub fn encode(&self, category: &str) -> Result<Vec<f32>> {
        let index = self
            .column_index(category)
            .ok_or_else(|| FootyError::UnknownTeam {
                team: category.to_string(),
                table: self.name.clone(),
            })?;

        let mut row = vec![0.0f32; self.width()];
        row[index] = 1.0;
        Ok(row)
    }
}

/// An encoder together with the encoded rows it was fitted on
#[derive(Debug, Clone)]
pub struct OneHotTable {
    encoder: OneHotEncoder,
    rows: Vec<Vec<f32>>,
}

impl OneHotTable {
    /// Fit an encoder on `values` and encode each of them, one row per value
    pub fn from_values(name: &str, values: &[&str]) -> Result<Self> {
        let encoder = OneHotEncoder::fit(name, values.iter().copied());
        let rows = values
            .iter()
            .map(|v| encoder.encode(v))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Encoded {} rows of {} into {} columns",
            rows.len(),
            name,
            encoder.width()
        );

        Ok(OneHotTable { encoder, rows })
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.encoder.width()
    }
}
