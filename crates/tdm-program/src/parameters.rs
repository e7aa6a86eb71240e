//! Per-time-bin parameter table.

use serde::Serialize;
use std::collections::BTreeMap;

use tdm_ir::{Argument, PlaceholderId};

use crate::error::{ProgramError, ProgramResult};

/// Value sequences bound to the placeholders `p0, p1, ...`.
///
/// Sequence `i` belongs to `PlaceholderId(i)`. All sequences have the same
/// length, which is the number of time bins in one period of the program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterTable {
    sequences: Vec<Vec<f64>>,
}

impl ParameterTable {
    /// Bind one placeholder per sequence, in order.
    pub fn new(sequences: Vec<Vec<f64>>) -> ProgramResult<Self> {
        let Some(first) = sequences.first() else {
            return Err(ProgramError::EmptyParameters);
        };
        if sequences.iter().any(|s| s.len() != first.len()) {
            return Err(ProgramError::StructuralMismatch {
                lengths: sequences.iter().map(Vec::len).collect(),
            });
        }
        if first.is_empty() {
            return Err(ProgramError::EmptyParameters);
        }
        Ok(Self { sequences })
    }

    /// Number of bound placeholders.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Check if no placeholder is bound.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of time bins per period.
    pub fn time_bins(&self) -> usize {
        self.sequences.first().map_or(0, Vec::len)
    }

    /// The bound placeholders, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = PlaceholderId> + '_ {
        (0..self.sequences.len()).map(|i| PlaceholderId(i as u32))
    }

    /// Sequence bound to `id`, if any.
    pub fn get(&self, id: PlaceholderId) -> Option<&[f64]> {
        self.sequences.get(id.index()).map(Vec::as_slice)
    }

    /// Sequence bound to `id`.
    pub fn sequence(&self, id: PlaceholderId) -> ProgramResult<&[f64]> {
        self.get(id).ok_or_else(|| ProgramError::UnknownPlaceholder {
            placeholder: id,
            bound: self.sequences.len(),
        })
    }

    /// Value of `id` at `time_step`; the sequence repeats every period.
    pub fn value_at(&self, id: PlaceholderId, time_step: usize) -> ProgramResult<f64> {
        let seq = self.sequence(id)?;
        Ok(seq[time_step % seq.len()])
    }

    /// Resolve an argument to its value at `time_step`.
    pub fn resolve(&self, arg: Argument, time_step: usize) -> ProgramResult<f64> {
        match arg {
            Argument::Concrete(v) => Ok(v),
            Argument::Symbolic(id) => self.value_at(id, time_step),
        }
    }

    /// Iterate over `(placeholder, sequence)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlaceholderId, &[f64])> + '_ {
        self.placeholders().zip(self.sequences.iter().map(Vec::as_slice))
    }

    /// The table keyed by placeholder name: `{"p0": [...], "p1": [...]}`.
    pub fn named(&self) -> BTreeMap<String, Vec<f64>> {
        self.iter()
            .map(|(id, seq)| (id.name(), seq.to_vec()))
            .collect()
    }
}
