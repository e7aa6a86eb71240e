//! Sample reshaping.
//!
//! Hardware and simulators report outcomes per physical register. Because
//! the measured role moves across the pool from one time bin to the next,
//! the outcomes of one logical channel end up spread over several registers.
//! Reshaping walks the measurement schedule and puts them back together.

use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use tracing::debug;

use tdm_ir::ModeId;

use crate::error::{ProgramError, ProgramResult};
use crate::schedule::MeasurementSchedule;

/// Outcomes of one logical measurement channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelSamples<T> {
    /// Logical register measured by the channel in the rolled circuit.
    pub register: ModeId,
    /// Outcomes in time order.
    pub values: Vec<T>,
}

/// Outcomes regrouped by logical channel, in band order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReshapedSamples<T> {
    channels: Vec<ChannelSamples<T>>,
}

impl<T> ReshapedSamples<T> {
    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Outcomes of channel `index`.
    pub fn channel(&self, index: usize) -> Option<&[T]> {
        self.channels.get(index).map(|c| c.values.as_slice())
    }

    /// Outcomes of the channel measuring logical `register`.
    pub fn register(&self, register: ModeId) -> Option<&[T]> {
        self.channels
            .iter()
            .find(|c| c.register == register)
            .map(|c| c.values.as_slice())
    }

    /// Iterate over channels in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChannelSamples<T>> {
        self.channels.iter()
    }

    /// Total number of outcomes across all channels.
    pub fn total(&self) -> usize {
        self.channels.iter().map(|c| c.values.len()).sum()
    }

    /// Outcomes keyed by logical register.
    pub fn into_register_map(self) -> BTreeMap<ModeId, Vec<T>> {
        self.channels
            .into_iter()
            .map(|c| (c.register, c.values))
            .collect()
    }
}

/// Redistribute raw per-register outcomes onto logical channels.
///
/// `raw` maps each physical register to its outcomes in the order they were
/// recorded. `channels` are the logical measured registers in rolled-circuit
/// order and `schedule` the matching visitation schedule. Every recorded
/// outcome is consumed exactly once; asking a register for more outcomes
/// than it recorded is an error.
pub fn reshape_samples<T>(
    raw: BTreeMap<ModeId, Vec<T>>,
    channels: &[ModeId],
    schedule: MeasurementSchedule,
) -> ProgramResult<ReshapedSamples<T>> {
    let recorded: BTreeMap<ModeId, usize> = raw.iter().map(|(&m, v)| (m, v.len())).collect();
    let total: usize = recorded.values().sum();

    let mut pending: BTreeMap<ModeId, VecDeque<T>> = raw
        .into_iter()
        .map(|(mode, values)| (mode, VecDeque::from(values)))
        .collect();
    let mut out: Vec<ChannelSamples<T>> = channels
        .iter()
        .map(|&register| ChannelSamples {
            register,
            values: Vec::new(),
        })
        .collect();
    let mut taken: BTreeMap<ModeId, usize> = BTreeMap::new();

    for entry in schedule.take(total) {
        let count = taken.entry(entry.mode).or_default();
        *count += 1;
        let value = pending
            .get_mut(&entry.mode)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| ProgramError::ReshapeInconsistency {
                mode: entry.mode,
                requested: *count,
                recorded: recorded.get(&entry.mode).copied().unwrap_or(0),
            })?;
        out[entry.channel].values.push(value);
    }

    debug!(outcomes = total, channels = out.len(), "Reshaped samples");
    Ok(ReshapedSamples { channels: out })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::measurement_schedule;
    use crate::shift::ShiftPolicy;
    use tdm_ir::BandSpec;

    fn raw(entries: &[(u32, &[char])]) -> BTreeMap<ModeId, Vec<char>> {
        entries
            .iter()
            .map(|(m, v)| (ModeId(*m), v.to_vec()))
            .collect()
    }

    #[test]
    fn test_single_band_interleaved_registers() {
        let bands = BandSpec::single(2).unwrap();
        let channels = [ModeId(0)];
        let schedule = measurement_schedule(&channels, &bands, ShiftPolicy::Default);

        let out = reshape_samples(
            raw(&[(0, &['a', 'c', 'e']), (1, &['b', 'd', 'f'])]),
            &channels,
            schedule,
        )
        .unwrap();
        assert_eq!(out.channel(0), Some(&['a', 'b', 'c', 'd', 'e', 'f'][..]));
        assert_eq!(out.register(ModeId(0)), out.channel(0));
    }

    #[test]
    fn test_identity_shift_keeps_register() {
        let bands = BandSpec::single(2).unwrap();
        let channels = [ModeId(0)];
        let schedule = measurement_schedule(&channels, &bands, ShiftPolicy::By(2));

        let out = reshape_samples(
            raw(&[(0, &['a', 'b', 'c', 'd', 'e', 'f'])]),
            &channels,
            schedule,
        )
        .unwrap();
        assert_eq!(out.channel(0), Some(&['a', 'b', 'c', 'd', 'e', 'f'][..]));
    }

    #[test]
    fn test_inconsistent_data() {
        let bands = BandSpec::single(2).unwrap();
        let channels = [ModeId(0)];
        let schedule = measurement_schedule(&channels, &bands, ShiftPolicy::Default);

        let err = reshape_samples(
            raw(&[(0, &['a', 'b', 'c', 'd', 'e', 'f'])]),
            &channels,
            schedule,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ProgramError::ReshapeInconsistency {
                mode: ModeId(1),
                requested: 1,
                recorded: 0
            }
        ));
    }

    #[test]
    fn test_two_bands() {
        let bands = BandSpec::new(vec![1, 2]).unwrap();
        let channels = [ModeId(0), ModeId(1)];
        let schedule = measurement_schedule(&channels, &bands, ShiftPolicy::Default);

        let out = reshape_samples(
            raw(&[(0, &['a', 'c']), (1, &['b']), (2, &['d'])]),
            &channels,
            schedule,
        )
        .unwrap();
        assert_eq!(out.channel(0), Some(&['a', 'c'][..]));
        assert_eq!(out.channel(1), Some(&['b', 'd'][..]));
        assert_eq!(out.total(), 4);
        let by_register = out.into_register_map();
        assert_eq!(by_register[&ModeId(1)], vec!['b', 'd']);
    }

    #[test]
    fn test_no_samples() {
        let bands = BandSpec::single(2).unwrap();
        let channels = [ModeId(0)];
        let schedule = measurement_schedule(&channels, &bands, ShiftPolicy::Default);
        let out = reshape_samples::<f64>(BTreeMap::new(), &channels, schedule).unwrap();
        assert_eq!(out.channel(0), Some(&[][..]));
    }
}
