//! Measurement visitation schedule.
//!
//! Lists, time step by time step, which physical register each logical
//! measurement channel lands on. The unroll engine emits measurements in
//! exactly this order, and the sample reshaper walks it to put raw outcomes
//! back on their channels.

use serde::Serialize;

use tdm_ir::{BandSpec, ModeId};

use crate::shift::{ModePermutation, ShiftPolicy};

/// One entry of the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduledMeasurement {
    /// Time step the measurement happens in.
    pub time_step: usize,
    /// Logical channel index, in rolled-circuit measurement order.
    pub channel: usize,
    /// Physical register measured.
    pub mode: ModeId,
}

/// Unbounded iterator over [`ScheduledMeasurement`]s.
///
/// Yields one entry per channel per time step, channels in order. Combine
/// with `take` to cut it to the number of recorded outcomes.
#[derive(Debug, Clone)]
pub struct MeasurementSchedule {
    channels: Vec<ModeId>,
    bands: BandSpec,
    policy: ShiftPolicy,
    permutation: ModePermutation,
    time_step: usize,
    next_channel: usize,
}

/// Build the schedule for the given logical measurement channels.
///
/// `channels` are the logical slots measured by the rolled circuit, in
/// command order.
pub fn measurement_schedule(
    channels: &[ModeId],
    bands: &BandSpec,
    policy: ShiftPolicy,
) -> MeasurementSchedule {
    MeasurementSchedule {
        channels: channels.to_vec(),
        bands: bands.clone(),
        policy,
        permutation: ModePermutation::identity(bands.concurrent_modes()),
        time_step: 0,
        next_channel: 0,
    }
}

impl MeasurementSchedule {
    /// Number of channels visited per time step.
    pub fn channels_per_step(&self) -> usize {
        self.channels.len()
    }
}

impl Iterator for MeasurementSchedule {
    type Item = ScheduledMeasurement;

    fn next(&mut self) -> Option<Self::Item> {
        if self.channels.is_empty() {
            return None;
        }
        let channel = self.next_channel;
        let entry = ScheduledMeasurement {
            time_step: self.time_step,
            channel,
            mode: self.permutation.apply(self.channels[channel]),
        };

        self.next_channel += 1;
        if self.next_channel == self.channels.len() {
            self.next_channel = 0;
            self.time_step += 1;
            self.permutation.advance(self.policy, &self.bands);
        }
        Some(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visited(schedule: MeasurementSchedule, n: usize) -> Vec<u32> {
        schedule.take(n).map(|m| m.mode.0).collect()
    }

    #[test]
    fn test_single_band_alternates() {
        let bands = BandSpec::single(2).unwrap();
        let schedule = measurement_schedule(&[ModeId(0)], &bands, ShiftPolicy::Default);
        assert_eq!(visited(schedule, 5), vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_bands_interleave() {
        let bands = BandSpec::new(vec![1, 2]).unwrap();
        let schedule =
            measurement_schedule(&[ModeId(0), ModeId(1)], &bands, ShiftPolicy::Default);
        let entries: Vec<_> = schedule.take(4).collect();
        assert_eq!(
            entries.iter().map(|m| m.mode.0).collect::<Vec<_>>(),
            vec![0, 1, 0, 2]
        );
        assert_eq!(
            entries.iter().map(|m| (m.time_step, m.channel)).collect::<Vec<_>>(),
            vec![(0, 0), (0, 1), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn test_measured_slot_need_not_lead_its_band() {
        let bands = BandSpec::single(3).unwrap();
        let schedule = measurement_schedule(&[ModeId(2)], &bands, ShiftPolicy::Default);
        assert_eq!(visited(schedule, 4), vec![2, 0, 1, 2]);
    }

    #[test]
    fn test_no_channels_is_empty() {
        let bands = BandSpec::single(2).unwrap();
        assert_eq!(
            measurement_schedule(&[], &bands, ShiftPolicy::Default).next(),
            None
        );
    }

    proptest! {
        #[test]
        fn schedule_follows_permutation(
            sizes in prop::collection::vec(1u32..5, 1..4),
            shift in -4i64..5,
            len in 0usize..60,
        ) {
            let bands = BandSpec::new(sizes).unwrap();
            let channels: Vec<ModeId> = bands.slices().iter().map(|r| ModeId::from(r.start)).collect();
            let policy = ShiftPolicy::By(shift);
            for entry in measurement_schedule(&channels, &bands, policy).take(len) {
                let perm = ModePermutation::at_step(entry.time_step, policy, &bands);
                prop_assert_eq!(entry.mode, perm.apply(channels[entry.channel]));
            }
        }
    }
}
