//! Integration tests for sample reshaping.

use std::collections::BTreeMap;

use tdm_ir::{BandSpec, ModeId};
use tdm_program::{ProgramError, ShiftPolicy, TdmProgram};

fn homodyne_loop(bands: BandSpec, shift: ShiftPolicy) -> TdmProgram {
    let measured: Vec<u32> = bands.slices().iter().map(|r| r.start as u32).collect();
    let mut prog = TdmProgram::new(bands);
    let mut b = prog.begin(vec![vec![0.0, 1.0, 2.0]], 2, shift).unwrap();
    let p = b.params();
    for m in measured {
        b.measure_homodyne(p[0], ModeId(m)).unwrap();
    }
    prog.end(b).unwrap();
    prog
}

/// Simulate a backend: record `(time_step, channel)` on the register each
/// emitted measurement targets.
fn fake_backend(prog: &mut TdmProgram) -> BTreeMap<ModeId, Vec<(usize, usize)>> {
    let per_step = prog.spatial_modes();
    prog.unroll().unwrap();
    let mut raw: BTreeMap<ModeId, Vec<(usize, usize)>> = BTreeMap::new();
    let measurements = prog
        .circuit()
        .unwrap()
        .iter()
        .filter(|cmd| cmd.is_measurement());
    for (i, cmd) in measurements.enumerate() {
        raw.entry(cmd.modes()[0])
            .or_default()
            .push((i / per_step, i % per_step));
    }
    raw
}

#[test]
fn test_reshaper_reproduces_unroll_order() {
    for shift in [ShiftPolicy::Default, ShiftPolicy::By(1), ShiftPolicy::By(-2)] {
        let mut prog = homodyne_loop(BandSpec::new(vec![2, 3]).unwrap(), shift);
        let raw = fake_backend(&mut prog);
        let reshaped = prog.reshape_samples(raw).unwrap();

        assert_eq!(reshaped.num_channels(), 2);
        for channel in 0..2 {
            let expected: Vec<(usize, usize)> = (0..6).map(|t| (t, channel)).collect();
            assert_eq!(reshaped.channel(channel), Some(expected.as_slice()));
        }
        assert_eq!(reshaped.register(ModeId(2)), reshaped.channel(1));
    }
}

#[test]
fn test_reshape_single_band() {
    let prog = homodyne_loop(BandSpec::single(2).unwrap(), ShiftPolicy::Default);
    let raw = BTreeMap::from([
        (ModeId(0), vec!['a', 'c', 'e']),
        (ModeId(1), vec!['b', 'd', 'f']),
    ]);
    let reshaped = prog.reshape_samples(raw).unwrap();
    assert_eq!(
        reshaped.into_register_map(),
        BTreeMap::from([(ModeId(0), vec!['a', 'b', 'c', 'd', 'e', 'f'])])
    );
}

#[test]
fn test_reshape_counts() {
    let prog = homodyne_loop(BandSpec::single(2).unwrap(), ShiftPolicy::Default);
    let raw = BTreeMap::from([(ModeId(0), vec![0u32, 2, 1]), (ModeId(1), vec![1u32, 0, 3])]);
    let reshaped = prog.reshape_samples(raw).unwrap();
    assert_eq!(reshaped.channel(0), Some(&[0u32, 1, 2, 0, 1, 3][..]));
}

#[test]
fn test_inconsistent_raw_data() {
    let prog = homodyne_loop(BandSpec::single(2).unwrap(), ShiftPolicy::Default);
    let raw = BTreeMap::from([(ModeId(0), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])]);
    let err = prog.reshape_samples(raw).unwrap_err();
    assert!(matches!(
        err,
        ProgramError::ReshapeInconsistency {
            mode: ModeId(1),
            ..
        }
    ));
}

#[test]
fn test_static_register_under_full_rotation() {
    let prog = homodyne_loop(BandSpec::single(2).unwrap(), ShiftPolicy::By(2));
    let raw = BTreeMap::from([(ModeId(0), vec![1.0, 2.0, 3.0])]);
    let reshaped = prog.reshape_samples(raw).unwrap();
    assert_eq!(reshaped.channel(0), Some(&[1.0, 2.0, 3.0][..]));
}

#[test]
fn test_reshape_requires_construction() {
    let prog = TdmProgram::new(BandSpec::single(2).unwrap());
    let err = prog
        .reshape_samples(BTreeMap::<ModeId, Vec<f64>>::new())
        .unwrap_err();
    assert!(matches!(err, ProgramError::NotBuilt(_)));
}
