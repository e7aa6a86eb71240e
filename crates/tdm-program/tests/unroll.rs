//! Integration tests for the roll/unroll engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tdm_ir::{BandSpec, ModeId, Operation};
use tdm_program::{CircuitView, ShiftPolicy, TdmProgram};

/// Two-mode loop: `Sgate(0.7, 0) | q[1]; BSgate(p0) | (q[0], q[1]); MeasureHomodyne(p1) | q[0]`.
fn two_mode_loop(sequences: Vec<Vec<f64>>, copies: i64, shift: ShiftPolicy) -> TdmProgram {
    let mut prog = TdmProgram::new(BandSpec::single(2).unwrap());
    let mut b = prog.begin(sequences, copies, shift).unwrap();
    let (p, q) = (b.params(), b.register());
    b.sgate(0.7, 0.0, q[1]).unwrap();
    b.bsgate(p[0], 0.0, q[0], q[1]).unwrap();
    b.measure_homodyne(p[1], q[0]).unwrap();
    prog.end(b).unwrap();
    prog
}

/// Single loop with `n` concurrent modes and three parameter sequences.
fn single_loop(n: u32, sequences: Vec<Vec<f64>>, shift: ShiftPolicy) -> TdmProgram {
    let mut prog = TdmProgram::new(BandSpec::single(n).unwrap());
    let mut b = prog.begin(sequences, 2, shift).unwrap();
    let (p, q) = (b.params(), b.register());
    let last = q[n as usize - 1];
    b.sgate(1.0, 0.0, last).unwrap();
    b.bsgate(p[0], 0.0, q[0], last).unwrap();
    b.rgate(p[1], last).unwrap();
    b.measure_homodyne(p[2], q[0]).unwrap();
    prog.end(b).unwrap();
    prog
}

#[test]
fn test_shifted_register_listing() {
    let mut prog = two_mode_loop(
        vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        1,
        ShiftPolicy::Default,
    );
    prog.unroll().unwrap();

    let expected = "Sgate(0.7, 0) | (q[1])\n\
                    BSgate(1, 0) | (q[0], q[1])\n\
                    MeasureHomodyne(3) | (q[0])\n\
                    Sgate(0.7, 0) | (q[0])\n\
                    BSgate(2, 0) | (q[1], q[0])\n\
                    MeasureHomodyne(4) | (q[1])\n";
    assert_eq!(prog.circuit().unwrap().to_string(), expected);
}

#[test]
fn test_parameters_repeat_across_copies() {
    let mut prog = two_mode_loop(
        vec![vec![1.0, 2.0], vec![3.0, 4.0]],
        3,
        ShiftPolicy::Default,
    );
    prog.unroll().unwrap();
    let circuit = prog.circuit().unwrap();
    assert_eq!(circuit.len(), 3 * 2 * 3);

    let phis: Vec<f64> = circuit
        .iter()
        .filter(|cmd| cmd.op() == Operation::MeasureHomodyne)
        .filter_map(|cmd| cmd.args()[0].as_f64())
        .collect();
    assert_eq!(phis, vec![3.0, 4.0, 3.0, 4.0, 3.0, 4.0]);
}

#[test]
fn test_unroll_is_cached() {
    let mut prog = two_mode_loop(vec![vec![0.1, 0.2], vec![0.3, 0.4]], 2, ShiftPolicy::Default);
    prog.unroll().unwrap();
    let first = prog.circuit().unwrap() as *const _;
    let snapshot = prog.circuit().unwrap().clone();

    prog.unroll().unwrap();
    assert!(std::ptr::eq(first, prog.circuit().unwrap()));
    assert_eq!(prog.circuit(), Some(&snapshot));
}

#[test]
fn test_roll_restores_rolled_circuit() {
    let mut prog = two_mode_loop(vec![vec![0.1, 0.2], vec![0.3, 0.4]], 2, ShiftPolicy::Default);
    let rolled = prog.circuit().unwrap().clone();

    prog.unroll().unwrap();
    assert_eq!(prog.view(), CircuitView::Unrolled);
    assert_ne!(prog.circuit(), Some(&rolled));

    prog.roll().unwrap();
    assert_eq!(prog.view(), CircuitView::Rolled);
    assert_eq!(prog.circuit(), Some(&rolled));
    assert!(prog.unrolled_circuit().is_some());
}

#[test]
fn test_default_shift_equals_shift_by_one_for_single_band() {
    let mut rng = StdRng::seed_from_u64(42);
    let sequences: Vec<Vec<f64>> = (0..3)
        .map(|_| (0..4).map(|_| rng.gen_range(0.0..std::f64::consts::TAU)).collect())
        .collect();

    let mut by_default = single_loop(3, sequences.clone(), ShiftPolicy::Default);
    let mut by_one = single_loop(3, sequences, ShiftPolicy::By(1));
    by_default.unroll().unwrap();
    by_one.unroll().unwrap();

    assert_eq!(by_default.circuit(), by_one.circuit());
    assert_eq!(
        by_default.measured_physical_modes(),
        by_one.measured_physical_modes()
    );
}

#[test]
fn test_shift_by_register_count_is_identity() {
    let mut prog = single_loop(3, vec![vec![0.5, 0.6]; 3], ShiftPolicy::By(3));
    prog.unroll().unwrap();
    let measured: Vec<ModeId> = prog
        .measured_physical_modes()
        .unwrap()
        .iter()
        .copied()
        .collect();
    assert_eq!(measured, vec![ModeId(0)]);
}

#[test]
fn test_negative_shift_rotates_right() {
    let mut prog = single_loop(3, vec![vec![0.5, 0.6]; 3], ShiftPolicy::By(-1));
    prog.unroll().unwrap();
    let measured: Vec<ModeId> = prog
        .circuit()
        .unwrap()
        .iter()
        .filter(|cmd| cmd.is_measurement())
        .map(|cmd| cmd.modes()[0])
        .collect();
    assert_eq!(measured, vec![ModeId(0), ModeId(2), ModeId(1), ModeId(0)]);
}

#[test]
fn test_default_shift_stays_within_bands() {
    let bands = BandSpec::new(vec![1, 3]).unwrap();
    let mut prog = TdmProgram::new(bands.clone());
    let mut b = prog
        .begin(vec![vec![0.0, 0.1, 0.2]], 2, ShiftPolicy::Default)
        .unwrap();
    let (p, q) = (b.params(), b.register());
    b.bsgate(p[0], 0.0, q[0], q[1]).unwrap();
    b.measure_homodyne(0.0, q[0]).unwrap();
    b.measure_homodyne(0.0, q[1]).unwrap();
    prog.end(b).unwrap();
    prog.unroll().unwrap();

    for (i, cmd) in prog.circuit().unwrap().iter().enumerate() {
        match i % 3 {
            1 => assert_eq!(bands.band_of(cmd.modes()[0]), Some(0)),
            2 => assert_eq!(bands.band_of(cmd.modes()[0]), Some(1)),
            _ => {}
        }
    }
    let measured = prog.measured_physical_modes().unwrap();
    assert_eq!(measured.len(), 4);
}

#[test]
fn test_schedule_matches_emitted_measurements() {
    let bands = BandSpec::new(vec![2, 3]).unwrap();
    for shift in [ShiftPolicy::Default, ShiftPolicy::By(2), ShiftPolicy::By(-3)] {
        let mut prog = TdmProgram::new(bands.clone());
        let mut b = prog.begin(vec![vec![0.3; 5]], 2, shift).unwrap();
        let (p, q) = (b.params(), b.register());
        b.bsgate(p[0], 0.0, q[1], q[2]).unwrap();
        b.measure_homodyne(p[0], q[1]).unwrap();
        b.measure_threshold([q[3]]).unwrap();
        prog.end(b).unwrap();

        let schedule: Vec<ModeId> = prog
            .schedule()
            .unwrap()
            .take(prog.total_time_bins() * prog.spatial_modes())
            .map(|m| m.mode)
            .collect();

        prog.unroll().unwrap();
        let emitted: Vec<ModeId> = prog
            .circuit()
            .unwrap()
            .iter()
            .filter(|cmd| cmd.is_measurement())
            .flat_map(|cmd| cmd.modes().iter().copied())
            .collect();
        assert_eq!(schedule, emitted, "shift {shift}");
    }
}
