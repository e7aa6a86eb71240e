//! Roll/unroll engine.
//!
//! Expands the one-period rolled circuit into the full timeline: every time
//! step replays the rolled commands on the registers currently holding each
//! logical role, with symbolic arguments replaced by that step's values.

use std::collections::BTreeSet;
use tracing::{debug, instrument};

use tdm_ir::{Argument, BandSpec, Circuit, Command, ModeId};

use crate::error::ProgramResult;
use crate::parameters::ParameterTable;
use crate::shift::{ModePermutation, ShiftPolicy};

/// Result of unrolling a rolled circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnrolledCircuit {
    /// The expanded command sequence.
    pub circuit: Circuit,
    /// Every physical register that served as a measurement target.
    pub measured_modes: BTreeSet<ModeId>,
}

/// Unroll `rolled` over `total_time_bins` steps.
///
/// Within a step commands are emitted in rolled order; the register pool is
/// shifted once after the last command of each step.
#[instrument(skip_all, fields(commands = rolled.len(), total_time_bins = total_time_bins))]
pub fn unroll_circuit(
    rolled: &Circuit,
    parameters: &ParameterTable,
    bands: &BandSpec,
    shift: ShiftPolicy,
    total_time_bins: usize,
) -> ProgramResult<UnrolledCircuit> {
    let mut circuit = Circuit::with_capacity(rolled.len() * total_time_bins);
    let mut measured_modes = BTreeSet::new();
    let mut permutation = ModePermutation::identity(bands.concurrent_modes());

    for time_step in 0..total_time_bins {
        for cmd in rolled {
            let modes = permutation.map_modes(cmd.modes());
            let args = cmd
                .args()
                .iter()
                .map(|&arg| parameters.resolve(arg, time_step).map(Argument::Concrete))
                .collect::<ProgramResult<Vec<Argument>>>()?;

            if cmd.is_measurement() {
                measured_modes.extend(modes.iter().copied());
            }
            circuit.push(Command::new(cmd.op(), modes, args)?);
        }
        permutation.advance(shift, bands);
    }

    debug!(
        emitted = circuit.len(),
        measured_registers = measured_modes.len(),
        "Unrolled circuit"
    );
    Ok(UnrolledCircuit {
        circuit,
        measured_modes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdm_ir::Operation;

    fn loop_circuit() -> Circuit {
        [
            Command::new(Operation::Sgate, [ModeId(1)], [Argument::from(0.7)]).unwrap(),
            Command::new(
                Operation::BSgate,
                [ModeId(0), ModeId(1)],
                [Argument::symbolic(0)],
            )
            .unwrap(),
            Command::new(
                Operation::MeasureHomodyne,
                [ModeId(0)],
                [Argument::symbolic(1)],
            )
            .unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_step_count_and_resolution() {
        let params = ParameterTable::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let bands = BandSpec::single(2).unwrap();
        let unrolled =
            unroll_circuit(&loop_circuit(), &params, &bands, ShiftPolicy::Default, 4).unwrap();

        assert_eq!(unrolled.circuit.len(), 12);
        assert!(unrolled.circuit.iter().all(|cmd| !cmd.is_symbolic()));

        let thetas: Vec<f64> = unrolled
            .circuit
            .iter()
            .filter(|cmd| cmd.op() == Operation::BSgate)
            .filter_map(|cmd| cmd.args()[0].as_f64())
            .collect();
        assert_eq!(thetas, vec![1.0, 2.0, 1.0, 2.0]);
        assert_eq!(
            unrolled.measured_modes.into_iter().collect::<Vec<_>>(),
            vec![ModeId(0), ModeId(1)]
        );
    }

    #[test]
    fn test_zero_steps() {
        let params = ParameterTable::new(vec![vec![1.0], vec![3.0]]).unwrap();
        let bands = BandSpec::single(2).unwrap();
        let unrolled =
            unroll_circuit(&loop_circuit(), &params, &bands, ShiftPolicy::Default, 0).unwrap();
        assert!(unrolled.circuit.is_empty());
        assert!(unrolled.measured_modes.is_empty());
    }
}
