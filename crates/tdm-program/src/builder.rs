//! Construction-time builder for the rolled circuit.

use tdm_ir::{Argument, BandSpec, Circuit, Command, IrError, ModeId, Operation, PlaceholderId};

use crate::error::{ProgramError, ProgramResult};
use crate::parameters::ParameterTable;
use crate::shift::ShiftPolicy;

/// Collects the commands of one period of a time-domain program.
///
/// Obtained from [`TdmProgram::begin`](crate::TdmProgram::begin) and handed
/// back to [`TdmProgram::end`](crate::TdmProgram::end). Exposes the bound
/// placeholders (`p`) and the register pool (`q`).
#[derive(Debug, Clone)]
pub struct TdmBuilder {
    bands: BandSpec,
    parameters: ParameterTable,
    copies: usize,
    shift: ShiftPolicy,
    circuit: Circuit,
}

impl TdmBuilder {
    pub(crate) fn new(
        bands: BandSpec,
        parameters: ParameterTable,
        copies: usize,
        shift: ShiftPolicy,
    ) -> Self {
        Self {
            bands,
            parameters,
            copies,
            shift,
            circuit: Circuit::new(),
        }
    }

    /// Placeholder `p<i>` as an argument.
    pub fn p(&self, i: u32) -> ProgramResult<Argument> {
        let id = PlaceholderId(i);
        self.parameters.sequence(id)?;
        Ok(Argument::Symbolic(id))
    }

    /// All bound placeholders, in order.
    pub fn params(&self) -> Vec<Argument> {
        self.parameters.placeholders().map(Argument::Symbolic).collect()
    }

    /// Register `q[i]`. Range is checked when a command uses it.
    pub fn q(&self, i: u32) -> ModeId {
        ModeId(i)
    }

    /// The whole register pool.
    pub fn register(&self) -> Vec<ModeId> {
        tdm_ir::register_pool(self.bands.concurrent_modes())
    }

    /// Commands appended so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Append a command to the rolled circuit.
    pub fn append(
        &mut self,
        op: Operation,
        modes: impl IntoIterator<Item = ModeId>,
        args: impl IntoIterator<Item = Argument>,
    ) -> ProgramResult<&mut Self> {
        let command = Command::new(op, modes, args)?;

        let pool_size = self.bands.concurrent_modes();
        if let Some(&mode) = command.modes().iter().find(|m| m.0 >= pool_size) {
            return Err(IrError::ModeOutOfRange {
                mode,
                pool_size,
                op_name: Some(op.name().to_string()),
            }
            .into());
        }
        for placeholder in command.placeholders() {
            if self.parameters.get(placeholder).is_none() {
                return Err(ProgramError::UnknownPlaceholder {
                    placeholder,
                    bound: self.parameters.len(),
                });
            }
        }

        self.circuit.push(command);
        Ok(self)
    }

    /// Append a squeezing gate.
    pub fn sgate(
        &mut self,
        r: impl Into<Argument>,
        phi: impl Into<Argument>,
        mode: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::Sgate, [mode], [r.into(), phi.into()])
    }

    /// Append a displacement gate.
    pub fn dgate(
        &mut self,
        r: impl Into<Argument>,
        phi: impl Into<Argument>,
        mode: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::Dgate, [mode], [r.into(), phi.into()])
    }

    /// Append a rotation gate.
    pub fn rgate(&mut self, theta: impl Into<Argument>, mode: ModeId) -> ProgramResult<&mut Self> {
        self.append(Operation::Rgate, [mode], [theta.into()])
    }

    /// Append a beamsplitter.
    pub fn bsgate(
        &mut self,
        theta: impl Into<Argument>,
        phi: impl Into<Argument>,
        a: ModeId,
        b: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::BSgate, [a, b], [theta.into(), phi.into()])
    }

    /// Append a Mach-Zehnder interferometer.
    pub fn mzgate(
        &mut self,
        phi_in: impl Into<Argument>,
        phi_ex: impl Into<Argument>,
        a: ModeId,
        b: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::MZgate, [a, b], [phi_in.into(), phi_ex.into()])
    }

    /// Append a two-mode squeezing gate.
    pub fn s2gate(
        &mut self,
        r: impl Into<Argument>,
        phi: impl Into<Argument>,
        a: ModeId,
        b: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::S2gate, [a, b], [r.into(), phi.into()])
    }

    /// Append a homodyne measurement.
    pub fn measure_homodyne(
        &mut self,
        phi: impl Into<Argument>,
        mode: ModeId,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::MeasureHomodyne, [mode], [phi.into()])
    }

    /// Append a photon-number measurement.
    pub fn measure_fock(
        &mut self,
        modes: impl IntoIterator<Item = ModeId>,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::MeasureFock, modes, [])
    }

    /// Append a threshold detection.
    pub fn measure_threshold(
        &mut self,
        modes: impl IntoIterator<Item = ModeId>,
    ) -> ProgramResult<&mut Self> {
        self.append(Operation::MeasureThreshold, modes, [])
    }

    pub(crate) fn bands(&self) -> &BandSpec {
        &self.bands
    }

    pub(crate) fn into_parts(self) -> (ParameterTable, usize, ShiftPolicy, Circuit) {
        (self.parameters, self.copies, self.shift, self.circuit)
    }
}
