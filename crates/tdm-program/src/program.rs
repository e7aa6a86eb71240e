//! The time-domain program.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument};

use tdm_ir::{BandSpec, Circuit, ModeId};

use crate::builder::TdmBuilder;
use crate::error::{ProgramError, ProgramResult};
use crate::parameters::ParameterTable;
use crate::samples::{ReshapedSamples, reshape_samples};
use crate::schedule::{MeasurementSchedule, measurement_schedule};
use crate::shift::ShiftPolicy;
use crate::unroll::{UnrolledCircuit, unroll_circuit};

/// Which circuit view of a program is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CircuitView {
    /// The one-period circuit as constructed.
    #[default]
    Rolled,
    /// The full timeline.
    Unrolled,
}

/// State frozen by a successful [`TdmProgram::end`].
#[derive(Debug, Clone)]
struct Frozen {
    parameters: ParameterTable,
    copies: usize,
    shift: ShiftPolicy,
    rolled: Circuit,
    measured_modes: Vec<ModeId>,
}

/// A photonic program in the time-domain encoding.
///
/// One period of the program is written once against a fixed pool of
/// `sum(N)` registers; every time bin replays it with that bin's parameter
/// values after shifting the pool.
///
/// ```rust
/// use tdm_ir::BandSpec;
/// use tdm_program::{ShiftPolicy, TdmProgram};
///
/// let mut prog = TdmProgram::new(BandSpec::single(2).unwrap());
/// let mut b = prog
///     .begin(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 3, ShiftPolicy::Default)
///     .unwrap();
/// let (p, q) = (b.params(), b.register());
/// b.sgate(0.7, 0.0, q[1]).unwrap();
/// b.bsgate(p[0], 0.0, q[0], q[1]).unwrap();
/// b.measure_homodyne(p[1], q[0]).unwrap();
/// prog.end(b).unwrap();
///
/// assert_eq!(prog.time_bins(), 2);
/// assert_eq!(prog.total_time_bins(), 6);
/// assert_eq!(prog.unroll().unwrap().circuit().map(|c| c.len()), Some(18));
/// ```
#[derive(Debug, Clone)]
pub struct TdmProgram {
    name: String,
    bands: BandSpec,
    frozen: Option<Frozen>,
    unrolled: Option<UnrolledCircuit>,
    view: CircuitView,
}

impl TdmProgram {
    /// Create an empty program over the given bands.
    pub fn new(bands: BandSpec) -> Self {
        Self {
            name: "tdm_program".into(),
            bands,
            frozen: None,
            unrolled: None,
            view: CircuitView::Rolled,
        }
    }

    /// Set the program name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Program name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start construction.
    ///
    /// Binds one placeholder per sequence, in order. All sequences must have
    /// the same length and `copies` must be positive.
    #[instrument(skip(self, sequences), fields(program = %self.name, sequences = sequences.len()))]
    pub fn begin(
        &self,
        sequences: Vec<Vec<f64>>,
        copies: i64,
        shift: ShiftPolicy,
    ) -> ProgramResult<TdmBuilder> {
        if self.frozen.is_some() {
            return Err(ProgramError::AlreadyBuilt(self.name.clone()));
        }
        let parameters = ParameterTable::new(sequences)?;
        let copies = usize::try_from(copies)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(ProgramError::InvalidRepeatCount(copies))?;

        debug!(time_bins = parameters.time_bins(), "Bound parameter sequences");
        Ok(TdmBuilder::new(
            self.bands.clone(),
            parameters,
            copies,
            shift,
        ))
    }

    /// Finish construction and freeze the rolled circuit.
    #[instrument(skip(self, builder), fields(program = %self.name))]
    pub fn end(&mut self, builder: TdmBuilder) -> ProgramResult<&Circuit> {
        if self.frozen.is_some() {
            return Err(ProgramError::AlreadyBuilt(self.name.clone()));
        }
        if builder.bands() != &self.bands {
            return Err(ProgramError::BandMismatch {
                builder: builder.bands().sizes().to_vec(),
                program: self.bands.sizes().to_vec(),
            });
        }
        let (parameters, copies, shift, rolled) = builder.into_parts();

        let measured_modes = rolled.measured_modes();
        if measured_modes.is_empty() {
            return Err(ProgramError::MissingMeasurement);
        }
        if measured_modes.len() != self.bands.num_bands() {
            return Err(ProgramError::MeasurementCountMismatch {
                measurements: measured_modes.len(),
                bands: self.bands.num_bands(),
            });
        }

        info!(
            commands = rolled.len(),
            time_bins = parameters.time_bins(),
            copies,
            "Program constructed"
        );
        self.view = CircuitView::Rolled;
        self.unrolled = None;
        let frozen = self.frozen.insert(Frozen {
            parameters,
            copies,
            shift,
            rolled,
            measured_modes,
        });
        Ok(&frozen.rolled)
    }

    fn frozen(&self) -> ProgramResult<&Frozen> {
        self.frozen
            .as_ref()
            .ok_or_else(|| ProgramError::NotBuilt(self.name.clone()))
    }

    /// Check if construction has finished.
    pub fn is_built(&self) -> bool {
        self.frozen.is_some()
    }

    /// Activate the rolled view.
    pub fn roll(&mut self) -> ProgramResult<&mut Self> {
        self.frozen()?;
        self.view = CircuitView::Rolled;
        Ok(self)
    }

    /// Activate the unrolled view, computing it on first use.
    pub fn unroll(&mut self) -> ProgramResult<&mut Self> {
        let frozen = self.frozen()?;
        if self.unrolled.is_none() {
            let unrolled = unroll_circuit(
                &frozen.rolled,
                &frozen.parameters,
                &self.bands,
                frozen.shift,
                frozen.parameters.time_bins() * frozen.copies,
            )?;
            self.unrolled = Some(unrolled);
        } else {
            debug!(program = %self.name, "Using cached unrolled circuit");
        }
        self.view = CircuitView::Unrolled;
        Ok(self)
    }

    /// The active view.
    pub fn view(&self) -> CircuitView {
        self.view
    }

    /// The circuit of the active view; `None` before construction finished.
    pub fn circuit(&self) -> Option<&Circuit> {
        match self.view {
            CircuitView::Rolled => self.rolled_circuit(),
            CircuitView::Unrolled => self.unrolled_circuit(),
        }
    }

    /// The rolled circuit.
    pub fn rolled_circuit(&self) -> Option<&Circuit> {
        self.frozen.as_ref().map(|f| &f.rolled)
    }

    /// The unrolled circuit, if it has been computed.
    pub fn unrolled_circuit(&self) -> Option<&Circuit> {
        self.unrolled.as_ref().map(|u| &u.circuit)
    }

    /// Physical registers measured anywhere in the unrolled circuit.
    pub fn measured_physical_modes(&self) -> Option<&BTreeSet<ModeId>> {
        self.unrolled.as_ref().map(|u| &u.measured_modes)
    }

    /// Band spec.
    pub fn bands(&self) -> &BandSpec {
        &self.bands
    }

    /// Number of concurrent modes (register pool size).
    pub fn concurrent_modes(&self) -> u32 {
        self.bands.concurrent_modes()
    }

    /// Number of spatial modes; 0 before construction finished.
    pub fn spatial_modes(&self) -> usize {
        self.frozen.as_ref().map_or(0, |f| f.measured_modes.len())
    }

    /// Time bins per period; 0 before construction finished.
    pub fn time_bins(&self) -> usize {
        self.frozen.as_ref().map_or(0, |f| f.parameters.time_bins())
    }

    /// Time bins over all copies; 0 before construction finished.
    pub fn total_time_bins(&self) -> usize {
        self.frozen
            .as_ref()
            .map_or(0, |f| f.parameters.time_bins() * f.copies)
    }

    /// Number of copies; 0 before construction finished.
    pub fn copies(&self) -> usize {
        self.frozen.as_ref().map_or(0, |f| f.copies)
    }

    /// Shift policy; `None` before construction finished.
    pub fn shift(&self) -> Option<ShiftPolicy> {
        self.frozen.as_ref().map(|f| f.shift)
    }

    /// The parameter table; `None` before construction finished.
    pub fn parameters(&self) -> Option<&ParameterTable> {
        self.frozen.as_ref().map(|f| &f.parameters)
    }

    /// Logical measured registers in rolled-circuit order, one per band.
    pub fn measured_modes(&self) -> &[ModeId] {
        self.frozen
            .as_ref()
            .map_or(&[][..], |f| f.measured_modes.as_slice())
    }

    /// The register pool.
    pub fn register(&self) -> Vec<ModeId> {
        tdm_ir::register_pool(self.concurrent_modes())
    }

    /// Measurement visitation schedule of this program.
    pub fn schedule(&self) -> ProgramResult<MeasurementSchedule> {
        let frozen = self.frozen()?;
        Ok(measurement_schedule(
            &frozen.measured_modes,
            &self.bands,
            frozen.shift,
        ))
    }

    /// Regroup raw per-register outcomes by logical channel.
    #[instrument(skip(self, raw), fields(program = %self.name))]
    pub fn reshape_samples<T>(
        &self,
        raw: BTreeMap<ModeId, Vec<T>>,
    ) -> ProgramResult<ReshapedSamples<T>> {
        let schedule = self.schedule()?;
        reshape_samples(raw, self.measured_modes(), schedule)
    }
}

impl fmt::Display for TdmProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<TDMProgram: concurrent modes={}, time bins={}, spatial modes={}>",
            self.concurrent_modes(),
            self.total_time_bins(),
            self.spatial_modes()
        )
    }
}
