//! Pass manager for orchestrating device compilation.

use tracing::{debug, info, instrument};

use tdm_hal::DeviceSpec;
use tdm_program::TdmProgram;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{GateSequenceCheck, ModeCapacityCheck, ModeWiringCheck, ParameterRangeCheck};
use crate::property::PropertySet;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given program.
    ///
    /// Stops at the first failing pass.
    #[instrument(skip(self, program, properties), fields(program = program.name()))]
    pub fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on program with {} time bins",
            self.passes.len(),
            program.time_bins()
        );

        for pass in &self.passes {
            if pass.should_run(program, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(program, properties)?;
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, operations checked: {}",
            properties.report.operations_checked
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the device compilation pipeline.
pub struct PassManagerBuilder {
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with no target device.
    pub fn new() -> Self {
        Self {
            properties: PropertySet::new(),
        }
    }

    /// Set the target device.
    #[must_use]
    pub fn with_device(mut self, device: DeviceSpec) -> Self {
        self.properties = self.properties.with_device(device);
        self
    }

    /// Build the pass manager and return it with the properties.
    ///
    /// Without a device the pipeline is empty.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.properties.device.is_some() {
            pm.add_pass(ModeCapacityCheck);
            pm.add_pass(GateSequenceCheck);
            pm.add_pass(ModeWiringCheck);
            pm.add_pass(ParameterRangeCheck);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdm_hal::ModeCapacity;

    #[test]
    fn test_builder_without_device() {
        let (pm, props) = PassManagerBuilder::new().build();
        assert!(pm.is_empty());
        assert!(props.device.is_none());
    }

    #[test]
    fn test_builder_with_device() {
        let (pm, props) = PassManagerBuilder::new()
            .with_device(DeviceSpec::new("tdm", ModeCapacity::new(2, 1, 100)))
            .build();
        assert_eq!(pm.len(), 4);
        assert_eq!(props.report.target, "tdm");
    }
}
