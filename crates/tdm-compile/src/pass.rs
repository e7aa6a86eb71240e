//! Pass trait for device compilation.

use tdm_program::TdmProgram;

use crate::error::CompileResult;
use crate::property::PropertySet;

/// A compilation pass over a constructed program.
///
/// Device compilation only validates: passes read the program, never modify
/// it, and record what they checked in the `PropertySet`.
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Run the pass.
    fn run(&self, program: &TdmProgram, properties: &mut PropertySet) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _program: &TdmProgram, _properties: &PropertySet) -> bool {
        true
    }
}
