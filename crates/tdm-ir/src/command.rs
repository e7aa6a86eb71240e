//! Commands: an operation applied to registers with arguments.

use serde::Serialize;
use std::fmt;

use crate::argument::{Argument, PlaceholderId};
use crate::error::{IrError, IrResult};
use crate::mode::ModeId;
use crate::operation::Operation;

/// An operation paired with its target modes and positional arguments.
///
/// Commands are validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Command {
    op: Operation,
    modes: Vec<ModeId>,
    args: Vec<Argument>,
}

impl Command {
    /// Create a command.
    ///
    /// Checks the mode arity, rejects repeated modes and surplus arguments, and
    /// pads omitted trailing arguments with `0`.
    pub fn new(
        op: Operation,
        modes: impl IntoIterator<Item = ModeId>,
        args: impl IntoIterator<Item = Argument>,
    ) -> IrResult<Self> {
        let modes: Vec<ModeId> = modes.into_iter().collect();
        let mut args: Vec<Argument> = args.into_iter().collect();

        if !op.arity().accepts(modes.len()) {
            return Err(IrError::ModeCountMismatch {
                op_name: op.name().to_string(),
                expected: op.arity().to_string(),
                got: modes.len(),
            });
        }
        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].contains(mode) {
                return Err(IrError::DuplicateMode {
                    mode: *mode,
                    op_name: op.name().to_string(),
                });
            }
        }
        if args.len() > op.num_args() {
            return Err(IrError::ArgumentCountMismatch {
                op_name: op.name().to_string(),
                max: op.num_args(),
                got: args.len(),
            });
        }
        args.resize(op.num_args(), Argument::Concrete(0.0));

        Ok(Self { op, modes, args })
    }

    /// The operation.
    pub fn op(&self) -> Operation {
        self.op
    }

    /// The name of the operation.
    pub fn name(&self) -> &'static str {
        self.op.name()
    }

    /// Target modes, in order.
    pub fn modes(&self) -> &[ModeId] {
        &self.modes
    }

    /// Positional arguments, in order.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Check if this is a measurement.
    pub fn is_measurement(&self) -> bool {
        self.op.is_measurement()
    }

    /// Check if any argument is symbolic.
    pub fn is_symbolic(&self) -> bool {
        self.args.iter().any(Argument::is_symbolic)
    }

    /// Placeholders referenced by this command, in argument order.
    pub fn placeholders(&self) -> impl Iterator<Item = PlaceholderId> + '_ {
        self.args.iter().filter_map(Argument::placeholder)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op.name())?;
        if !self.args.is_empty() {
            f.write_str("(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(")")?;
        }
        f.write_str(" | (")?;
        for (i, mode) in self.modes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{mode}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_arguments_default_to_zero() {
        let cmd = Command::new(Operation::Sgate, [ModeId(1)], [Argument::from(0.7)]).unwrap();
        assert_eq!(cmd.args(), &[Argument::Concrete(0.7), Argument::Concrete(0.0)]);
        assert_eq!(cmd.to_string(), "Sgate(0.7, 0) | (q[1])");
    }

    #[test]
    fn test_symbolic_display() {
        let cmd = Command::new(
            Operation::BSgate,
            [ModeId(0), ModeId(1)],
            [Argument::symbolic(0)],
        )
        .unwrap();
        assert!(cmd.is_symbolic());
        assert_eq!(cmd.to_string(), "BSgate({p0}, 0) | (q[0], q[1])");
        assert_eq!(cmd.placeholders().collect::<Vec<_>>(), vec![PlaceholderId(0)]);
    }

    #[test]
    fn test_no_argument_display() {
        let cmd = Command::new(Operation::MeasureFock, [ModeId(0), ModeId(2)], []).unwrap();
        assert_eq!(cmd.to_string(), "MeasureFock | (q[0], q[2])");
        assert!(cmd.is_measurement());
    }

    #[test]
    fn test_wrong_mode_count() {
        let err = Command::new(Operation::BSgate, [ModeId(0)], []).unwrap_err();
        assert!(matches!(err, IrError::ModeCountMismatch { got: 1, .. }));
    }

    #[test]
    fn test_duplicate_mode() {
        let err = Command::new(Operation::BSgate, [ModeId(0), ModeId(0)], []).unwrap_err();
        assert!(matches!(err, IrError::DuplicateMode { mode: ModeId(0), .. }));
    }

    #[test]
    fn test_too_many_arguments() {
        let err = Command::new(
            Operation::Rgate,
            [ModeId(0)],
            [Argument::from(0.1), Argument::from(0.2)],
        )
        .unwrap_err();
        assert!(matches!(err, IrError::ArgumentCountMismatch { max: 1, got: 2, .. }));
    }
}
