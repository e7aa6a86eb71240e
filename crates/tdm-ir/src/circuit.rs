//! Ordered command sequences.

use serde::Serialize;
use std::fmt;

use crate::command::Command;
use crate::mode::ModeId;

/// An ordered sequence of commands.
///
/// Both the rolled (one period) and the unrolled (full timeline) views of a
/// time-domain program are circuits. Two circuits are equal when their
/// command sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Circuit {
    commands: Vec<Command>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty circuit with room for `capacity` commands.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Append a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the circuit has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The commands in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Iterate over the commands in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// Operation names in order.
    pub fn op_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(Command::name).collect()
    }

    /// Number of measured registers, summed over all measurement commands.
    pub fn num_measured_modes(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| cmd.is_measurement())
            .map(|cmd| cmd.modes().len())
            .sum()
    }

    /// Registers targeted by measurements, in command order.
    pub fn measured_modes(&self) -> Vec<ModeId> {
        self.commands
            .iter()
            .filter(|cmd| cmd.is_measurement())
            .flat_map(|cmd| cmd.modes().iter().copied())
            .collect()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl FromIterator<Command> for Circuit {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::Argument;
    use crate::operation::Operation;

    fn sample() -> Circuit {
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
    fn test_measured_modes() {
        let circuit = sample();
        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.num_measured_modes(), 1);
        assert_eq!(circuit.measured_modes(), vec![ModeId(0)]);
        assert_eq!(circuit.op_names(), vec!["Sgate", "BSgate", "MeasureHomodyne"]);
    }

    #[test]
    fn test_display() {
        let expected = "Sgate(0.7, 0) | (q[1])\n\
                        BSgate({p0}, 0) | (q[0], q[1])\n\
                        MeasureHomodyne({p1}) | (q[0])\n";
        assert_eq!(sample().to_string(), expected);
    }

    #[test]
    fn test_multi_mode_measurement_counts_each_mode() {
        let circuit: Circuit = [
            Command::new(Operation::MeasureFock, [ModeId(0), ModeId(2)], []).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(circuit.num_measured_modes(), 2);
    }
}
