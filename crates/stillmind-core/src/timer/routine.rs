use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One step of a guided routine: the label shown to the user and how long
/// it lasts, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub label: String,
    pub duration_secs: u64,
}

impl Phase {
    pub fn new(label: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            label: label.into(),
            duration_secs,
        }
    }
}

/// What happens when the last phase of a routine runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutineMode {
    /// Wrap back to the first phase and keep going until stopped.
    Cyclic,
    /// Stop at zero. The countdown completes.
    Terminal,
}

/// An ordered, non-empty table of phases plus the wrap behavior.
///
/// Validated at construction: the table must have at least one phase and
/// every duration must be positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    phases: Vec<Phase>,
    mode: RoutineMode,
}

impl Routine {
    /// Create a routine from a phase table.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if the table is empty or
    /// any phase has a zero duration.
    pub fn new(phases: Vec<Phase>, mode: RoutineMode) -> Result<Self, CoreError> {
        if phases.is_empty() {
            return Err(CoreError::invalid_configuration("routine has no phases"));
        }
        if let Some(phase) = phases.iter().find(|p| p.duration_secs == 0) {
            return Err(CoreError::invalid_configuration(format!(
                "phase '{}' has zero duration",
                phase.label
            )));
        }
        Ok(Self { phases, mode })
    }

    /// The default guided-breathing table: Inhale 4s, Hold 4s, Exhale 6s,
    /// cycling until stopped.
    pub fn breathing() -> Self {
        Self {
            phases: vec![
                Phase::new("Inhale", 4),
                Phase::new("Hold", 4),
                Phase::new("Exhale", 6),
            ],
            mode: RoutineMode::Cyclic,
        }
    }

    /// A breathing table with custom durations.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if any duration is zero.
    pub fn breathing_with(
        inhale_secs: u64,
        hold_secs: u64,
        exhale_secs: u64,
    ) -> Result<Self, CoreError> {
        Self::new(
            vec![
                Phase::new("Inhale", inhale_secs),
                Phase::new("Hold", hold_secs),
                Phase::new("Exhale", exhale_secs),
            ],
            RoutineMode::Cyclic,
        )
    }

    /// A single-phase terminal countdown, the meditation timer shape.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` if the duration is zero.
    pub fn meditation(duration_secs: u64) -> Result<Self, CoreError> {
        Self::new(
            vec![Phase::new("Meditation", duration_secs)],
            RoutineMode::Terminal,
        )
    }

    pub fn mode(&self) -> RoutineMode {
        self.mode
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Total seconds in one pass over the table.
    pub fn total_secs(&self) -> u64 {
        self.phases.iter().map(|p| p.duration_secs).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breathing_table_shape() {
        let routine = Routine::breathing();
        assert_eq!(routine.len(), 3);
        assert_eq!(routine.mode(), RoutineMode::Cyclic);
        assert_eq!(routine.phase(0).unwrap().label, "Inhale");
        assert_eq!(routine.phase(2).unwrap().duration_secs, 6);
        assert_eq!(routine.total_secs(), 14);
    }

    #[test]
    fn meditation_is_single_phase_terminal() {
        let routine = Routine::meditation(300).unwrap();
        assert_eq!(routine.len(), 1);
        assert_eq!(routine.mode(), RoutineMode::Terminal);
        assert_eq!(routine.total_secs(), 300);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = Routine::new(vec![], RoutineMode::Cyclic).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let err = Routine::new(
            vec![Phase::new("Inhale", 4), Phase::new("Hold", 0)],
            RoutineMode::Cyclic,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfiguration { .. }));

        assert!(Routine::meditation(0).is_err());
        assert!(Routine::breathing_with(4, 0, 6).is_err());
    }
}
