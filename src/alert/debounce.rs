//! Evaluation cadence and speech debounce.

use std::time::{Duration, Instant};

use crate::types::AlertLabel;

/// Gates alert evaluation to a fixed interval.
pub struct EvaluationCadence {
    interval: Duration,
    last_evaluation: Option<Instant>,
}

impl EvaluationCadence {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_evaluation: None,
        }
    }

    /// True if nothing has been evaluated yet or the interval has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_evaluation {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    pub fn record(&mut self, now: Instant) {
        self.last_evaluation = Some(now);
    }
}

/// Suppresses speech while the label is unchanged since it was last spoken.
#[derive(Debug, Default)]
pub struct SpeechDebouncer {
    last_spoken: Option<AlertLabel>,
}

impl SpeechDebouncer {
    pub const fn new() -> Self {
        Self { last_spoken: None }
    }

    /// Returns true (and remembers the label) when it should be spoken.
    pub fn should_speak(&mut self, label: AlertLabel) -> bool {
        if self.last_spoken == Some(label) {
            return false;
        }
        self.last_spoken = Some(label);
        true
    }

    pub const fn last_spoken(&self) -> Option<AlertLabel> {
        self.last_spoken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AlertLabel::{Horn, KeepWalking, Obstacle};

    #[test]
    fn speaks_only_on_change() {
        let mut debouncer = SpeechDebouncer::new();
        let spoken: Vec<AlertLabel> = [KeepWalking, KeepWalking, Obstacle, Obstacle, Obstacle, KeepWalking]
            .into_iter()
            .filter(|&label| debouncer.should_speak(label))
            .collect();
        assert_eq!(spoken, vec![KeepWalking, Obstacle, KeepWalking]);
    }

    #[test]
    fn first_label_is_always_spoken() {
        let mut debouncer = SpeechDebouncer::new();
        assert!(debouncer.should_speak(Horn));
        assert_eq!(debouncer.last_spoken(), Some(Horn));
        assert!(!debouncer.should_speak(Horn));
    }

    #[test]
    fn cadence_gates_evaluation() {
        let start = Instant::now();
        let mut cadence = EvaluationCadence::new(Duration::from_millis(1500));
        assert!(cadence.is_due(start));
        cadence.record(start);

        assert!(!cadence.is_due(start + Duration::from_millis(100)));
        assert!(!cadence.is_due(start + Duration::from_millis(1499)));
        assert!(cadence.is_due(start + Duration::from_millis(1500)));
    }
}
