//! Console presentation: status lines through `tracing`, speech through an
//! optional external text-to-speech program.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use super::{DisplayView, PresentationSink, SpeechError};
use crate::config::SpeechConfig;
use crate::types::{AlertLabel, Axis, Severity};

/// External speech program invoked as `<program> -s <rate> <message>`.
///
/// The `-s` words-per-minute flag is what `espeak` and `espeak-ng` accept.
#[derive(Debug, Clone)]
pub struct SpeechCommand {
    program: String,
    rate_wpm: u32,
}

impl SpeechCommand {
    pub fn new(program: impl Into<String>, rate_wpm: u32) -> Self {
        Self {
            program: program.into(),
            rate_wpm,
        }
    }

    pub async fn say(&self, message: &str) -> Result<(), SpeechError> {
        let status = Command::new(&self.program)
            .arg("-s")
            .arg(self.rate_wpm.to_string())
            .arg(message)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Logs the display state and spoken messages.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    speech: Option<SpeechCommand>,
    last_shown: Option<AlertLabel>,
}

impl ConsoleSink {
    pub fn new(speech: Option<SpeechCommand>) -> Self {
        Self {
            speech,
            last_shown: None,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        let speech = config
            .command
            .as_ref()
            .filter(|_| config.enabled)
            .map(|program| SpeechCommand::new(program.clone(), config.rate_wpm));
        Self::new(speech)
    }
}

const fn color_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Safe => "green",
        Severity::Caution => "orange",
        Severity::Danger => "red",
    }
}

#[async_trait]
impl PresentationSink for ConsoleSink {
    fn display(&mut self, view: &DisplayView<'_>) {
        if self.last_shown != Some(view.label) {
            info!(
                color = color_name(view.severity),
                distance_mm = view.distance_mm,
                "{}",
                view.label
            );
            self.last_shown = Some(view.label);
        }

        if let Some(latest) = view.recent_motion.latest() {
            debug!(
                label = %view.label,
                distance_mm = view.distance_mm,
                samples = view.recent_motion.len(),
                ax = latest.get(Axis::Ax),
                ay = latest.get(Axis::Ay),
                az = latest.get(Axis::Az),
                gx = latest.get(Axis::Gx),
                gy = latest.get(Axis::Gy),
                gz = latest.get(Axis::Gz),
                "Display"
            );
        } else {
            debug!(label = %view.label, distance_mm = view.distance_mm, "Display (no motion yet)");
        }
    }

    async fn speak(&mut self, message: &str) -> Result<(), SpeechError> {
        info!("🔊 {}", message);
        match &self.speech {
            Some(command) => command.say(message).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MotionHistory;

    #[test]
    fn speech_disabled_ignores_command() {
        let config = SpeechConfig {
            enabled: false,
            command: Some("espeak".to_string()),
            rate_wpm: 170,
        };
        assert!(ConsoleSink::from_config(&config).speech.is_none());

        let enabled = SpeechConfig { enabled: true, ..config };
        assert!(ConsoleSink::from_config(&enabled).speech.is_some());
    }

    #[tokio::test]
    async fn console_only_speech_succeeds() {
        let mut sink = ConsoleSink::new(None);
        tokio_test::assert_ok!(sink.speak("Keep Walking Safely").await);

        let motion = MotionHistory::new(4);
        sink.display(&DisplayView {
            label: AlertLabel::KeepWalking,
            severity: Severity::Safe,
            distance_mm: 1200,
            recent_motion: &motion,
        });
        assert_eq!(sink.last_shown, Some(AlertLabel::KeepWalking));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let command = SpeechCommand::new("/nonexistent/third-eye-tts", 170);
        let err = command.say("hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::Spawn { .. }));
    }
}
