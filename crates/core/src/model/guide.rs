/// One step of a practice guide: a short prompt plus the detail text that
/// is shown on screen and read aloud by narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideStep {
    prompt: &'static str,
    detail: &'static str,
}

impl GuideStep {
    #[must_use]
    pub const fn new(prompt: &'static str, detail: &'static str) -> Self {
        Self { prompt, detail }
    }

    #[must_use]
    pub fn prompt(&self) -> &'static str {
        self.prompt
    }

    #[must_use]
    pub fn detail(&self) -> &'static str {
        self.detail
    }
}

/// Joins step detail texts, in order, into the single utterance handed to
/// the speech host.
#[must_use]
pub fn narration_text(steps: &[GuideStep]) -> String {
    steps
        .iter()
        .map(GuideStep::detail)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narration_text_preserves_step_order() {
        let steps = [
            GuideStep::new("Settle", "Sit comfortably."),
            GuideStep::new("Breathe", "Follow the breath."),
        ];
        assert_eq!(narration_text(&steps), "Sit comfortably. Follow the breath.");
    }

    #[test]
    fn narration_text_of_no_steps_is_empty() {
        assert_eq!(narration_text(&[]), "");
    }
}
