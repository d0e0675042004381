use std::time::Duration;

use crate::vm::time_fmt::format_elapsed;

/// Rendered fields for the conclusion screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub practice_title: String,
    pub elapsed_text: String,
}

#[must_use]
pub fn map_summary(practice_title: &str, elapsed: Duration) -> SummaryVm {
    SummaryVm {
        practice_title: practice_title.to_string(),
        elapsed_text: format_elapsed(elapsed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_formats_title_and_time() {
        let vm = map_summary("Examen", Duration::from_secs(95));
        assert_eq!(vm.practice_title, "Examen");
        assert_eq!(vm.elapsed_text, "1 min 35 s");
    }
}
