use drill_core::model::SessionSummary;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub pack_name: String,
    pub mode_label: &'static str,
    /// Flashcard sessions report rounds seen instead of a score.
    pub scored: bool,
    pub rounds: u32,
    pub score_label: String,
    pub accuracy_label: String,
}

#[must_use]
pub fn map_summary(summary: &SessionSummary) -> SummaryVm {
    let accuracy = (summary.accuracy() * 100.0).round();
    SummaryVm {
        pack_name: summary.pack_name().to_owned(),
        mode_label: summary.mode().label(),
        scored: summary.mode().is_scored(),
        rounds: summary.total_rounds(),
        score_label: format!("{} / {}", summary.correct_count(), summary.total_rounds()),
        accuracy_label: format!("{accuracy:.0}%"),
    }
}
