use crate::{
    foundation::core::Rgba8,
    model::{ScoreRow, ScoreValue},
};

/// Chip classification for one participant on one row.
///
/// The precedence contract is an ordered match, first hit wins:
/// submitter override, then equality to the row maximum, then equality to
/// the row minimum, then neutral. When every numeric score is equal, the
/// max check fires first and all holders classify as [`ScoreClass::Max`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScoreClass {
    /// The participant submitted this row; shown as a gold `N`.
    Submitter,
    /// Holds the row's maximum numeric score.
    Max,
    /// Holds the row's minimum numeric score.
    Min,
    /// Neither extremal nor the submitter, or no parseable score.
    Neutral,
}

impl ScoreClass {
    /// Fill color for the chip label.
    pub fn chip_color(self) -> Rgba8 {
        match self {
            Self::Submitter => Rgba8::new(255, 215, 0, 255),
            Self::Max => Rgba8::new(0, 200, 0, 255),
            Self::Min => Rgba8::new(220, 0, 0, 255),
            Self::Neutral => Rgba8::new(230, 230, 230, 255),
        }
    }
}

/// Extremal numeric scores of a row, `None` when no score parses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RowExtremes {
    /// Largest parseable score.
    pub max: Option<f64>,
    /// Smallest parseable score.
    pub min: Option<f64>,
}

/// Compute max/min over the parseable scores of `participants`.
///
/// Absent and non-numeric values never participate.
pub fn row_extremes(row: &ScoreRow, participants: &[String]) -> RowExtremes {
    let mut extremes = RowExtremes::default();
    for participant in participants {
        let Some(v) = row.score_for(participant).as_number() else {
            continue;
        };
        extremes.max = Some(extremes.max.map_or(v, |m| m.max(v)));
        extremes.min = Some(extremes.min.map_or(v, |m| m.min(v)));
    }
    extremes
}

/// Classify a single participant against precomputed row extremes.
pub fn classify(row: &ScoreRow, participant: &str, extremes: RowExtremes) -> ScoreClass {
    if row.is_submitter(participant) {
        return ScoreClass::Submitter;
    }
    match row.score_for(participant).as_number() {
        Some(v) if Some(v) == extremes.max => ScoreClass::Max,
        Some(v) if Some(v) == extremes.min => ScoreClass::Min,
        _ => ScoreClass::Neutral,
    }
}

/// Classify every participant of a row, aligned with the input order.
pub fn classify_row(row: &ScoreRow, participants: &[String]) -> Vec<ScoreClass> {
    let extremes = row_extremes(row, participants);
    participants
        .iter()
        .map(|p| classify(row, p, extremes))
        .collect()
}

/// Tolerance of the is-whole-number check in [`format_score`].
pub const WHOLE_NUMBER_EPSILON: f64 = 1e-6;

/// Format a score for its chip label.
///
/// Whole numbers (fractional part below [`WHOLE_NUMBER_EPSILON`], measured
/// against the truncated value) print without a decimal point; everything
/// else prints with one decimal, rounded half away from zero. Absent scores
/// print as a dash.
pub fn format_score(value: ScoreValue) -> String {
    match value {
        ScoreValue::Absent => "-".to_string(),
        ScoreValue::Number(v) => {
            if (v - v.trunc()).abs() < WHOLE_NUMBER_EPSILON {
                format!("{}", v.trunc() as i64)
            } else {
                format!("{:.1}", (v * 10.0).round() / 10.0)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/score.rs"]
mod tests;
