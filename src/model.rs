use std::collections::BTreeMap;

use crate::foundation::error::{CardError, CardResult};

/// One dataset row: a song plus per-participant scores.
///
/// A row is a pure data model produced by the external data loader. It can be
/// built programmatically or deserialized via Serde (JSON); the engine
/// consumes it read-only.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ScoreRow {
    /// Song title.
    pub song: String,
    /// Artist name.
    pub artist: String,
    /// Name of the participant who submitted this song.
    pub submitter: String,
    /// Mean score across participants, precomputed by the data loader.
    #[serde(default)]
    pub average: f64,
    /// 1-based position after a stable sort of all rows by `average`
    /// descending (input order breaks ties). See [`assign_ranks`].
    #[serde(default)]
    pub rank: u32,
    /// Per-participant score values keyed by participant name.
    #[serde(default)]
    pub scores: BTreeMap<String, ScoreValue>,
}

impl ScoreRow {
    /// Score value for `participant`, [`ScoreValue::Absent`] when the row has
    /// no entry for that name.
    pub fn score_for(&self, participant: &str) -> ScoreValue {
        self.scores
            .get(participant)
            .copied()
            .unwrap_or(ScoreValue::Absent)
    }

    /// Whether `participant` submitted this row (case-insensitive, trimmed).
    pub fn is_submitter(&self, participant: &str) -> bool {
        normalize_name(&self.submitter) == normalize_name(participant)
    }

    /// Mean over the parseable scores of `participants`, `0.0` when none.
    pub fn mean_score(&self, participants: &[String]) -> f64 {
        let values: Vec<f64> = participants
            .iter()
            .filter_map(|p| self.score_for(p).as_number())
            .collect();
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Reject rows missing a required identifying field.
    ///
    /// The data loader must prevent this; the engine fails fast instead of
    /// rendering a corrupt card.
    pub fn validate(&self) -> CardResult<()> {
        for (field, value) in [
            ("song", &self.song),
            ("artist", &self.artist),
            ("submitter", &self.submitter),
        ] {
            if value.trim().is_empty() {
                return Err(CardError::validation(format!(
                    "score row is missing required field '{field}'"
                )));
            }
        }
        Ok(())
    }
}

/// A single score cell: a finite number or nothing renderable.
///
/// The Serde form accepts JSON numbers and numeric strings; null, non-numeric
/// strings, NaN and infinities all map to [`ScoreValue::Absent`]. Absence is
/// a defined semantic (rendered as a dash, excluded from max/min), not an
/// error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScoreValue {
    /// A finite numeric score.
    Number(f64),
    /// No usable score.
    Absent,
}

impl ScoreValue {
    /// Parse a raw string the way a score cell is parsed: trimmed, finite
    /// numbers only.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Self::Number(v),
            _ => Self::Absent,
        }
    }

    /// The numeric value, if present.
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Absent => None,
        }
    }
}

impl serde::Serialize for ScoreValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(v) => serializer.serialize_f64(*v),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for ScoreValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoreValueVisitor;

        impl<'de> serde::de::Visitor<'de> for ScoreValueVisitor {
            type Value = ScoreValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a number, a numeric string, or null")
            }

            fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if v.is_finite() {
                    Ok(ScoreValue::Number(v))
                } else {
                    Ok(ScoreValue::Absent)
                }
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScoreValue::Number(v as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScoreValue::Number(v as f64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ScoreValue::parse(v))
            }

            fn visit_bool<E: serde::de::Error>(self, _v: bool) -> Result<Self::Value, E> {
                Ok(ScoreValue::Absent)
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(ScoreValue::Absent)
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(ScoreValue::Absent)
            }

            fn visit_some<D2: serde::Deserializer<'de>>(
                self,
                deserializer: D2,
            ) -> Result<Self::Value, D2::Error> {
                deserializer.deserialize_any(ScoreValueVisitor)
            }
        }

        deserializer.deserialize_any(ScoreValueVisitor)
    }
}

/// Declared favorite songs, keyed by participant name as it appears in the
/// dataset.
///
/// Song comparison is exact and case-sensitive; a participant with no entry
/// simply never gets a star marker.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Favorites(BTreeMap<String, String>);

impl Favorites {
    /// Empty favorites map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `participant`'s favorite song title.
    pub fn set(&mut self, participant: impl Into<String>, song: impl Into<String>) {
        self.0.insert(participant.into(), song.into());
    }

    /// Whether `song` is the declared favorite of `participant`.
    pub fn is_favorite(&self, participant: &str, song: &str) -> bool {
        self.0.get(participant).is_some_and(|fav| fav == song)
    }
}

impl FromIterator<(String, String)> for Favorites {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which side rails of the card carry participant chips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RailMode {
    /// First `ceil(n/2)` participants on the left rail, remainder on the
    /// right.
    #[default]
    TwoRail,
    /// All participants on the left rail.
    LeftOnly,
    /// All participants on the right rail.
    RightOnly,
}

/// Immutable geometry and style knobs for one render call.
///
/// Every geometric constant the composer uses is derived from this value;
/// only fixed proportional ratios of the visual language (title panel height,
/// rank panel width and the like) live as constants in the composer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Card width in pixels.
    pub card_w: u32,
    /// Card height in pixels.
    pub card_h: u32,
    /// Outer padding in pixels.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Edge length of the square avatar/score chip unit in pixels.
    #[serde(default = "default_chip_size")]
    pub chip_size: u32,
    /// Vertical gap between chip entries in pixels.
    #[serde(default = "default_chip_gap")]
    pub chip_gap: u32,
    /// Rail arrangement.
    #[serde(default)]
    pub rail_mode: RailMode,
    /// Opacity of the favorite star backdrop, `0.0..=1.0`.
    #[serde(default = "default_star_opacity")]
    pub star_opacity: f32,
    /// Draw the rank number in the top-right panel.
    #[serde(default = "default_true")]
    pub show_rank: bool,
    /// Draw the `AVG` label and value in the top-right panel.
    #[serde(default = "default_true")]
    pub show_avg: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            card_w: 1000,
            card_h: 500,
            padding: default_padding(),
            chip_size: default_chip_size(),
            chip_gap: default_chip_gap(),
            rail_mode: RailMode::default(),
            star_opacity: default_star_opacity(),
            show_rank: true,
            show_avg: true,
        }
    }
}

fn default_padding() -> u32 {
    20
}

fn default_chip_size() -> u32 {
    64
}

fn default_chip_gap() -> u32 {
    10
}

fn default_star_opacity() -> f32 {
    0.35
}

fn default_true() -> bool {
    true
}

/// Stable-sort `rows` by average descending and assign 1-based ranks.
///
/// Ties on `average` keep their input order; values that do not compare
/// (NaN) are left where they are. This is the invariant `ScoreRow::rank`
/// documents, made explicit so the tiebreak is testable.
pub fn assign_ranks(rows: &mut [ScoreRow]) {
    rows.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (idx, row) in rows.iter_mut().enumerate() {
        row.rank = (idx + 1) as u32;
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
