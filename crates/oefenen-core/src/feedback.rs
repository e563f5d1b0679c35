//! Narrative feedback derived from an exercise score.
//!
//! Scores fall into one of four fixed bands. Each band has a general
//! feedback sentence and an ordered list of improvement tips.

use serde::{Deserialize, Serialize};

/// A fixed score range mapped to a message and tip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    /// 90 and up.
    Excellent,
    /// 80 to 89.
    WellDone,
    /// 60 to 79.
    RoomForImprovement,
    /// Below 60.
    NeedsAttention,
}

impl ScoreBand {
    /// Band for a score. Lower bounds are inclusive; total over all `u32`.
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => ScoreBand::Excellent,
            80..=89 => ScoreBand::WellDone,
            60..=79 => ScoreBand::RoomForImprovement,
            _ => ScoreBand::NeedsAttention,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Uitstekend! Je beheerst deze stof heel goed.",
            ScoreBand::WellDone => "Goed gedaan! Je begrijpt het grootste deel van de stof.",
            ScoreBand::RoomForImprovement => {
                "Niet slecht, maar er is nog ruimte voor verbetering."
            }
            ScoreBand::NeedsAttention => "Deze stof heeft nog wat extra aandacht nodig.",
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            ScoreBand::Excellent => {
                &["Herhaal deze oefening later nog eens om de stof goed vast te houden."]
            }
            ScoreBand::WellDone => &[
                "Bekijk de vragen die je fout had en lees de uitleg.",
                "Oefen nog een keer om je score verder te verbeteren.",
            ],
            ScoreBand::RoomForImprovement => &[
                "Lees de uitleg bij deze oefening nog eens goed door.",
                "Bekijk de juiste antwoorden van de vragen die je fout had.",
                "Probeer de oefening daarna opnieuw.",
            ],
            ScoreBand::NeedsAttention => &[
                "Bestudeer eerst de uitleg voordat je verdergaat.",
                "Neem de tijd om de regels en voorbeelden rustig door te nemen.",
                "Probeer de oefening opnieuw zodra je je zeker voelt.",
            ],
        }
    }
}

/// General feedback sentence and tips for a score.
pub fn compose(score: u32) -> (String, Vec<String>) {
    let band = ScoreBand::from_score(score);
    let tips = band.tips().iter().map(|t| t.to_string()).collect();
    (band.message().to_string(), tips)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(90), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(89), ScoreBand::WellDone);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::WellDone);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::RoomForImprovement);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::RoomForImprovement);
        assert_eq!(ScoreBand::from_score(59), ScoreBand::NeedsAttention);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::NeedsAttention);
    }

    #[test]
    fn tip_counts_at_boundaries() {
        let (message, tips) = compose(90);
        assert!(message.starts_with("Uitstekend"));
        assert_eq!(tips.len(), 1);

        let (message, tips) = compose(89);
        assert!(message.starts_with("Goed gedaan"));
        assert_eq!(tips.len(), 2);

        let (message, tips) = compose(60);
        assert!(message.starts_with("Niet slecht"));
        assert_eq!(tips.len(), 3);

        let (message, tips) = compose(59);
        assert_eq!(message, ScoreBand::NeedsAttention.message());
        assert_eq!(tips.len(), 3);
    }

    #[test]
    fn every_score_has_feedback() {
        for score in 0..=100 {
            let (message, tips) = compose(score);
            assert!(!message.is_empty());
            assert!((1..=3).contains(&tips.len()), "score {score}");
        }
    }
}
