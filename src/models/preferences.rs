use serde::{Deserialize, Serialize};

pub const DEFAULT_SPOT_COUNT: usize = 3;

/// Raw questionnaire answers, exactly as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    /// "How many spots to visit?"
    #[serde(default)]
    pub spots: Option<String>,
    /// "Do you want to eat? (yes/no)"
    #[serde(default)]
    pub eat: Option<String>,
    /// "How many hours to socialize?"
    #[serde(default)]
    pub duration: Option<String>,
}

/// Normalized preferences driving the recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub wants_to_eat: bool,
    pub desired_spot_count: usize,
    /// Informational only; the itinerary length is driven by `desired_spot_count`
    pub socialize_hours: Option<u32>,
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

impl From<&QuestionnaireAnswers> for Preferences {
    fn from(answers: &QuestionnaireAnswers) -> Self {
        let wants_to_eat = answers
            .eat
            .as_deref()
            .is_some_and(|eat| eat.trim().eq_ignore_ascii_case("yes"));

        let desired_spot_count = parse_positive(answers.spots.as_deref())
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_SPOT_COUNT);

        Self {
            wants_to_eat,
            desired_spot_count,
            socialize_hours: parse_positive(answers.duration.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(spots: Option<&str>, eat: Option<&str>) -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            spots: spots.map(String::from),
            eat: eat.map(String::from),
            duration: None,
        }
    }

    #[test]
    fn test_yes_means_eat_case_insensitive() {
        assert!(Preferences::from(&answers(None, Some("YES"))).wants_to_eat);
        assert!(Preferences::from(&answers(None, Some(" yes "))).wants_to_eat);
        assert!(!Preferences::from(&answers(None, Some("no"))).wants_to_eat);
        assert!(!Preferences::from(&answers(None, Some("y"))).wants_to_eat);
        assert!(!Preferences::from(&answers(None, None)).wants_to_eat);
    }

    #[test]
    fn test_spot_count_parsing() {
        assert_eq!(Preferences::from(&answers(Some("5"), None)).desired_spot_count, 5);
        assert_eq!(Preferences::from(&answers(Some(" 2 "), None)).desired_spot_count, 2);
    }

    #[test]
    fn test_spot_count_defaults_when_missing_or_unparsable() {
        for raw in [None, Some(""), Some("lots"), Some("0"), Some("-4"), Some("2.5")] {
            let prefs = Preferences::from(&answers(raw, Some("yes")));
            assert_eq!(prefs.desired_spot_count, DEFAULT_SPOT_COUNT, "input {:?}", raw);
        }
    }

    #[test]
    fn test_duration_is_carried() {
        let mut a = answers(Some("3"), Some("no"));
        a.duration = Some("4".to_string());
        assert_eq!(Preferences::from(&a).socialize_hours, Some(4));
    }
}
