//! Mode - the closed set of fortune-reading types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed readings the app offers. Arity and network behavior per
/// mode live in the registry table, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Full four-pillars chart analysis.
    Manse,
    /// Lifetime overall reading.
    Chongun,
    /// Two-person compatibility.
    Gunghap,
    /// Lucky-number reading backing the lotto generator.
    Lotto,
    /// Celebrity compatibility match.
    CelebMatch,
    /// Destination recommendation by lacking element.
    Travel,
    /// Three-calamity-years status.
    Samjae,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Manse,
        Mode::Chongun,
        Mode::Gunghap,
        Mode::Lotto,
        Mode::CelebMatch,
        Mode::Travel,
        Mode::Samjae,
    ];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Mode::Manse => "manse",
            Mode::Chongun => "chongun",
            Mode::Gunghap => "gunghap",
            Mode::Lotto => "lotto",
            Mode::CelebMatch => "celeb_match",
            Mode::Travel => "travel",
            Mode::Samjae => "samjae",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels_are_unique() {
        let labels: Vec<String> = Mode::ALL.iter().map(|m| m.to_string()).collect();
        let mut deduped = labels.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), labels.len());
    }

    #[test]
    fn test_mode_serde_tag() {
        assert_eq!(
            serde_json::to_string(&Mode::CelebMatch).unwrap(),
            r#""celeb_match""#
        );
        let parsed: Mode = serde_json::from_str(r#""samjae""#).unwrap();
        assert_eq!(parsed, Mode::Samjae);
    }
}
