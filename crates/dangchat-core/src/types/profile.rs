//! SajuProfile - the canonical user input record.
//!
//! A profile is a value object: it has no identity of its own and is only
//! ever replaced whole, never patched field by field.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Biological gender as the saju tradition distinguishes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Korean label used when addressing the Oracle.
    pub fn korean(&self) -> &'static str {
        match self {
            Gender::Male => "남성",
            Gender::Female => "여성",
        }
    }
}

/// Which calendar the birth date was given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarType {
    Solar,
    Lunar,
    /// Lunar leap-month birth.
    Leap,
}

impl CalendarType {
    /// Korean label used when addressing the Oracle.
    pub fn korean(&self) -> &'static str {
        match self {
            CalendarType::Solar => "양력",
            CalendarType::Lunar => "음력",
            CalendarType::Leap => "윤달",
        }
    }
}

/// Time of birth, or the explicit "unknown" sentinel.
///
/// Never empty/unset: a profile either knows the hour or records that the
/// user does not. Serialized as `"HH:MM"` or `"unknown"`, the wire form the
/// app has always stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthTime {
    Known(NaiveTime),
    Unknown,
}

impl BirthTime {
    pub fn is_unknown(&self) -> bool {
        matches!(self, BirthTime::Unknown)
    }

    /// Korean rendering for Oracle prompts ("모름" when unknown).
    pub fn korean(&self) -> String {
        match self {
            BirthTime::Known(t) => t.format("%H:%M").to_string(),
            BirthTime::Unknown => "모름".to_string(),
        }
    }
}

impl fmt::Display for BirthTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthTime::Known(t) => write!(f, "{}", t.format("%H:%M")),
            BirthTime::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for BirthTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BirthTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "unknown" {
            return Ok(BirthTime::Unknown);
        }
        let time = NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|e| D::Error::custom(format!("invalid birth time '{}': {}", raw, e)))?;
        Ok(BirthTime::Known(time))
    }
}

/// The birth-data record a user supplies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SajuProfile {
    /// Display name; must be non-empty for the profile to be complete.
    pub name: String,
    pub gender: Gender,
    /// Calendar date of birth, always present.
    pub birth_date: NaiveDate,
    /// Time of day, or the unknown sentinel; never unset.
    pub birth_time: BirthTime,
    pub calendar_type: CalendarType,
    /// Free-text locality, used only as an Oracle hint.
    #[serde(default)]
    pub birth_region: String,
}

impl SajuProfile {
    pub fn new(
        name: impl Into<String>,
        gender: Gender,
        birth_date: NaiveDate,
        birth_time: BirthTime,
        calendar_type: CalendarType,
        birth_region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            gender,
            birth_date,
            birth_time,
            calendar_type,
            birth_region: birth_region.into(),
        }
    }

    /// Completeness invariant: name and birth date present. The date is
    /// structurally guaranteed, so only the name can fail.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> SajuProfile {
        SajuProfile::new(
            "김민지",
            Gender::Female,
            date(1990, 5, 1),
            BirthTime::Unknown,
            CalendarType::Solar,
            "서울",
        )
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut profile = sample();
        assert!(profile.validate().is_ok());

        profile.name = "   ".to_string();
        assert_eq!(profile.validate(), Err(ValidationError::EmptyName));
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_birth_time_wire_form() {
        let known = BirthTime::Known(NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(serde_json::to_string(&known).unwrap(), r#""14:30""#);
        assert_eq!(
            serde_json::to_string(&BirthTime::Unknown).unwrap(),
            r#""unknown""#
        );

        let parsed: BirthTime = serde_json::from_str(r#""07:05""#).unwrap();
        assert_eq!(
            parsed,
            BirthTime::Known(NaiveTime::from_hms_opt(7, 5, 0).unwrap())
        );
        let sentinel: BirthTime = serde_json::from_str(r#""unknown""#).unwrap();
        assert!(sentinel.is_unknown());
        assert!(serde_json::from_str::<BirthTime>(r#""25:99""#).is_err());
    }

    #[test]
    fn test_profile_round_trips_for_storage() {
        let profile = sample();
        let json = serde_json::to_string(&profile).unwrap();
        let back: SajuProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
        assert!(json.contains(r#""birthDate":"1990-05-01""#));
        assert!(json.contains(r#""birthTime":"unknown""#));
    }

    #[test]
    fn test_korean_labels_for_oracle_prompts() {
        assert_eq!(Gender::Male.korean(), "남성");
        assert_eq!(CalendarType::Leap.korean(), "윤달");
        assert_eq!(BirthTime::Unknown.korean(), "모름");
    }
}
