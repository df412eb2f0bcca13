//! Per-mode result payloads.
//!
//! These mirror the strict-JSON shapes the Oracle is instructed to emit
//! (camelCase on the wire). The orchestrator carries them opaquely; only
//! the presentation layer reads the fields.

use serde::{Deserialize, Serialize};

use super::Mode;

/// Heavenly-stem half of a pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StemGlyph {
    pub char: String,
    pub hangul: String,
    pub color: String,
    pub element: String,
    pub ten_god: String,
}

/// Earthly-branch half of a pillar; branches additionally carry the zodiac
/// animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchGlyph {
    pub char: String,
    pub hangul: String,
    pub color: String,
    pub element: String,
    pub ten_god: String,
    pub animal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub stem: StemGlyph,
    pub branch: BranchGlyph,
    pub shipseong: Vec<String>,
    pub unseong: String,
    pub sinsal: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarSet {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub time: Pillar,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarAnalysis {
    pub year: String,
    pub month: String,
    pub day: String,
    pub time: String,
}

/// Five-element distribution across the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OhaengBalance {
    pub wood: u32,
    pub fire: u32,
    pub earth: u32,
    pub metal: u32,
    pub water: u32,
    pub missing: Vec<String>,
    pub excess: Vec<String>,
}

/// Ten-gods distribution, bucketed into the five groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipseongBalance {
    pub bi: u32,
    pub sik: u32,
    pub jae: u32,
    pub gwan: u32,
    pub r#in: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strength {
    pub score: u32,
    pub label: String,
    pub description: String,
}

/// One decade of the major-luck cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaewoonEntry {
    pub age: u32,
    pub stem: String,
    pub stem_hangul: String,
    pub branch: String,
    pub branch_hangul: String,
    pub ten_god: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManseAnalysis {
    pub personality: String,
    pub current_year_luck: String,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManseUserInfo {
    pub animal: String,
    pub color: String,
    pub element: String,
}

/// Full four-pillars chart reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManseResult {
    pub user_info: ManseUserInfo,
    pub pillars: PillarSet,
    pub pillar_analysis: PillarAnalysis,
    pub ohaeng: OhaengBalance,
    pub shipseong: ShipseongBalance,
    pub strength: Strength,
    pub daewoon: Vec<DaewoonEntry>,
    pub analysis: ManseAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChongunSections {
    pub self_view: String,
    pub others_view: String,
    pub talent: String,
    pub wealth: String,
    pub love: String,
    pub work: String,
    pub health: String,
}

/// Lifetime overall reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChongunResult {
    pub user_name: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub sections: ChongunSections,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GunghapDetails {
    pub personality_match: String,
    pub value_match: String,
    pub love_style: String,
    pub conflict_resolution: String,
}

/// Two-person compatibility reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GunghapResult {
    pub score: u32,
    pub summary: String,
    pub details: GunghapDetails,
    pub good_points: Vec<String>,
    pub bad_points: Vec<String>,
    pub advice: String,
}

/// Lucky-number enrichment for the lotto generator screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LottoLuckResult {
    pub lucky_numbers: Vec<u8>,
    pub lucky_color: String,
    pub direction: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelebMatchResult {
    pub celebrity_name: String,
    pub celebrity_job: String,
    pub compatibility_score: u32,
    pub match_reason: String,
    pub keywords: Vec<String>,
    pub user_element: String,
    pub celeb_element: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomesticPick {
    pub place: String,
    pub location: String,
    pub reason: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternationalPick {
    pub place: String,
    pub country: String,
    pub reason: String,
    pub activity: String,
}

/// Destination recommendation by lacking element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelResult {
    pub element_analysis: String,
    pub domestic: DomesticPick,
    pub international: InternationalPick,
    pub travel_tip: String,
}

/// The three calamity years (entering, settling, leaving).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamjaeYears {
    pub deul: i32,
    pub nul: i32,
    pub nal: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamjaeAnalysis {
    pub meaning: String,
    pub caution: Vec<String>,
    pub remedy: String,
}

/// Three-calamity-years status reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamjaeResult {
    pub user_animal: String,
    pub current_status: String,
    pub years: SamjaeYears,
    pub analysis: SamjaeAnalysis,
    pub is_good_samjae: bool,
}

/// One variant per mode; carried opaquely by the orchestrator and read by
/// the presentation layer only when the result screen for that mode shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FortuneResult {
    Manse(ManseResult),
    Chongun(ChongunResult),
    Gunghap(GunghapResult),
    Lotto(LottoLuckResult),
    CelebMatch(CelebMatchResult),
    Travel(TravelResult),
    Samjae(SamjaeResult),
}

impl FortuneResult {
    /// The mode this payload belongs to.
    pub fn mode(&self) -> Mode {
        match self {
            FortuneResult::Manse(_) => Mode::Manse,
            FortuneResult::Chongun(_) => Mode::Chongun,
            FortuneResult::Gunghap(_) => Mode::Gunghap,
            FortuneResult::Lotto(_) => Mode::Lotto,
            FortuneResult::CelebMatch(_) => Mode::CelebMatch,
            FortuneResult::Travel(_) => Mode::Travel,
            FortuneResult::Samjae(_) => Mode::Samjae,
        }
    }
}
