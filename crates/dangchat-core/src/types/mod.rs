//! Core type definitions
//!
//! Value objects shared by every crate in the workspace. All of them
//! round-trip through serde: profiles are persisted verbatim to the
//! ProfileStore and results arrive as strict JSON from the Oracle.

mod identity;
mod mode;
mod profile;
mod result;
mod screen;

pub use identity::AuthIdentity;
pub use mode::Mode;
pub use profile::{BirthTime, CalendarType, Gender, SajuProfile};
pub use result::{
    BranchGlyph, CelebMatchResult, ChongunResult, ChongunSections, DaewoonEntry, DomesticPick,
    FortuneResult, GunghapDetails, GunghapResult, InternationalPick, LottoLuckResult,
    ManseAnalysis, ManseResult, ManseUserInfo, OhaengBalance, Pillar, PillarAnalysis, PillarSet,
    SamjaeAnalysis, SamjaeResult, SamjaeYears, ShipseongBalance, StemGlyph, Strength,
    TravelResult,
};
pub use screen::{RecoveryScreen, Screen};
