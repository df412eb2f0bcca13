//! ModeRegistry - per-mode dispatch as a data table.
//!
//! Every mode declares how many profiles it takes and whether it performs an
//! Oracle round-trip. The orchestrator consults this table instead of
//! branching on the mode inline, so a new mode cannot forget a branch.

use serde::{Deserialize, Serialize};

use crate::types::Mode;

/// How many profiles a mode consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileArity {
    Single,
    Pair,
}

/// Static per-mode dispatch row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSpec {
    pub mode: Mode,
    pub arity: ProfileArity,
    /// Whether submitting this mode issues an Oracle fetch. Every current
    /// mode does (lotto via its luck enrichment); the false path is kept so
    /// a purely local mode slots in without touching the orchestrator.
    pub requires_oracle: bool,
}

const REGISTRY: [ModeSpec; 7] = [
    ModeSpec {
        mode: Mode::Manse,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::Chongun,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::Gunghap,
        arity: ProfileArity::Pair,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::Lotto,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::CelebMatch,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::Travel,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
    ModeSpec {
        mode: Mode::Samjae,
        arity: ProfileArity::Single,
        requires_oracle: true,
    },
];

/// Look up the dispatch row for a mode. Total: the table is indexed by an
/// exhaustive match, so a new `Mode` variant fails to compile until it gets
/// a row here.
pub fn mode_spec(mode: Mode) -> &'static ModeSpec {
    let index = match mode {
        Mode::Manse => 0,
        Mode::Chongun => 1,
        Mode::Gunghap => 2,
        Mode::Lotto => 3,
        Mode::CelebMatch => 4,
        Mode::Travel => 5,
        Mode::Samjae => 6,
    };
    &REGISTRY[index]
}

/// The full table, for exhaustive tests and catalog displays.
pub fn all_modes() -> &'static [ModeSpec] {
    &REGISTRY
}
