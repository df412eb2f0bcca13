//! Screen - process-wide UI state, one active per session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exactly one screen is active at a time. Created at app start, discarded
/// at tab close; the orchestrator is its only writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    Auth,
    Profile,
    Hub,
    Input,
    Loading,
    Result,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Welcome,
        Screen::Auth,
        Screen::Profile,
        Screen::Hub,
        Screen::Input,
        Screen::Loading,
        Screen::Result,
    ];
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Screen::Welcome => "welcome",
            Screen::Auth => "auth",
            Screen::Profile => "profile",
            Screen::Hub => "hub",
            Screen::Input => "input",
            Screen::Loading => "loading",
            Screen::Result => "result",
        };
        write!(f, "{}", label)
    }
}

/// Where a failed fetch lands the user. The hub is the default for the
/// multi-mode app; the input variant matches the pre-hub single-flow build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryScreen {
    #[default]
    Hub,
    Input,
}

impl RecoveryScreen {
    pub fn screen(&self) -> Screen {
        match self {
            RecoveryScreen::Hub => Screen::Hub,
            RecoveryScreen::Input => Screen::Input,
        }
    }
}
