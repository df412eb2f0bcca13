//! Pure screen transitions.
//!
//! Every operation is a plain function over `SessionState`: validate,
//! guard, mutate, report what effect (if any) the shell must run. Nothing
//! here is async and nothing touches the network, so the race rules are
//! unit-testable without a UI or a runtime.

use thiserror::Error;

use dangchat_core::{
    mode_spec, FortuneResult, Mode, OracleRequest, ProfileArity, RecoveryScreen, SajuProfile,
    Screen, ValidationError,
};
use dangchat_stores::AuthEvent;

use crate::state::{Attempt, AttemptToken, Notice, SessionState};

/// Rejected transitions. Validation failures leave the screen untouched;
/// illegal-origin calls are programming or double-tap artifacts and are
/// simply refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{op} is not legal from the {screen} screen")]
    IllegalFrom { op: &'static str, screen: Screen },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a {0} fetch is already in flight")]
    AlreadyInFlight(Mode),
}

fn guard(op: &'static str, screen: Screen, allowed: &[Screen]) -> Result<(), TransitionError> {
    if allowed.contains(&screen) {
        Ok(())
    } else {
        Err(TransitionError::IllegalFrom { op, screen })
    }
}

/// WELCOME → HUB. Always legal from the welcome screen.
pub fn enter(state: &mut SessionState) -> Result<(), TransitionError> {
    guard("enter", state.screen, &[Screen::Welcome])?;
    state.screen = Screen::Hub;
    Ok(())
}

/// WELCOME | HUB → AUTH, remembering where we came from for back().
pub fn request_login(state: &mut SessionState) -> Result<(), TransitionError> {
    guard("request_login", state.screen, &[Screen::Welcome, Screen::Hub])?;
    state.auth_return = Some(state.screen);
    state.screen = Screen::Auth;
    Ok(())
}

/// AUTH → HUB.
pub fn cancel_auth(state: &mut SessionState) -> Result<(), TransitionError> {
    guard("cancel_auth", state.screen, &[Screen::Auth])?;
    state.auth_return = None;
    state.screen = Screen::Hub;
    Ok(())
}

/// INPUT | PROFILE → HUB; AUTH → wherever AUTH was entered from.
pub fn back(state: &mut SessionState) -> Result<(), TransitionError> {
    match state.screen {
        Screen::Input => {
            state.mode = None;
            state.screen = Screen::Hub;
            Ok(())
        }
        Screen::Profile => {
            state.screen = Screen::Hub;
            Ok(())
        }
        Screen::Auth => {
            state.screen = state.auth_return.take().unwrap_or(Screen::Welcome);
            Ok(())
        }
        screen => Err(TransitionError::IllegalFrom { op: "back", screen }),
    }
}

/// HUB → PROFILE when signed in; editing a profile requires an identity,
/// so guests are routed to AUTH instead.
pub fn open_profile(state: &mut SessionState) -> Result<(), TransitionError> {
    guard("open_profile", state.screen, &[Screen::Hub])?;
    if state.identity.is_some() {
        state.screen = Screen::Profile;
    } else {
        state.auth_return = Some(Screen::Hub);
        state.screen = Screen::Auth;
    }
    Ok(())
}

/// PROFILE → HUB, replacing the working profile. The shell persists it.
pub fn save_profile(
    state: &mut SessionState,
    profile: SajuProfile,
) -> Result<(), TransitionError> {
    guard("save_profile", state.screen, &[Screen::Profile])?;
    profile.validate()?;
    state.active_profile = Some(profile);
    state.screen = Screen::Hub;
    Ok(())
}

/// What `select_mode` decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Route through the input form.
    RouteToInput,
    /// Returning-user shortcut: skip INPUT, submit this profile now.
    Shortcut(SajuProfile),
}

/// HUB → INPUT, unless the returning-user shortcut applies: an identity
/// with a complete profile and a single-profile mode goes straight to the
/// fetch. The pair mode always routes through its two-party form, and
/// guests never shortcut.
pub fn select_mode(state: &mut SessionState, mode: Mode) -> Result<SelectOutcome, TransitionError> {
    guard("select_mode", state.screen, &[Screen::Hub])?;
    state.mode = Some(mode);

    if mode_spec(mode).arity == ProfileArity::Single && state.identity.is_some() {
        if let Some(profile) = state.shortcut_profile() {
            // Screen stays HUB; begin_submit moves it to LOADING so the
            // sequence is HUB → LOADING with INPUT never visited.
            return Ok(SelectOutcome::Shortcut(profile.clone()));
        }
    }

    state.screen = Screen::Input;
    Ok(SelectOutcome::RouteToInput)
}

/// What `begin_submit` decided; the shell runs the effect.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Issue this oracle fetch; the state is LOADING with the attempt armed.
    Fetch(OracleRequest),
    /// No-call mode: straight to RESULT, nothing fetched or cached.
    Direct,
    /// No mode was active: this was the create-profile flow out of signup.
    ProfileSaved,
}

/// INPUT (or the HUB shortcut) → LOADING | RESULT | HUB.
///
/// Validates first - an incomplete profile is rejected before any fetch and
/// the screen does not change. Profiles are recorded by full replacement.
pub fn begin_submit(
    state: &mut SessionState,
    profile: SajuProfile,
    partner: Option<SajuProfile>,
    token: AttemptToken,
) -> Result<SubmitOutcome, TransitionError> {
    guard("submit_profile", state.screen, &[Screen::Input, Screen::Hub])?;
    profile.validate()?;

    let Some(mode) = state.mode else {
        if state.screen == Screen::Input {
            state.active_profile = Some(profile);
            state.screen = Screen::Hub;
            return Ok(SubmitOutcome::ProfileSaved);
        }
        return Err(ValidationError::NoModeSelected.into());
    };

    let spec = mode_spec(mode);
    let partner = match spec.arity {
        ProfileArity::Pair => {
            let partner = partner.ok_or(ValidationError::MissingPartner(mode))?;
            partner.validate()?;
            Some(partner)
        }
        ProfileArity::Single => None,
    };

    // At most one in-flight fetch per (session, mode): a second submit for
    // the same mode is refused until the first settles.
    if let Some(attempt) = &state.in_flight {
        if attempt.mode == mode {
            return Err(TransitionError::AlreadyInFlight(mode));
        }
    }

    state.active_profile = Some(profile.clone());
    state.partner_profile = partner.clone();

    if !spec.requires_oracle {
        state.screen = Screen::Result;
        return Ok(SubmitOutcome::Direct);
    }

    state.screen = Screen::Loading;
    state.in_flight = Some(Attempt { mode, token });
    let request = match partner {
        Some(partner) => OracleRequest::pair(mode, profile, partner),
        None => OracleRequest::single(mode, profile),
    };
    Ok(SubmitOutcome::Fetch(request))
}

/// Whether a settlement was applied or arrived too late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// The settlement committed; this is the screen it landed on.
    Committed(Screen),
    /// The attempt was superseded (reset or re-submit); nothing changed.
    Stale,
}

/// Success settlement: LOADING → RESULT and the payload is committed,
/// provided the attempt token is still the current one.
pub fn settle_success(
    state: &mut SessionState,
    token: AttemptToken,
    result: FortuneResult,
) -> SettleOutcome {
    match state.in_flight {
        Some(attempt) if attempt.token == token => {
            state.in_flight = None;
            state.results.insert(result);
            state.screen = Screen::Result;
            SettleOutcome::Committed(Screen::Result)
        }
        _ => SettleOutcome::Stale,
    }
}

/// Failure settlement: LOADING → the configured recovery screen with a
/// dismissible notice; the submitted profile is retained for resubmission.
pub fn settle_failure(
    state: &mut SessionState,
    token: AttemptToken,
    message: String,
    recovery: RecoveryScreen,
) -> SettleOutcome {
    match state.in_flight {
        Some(attempt) if attempt.token == token => {
            state.in_flight = None;
            state.notice = Some(Notice { message });
            state.screen = recovery.screen();
            SettleOutcome::Committed(state.screen)
        }
        _ => SettleOutcome::Stale,
    }
}

/// RESULT | LOADING → HUB. Clears every per-mode result (fresh reads are
/// required on the next visit) and disarms any outstanding attempt, so a
/// late settlement lands stale. The last submitted profile is retained.
/// Idempotent: from HUB it is a no-op.
pub fn reset(state: &mut SessionState) -> Result<(), TransitionError> {
    guard("reset", state.screen, &[Screen::Result, Screen::Loading, Screen::Hub])?;
    state.screen = Screen::Hub;
    state.mode = None;
    state.results.clear();
    state.in_flight = None;
    state.notice = None;
    Ok(())
}

/// Clear the surfaced notice without moving.
pub fn dismiss_notice(state: &mut SessionState) {
    state.notice = None;
}

// ---------------------------------------------------------------------------
// Auth reconciliation
// ---------------------------------------------------------------------------

/// Classification of an auth notification for the precedence table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    SignedInWithProfile,
    SignedInNewAccount,
    SignedOut,
}

impl AuthKind {
    pub fn of(event: &AuthEvent) -> Self {
        match event {
            AuthEvent::SignedIn {
                cached_profile: Some(_),
                ..
            } => AuthKind::SignedInWithProfile,
            AuthEvent::SignedIn { .. } => AuthKind::SignedInNewAccount,
            AuthEvent::SignedOut => AuthKind::SignedOut,
        }
    }
}

/// What an auth event is allowed to do, given the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Adopt identity + stored profile and land on the hub.
    AdoptToHub,
    /// Adopt the new identity and open the profile-creation form.
    AdoptToInput,
    /// Adopt silently; the user is mid-flow and must not be moved.
    AdoptOnly,
    /// Drop identity state; the screen keeps its place.
    ClearOnly,
    /// Drop identity state and leave the now-invalid profile screen.
    ClearToHub,
}

/// The precedence table: `(event kind, current screen) → action`. Encoded
/// as data so it can be covered exhaustively; a background auth refresh can
/// never yank the user out of in-progress input because every mid-flow
/// screen maps to an adopt/clear-only action.
pub const AUTH_RULES: [((AuthKind, Screen), AuthAction); 21] = [
    ((AuthKind::SignedInWithProfile, Screen::Welcome), AuthAction::AdoptToHub),
    ((AuthKind::SignedInWithProfile, Screen::Auth), AuthAction::AdoptToHub),
    ((AuthKind::SignedInWithProfile, Screen::Profile), AuthAction::AdoptOnly),
    ((AuthKind::SignedInWithProfile, Screen::Hub), AuthAction::AdoptOnly),
    ((AuthKind::SignedInWithProfile, Screen::Input), AuthAction::AdoptOnly),
    ((AuthKind::SignedInWithProfile, Screen::Loading), AuthAction::AdoptOnly),
    ((AuthKind::SignedInWithProfile, Screen::Result), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Welcome), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Auth), AuthAction::AdoptToInput),
    ((AuthKind::SignedInNewAccount, Screen::Profile), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Hub), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Input), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Loading), AuthAction::AdoptOnly),
    ((AuthKind::SignedInNewAccount, Screen::Result), AuthAction::AdoptOnly),
    ((AuthKind::SignedOut, Screen::Welcome), AuthAction::ClearOnly),
    ((AuthKind::SignedOut, Screen::Auth), AuthAction::ClearOnly),
    ((AuthKind::SignedOut, Screen::Profile), AuthAction::ClearToHub),
    ((AuthKind::SignedOut, Screen::Hub), AuthAction::ClearOnly),
    ((AuthKind::SignedOut, Screen::Input), AuthAction::ClearOnly),
    ((AuthKind::SignedOut, Screen::Loading), AuthAction::ClearOnly),
    ((AuthKind::SignedOut, Screen::Result), AuthAction::ClearOnly),
];

/// Table lookup. Total over the enum product; the fallback only exists to
/// keep the signature non-panicking.
pub fn auth_action(kind: AuthKind, screen: Screen) -> AuthAction {
    AUTH_RULES
        .iter()
        .find(|((k, s), _)| *k == kind && *s == screen)
        .map(|(_, action)| *action)
        .unwrap_or(match kind {
            AuthKind::SignedOut => AuthAction::ClearOnly,
            _ => AuthAction::AdoptOnly,
        })
}

/// What an applied auth event did, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthOutcome {
    pub action: AuthAction,
    pub screen_changed: bool,
}

/// Apply one auth notification under the precedence table.
///
/// Re-delivery of an unchanged identity is idempotent: the identity and
/// stored-profile references refresh, but rules 1 and 2 never fire twice.
pub fn apply_auth(state: &mut SessionState, event: AuthEvent) -> AuthOutcome {
    let before = state.screen;
    match event {
        AuthEvent::SignedIn {
            identity,
            cached_profile,
        } => {
            let repeat = state.reacted_identity.as_deref() == Some(identity.id.as_str());
            let kind = if cached_profile.is_some() {
                AuthKind::SignedInWithProfile
            } else {
                AuthKind::SignedInNewAccount
            };
            let action = if repeat {
                AuthAction::AdoptOnly
            } else {
                auth_action(kind, state.screen)
            };

            state.reacted_identity = Some(identity.id.clone());
            state.identity = Some(identity);
            state.home_profile = cached_profile.clone();

            match action {
                AuthAction::AdoptToHub => {
                    state.active_profile = cached_profile;
                    state.auth_return = None;
                    state.screen = Screen::Hub;
                }
                AuthAction::AdoptToInput => {
                    state.mode = None;
                    state.auth_return = None;
                    state.screen = Screen::Input;
                }
                _ => {}
            }

            AuthOutcome {
                action,
                screen_changed: state.screen != before,
            }
        }
        AuthEvent::SignedOut => {
            state.identity = None;
            state.home_profile = None;
            state.reacted_identity = None;

            let action = auth_action(AuthKind::SignedOut, state.screen);
            if action == AuthAction::ClearToHub {
                state.screen = Screen::Hub;
            }

            AuthOutcome {
                action,
                screen_changed: state.screen != before,
            }
        }
    }
}
