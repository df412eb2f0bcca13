//! End-to-end session flows against a scripted oracle.
//!
//! These cover the orchestrator's externally observable laws: the happy
//! path, failure recovery, the returning-user shortcut, the auth race
//! rules, and staleness of superseded attempts.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;
use tokio::time::sleep;

use dangchat_core::types::{ChongunResult, ChongunSections, LottoLuckResult};
use dangchat_core::{
    AuthIdentity, BirthTime, CalendarType, FortuneResult, Gender, Mode, OracleError,
    OracleGateway, OracleRequest, SajuProfile, Screen,
};
use dangchat_runtime::{SessionEvent, SessionOrchestrator};
use dangchat_stores::{AuthEvent, InMemoryProfileStore, ProfileStore, StoreError};

enum Reply {
    Ok(FortuneResult),
    Err(String),
    /// Held back until the gate is notified; lets a test order settlements.
    GatedOk(Arc<Notify>, FortuneResult),
}

struct MockOracle {
    replies: Mutex<VecDeque<Reply>>,
}

impl MockOracle {
    fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl OracleGateway for MockOracle {
    async fn fetch(&self, _request: OracleRequest) -> Result<FortuneResult, OracleError> {
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected oracle fetch");
        match reply {
            Reply::Ok(result) => Ok(result),
            Reply::Err(message) => Err(OracleError::Http(message)),
            Reply::GatedOk(gate, result) => {
                gate.notified().await;
                Ok(result)
            }
        }
    }
}

struct FailingStore;

#[async_trait]
impl ProfileStore for FailingStore {
    async fn get(&self, _identity_id: &str) -> Result<Option<SajuProfile>, StoreError> {
        Ok(None)
    }

    async fn put(&self, _identity_id: &str, _profile: &SajuProfile) -> Result<(), StoreError> {
        Err(StoreError::Connection("store offline".to_string()))
    }
}

fn kim() -> SajuProfile {
    SajuProfile::new(
        "Kim",
        Gender::Female,
        NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
        BirthTime::Unknown,
        CalendarType::Solar,
        "Seoul",
    )
}

fn lee() -> SajuProfile {
    SajuProfile::new(
        "Lee",
        Gender::Male,
        NaiveDate::from_ymd_opt(1987, 2, 17).unwrap(),
        BirthTime::Unknown,
        CalendarType::Lunar,
        "Incheon",
    )
}

fn lotto_luck(reason: &str) -> FortuneResult {
    FortuneResult::Lotto(LottoLuckResult {
        lucky_numbers: vec![3, 14, 21, 28, 35, 44],
        lucky_color: "blue".to_string(),
        direction: "east".to_string(),
        reason: reason.to_string(),
    })
}

fn chongun(name: &str) -> FortuneResult {
    FortuneResult::Chongun(ChongunResult {
        user_name: name.to_string(),
        summary: "summary".to_string(),
        keywords: vec![],
        sections: ChongunSections {
            self_view: String::new(),
            others_view: String::new(),
            talent: String::new(),
            wealth: String::new(),
            love: String::new(),
            work: String::new(),
            health: String::new(),
        },
        advice: "advice".to_string(),
    })
}

fn signed_in(id: &str, cached: Option<SajuProfile>) -> AuthEvent {
    AuthEvent::SignedIn {
        identity: AuthIdentity::new(id),
        cached_profile: cached,
    }
}

fn orchestrator(
    replies: Vec<Reply>,
) -> (Arc<SessionOrchestrator>, Arc<InMemoryProfileStore>) {
    let store = Arc::new(InMemoryProfileStore::new());
    let orchestrator = Arc::new(SessionOrchestrator::new(
        MockOracle::new(replies),
        store.clone(),
    ));
    (orchestrator, store)
}

#[tokio::test]
async fn guest_lotto_submit_reaches_result() {
    let (orch, _store) = orchestrator(vec![Reply::Ok(lotto_luck("부족한 수 기운"))]);

    orch.enter().await.unwrap();
    assert_eq!(orch.select_mode(Mode::Lotto).await.unwrap(), Screen::Input);

    let settled = orch.submit_profile(kim(), None).await.unwrap();
    assert_eq!(settled, Screen::Result);

    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Result);
    assert_eq!(snapshot.mode, Some(Mode::Lotto));
    match snapshot.result_for(Mode::Lotto) {
        Some(FortuneResult::Lotto(luck)) => assert_eq!(luck.reason, "부족한 수 기운"),
        other => panic!("unexpected cache: {:?}", other),
    }
}

#[tokio::test]
async fn fetch_failure_recovers_to_hub_and_retains_profile() {
    let (orch, _store) = orchestrator(vec![Reply::Err("connection reset".to_string())]);

    orch.enter().await.unwrap();
    orch.select_mode(Mode::Chongun).await.unwrap();
    let settled = orch.submit_profile(kim(), None).await.unwrap();
    assert_eq!(settled, Screen::Hub);

    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Hub);
    // The submitted profile is retained so the user need not re-enter it.
    assert_eq!(snapshot.active_profile.as_ref().unwrap().name, "Kim");
    assert!(snapshot.result_for(Mode::Chongun).is_none());
    let notice = snapshot.notice.expect("failure must surface a notice");
    assert!(notice.message.contains("connection reset"));

    orch.dismiss_notice().await;
    assert!(orch.snapshot().await.notice.is_none());
}

#[tokio::test]
async fn reset_twice_equals_reset_once() {
    let (orch, _store) = orchestrator(vec![Reply::Ok(chongun("Kim"))]);

    orch.enter().await.unwrap();
    orch.select_mode(Mode::Chongun).await.unwrap();
    orch.submit_profile(kim(), None).await.unwrap();

    orch.reset().await.unwrap();
    orch.reset().await.unwrap();

    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Hub);
    assert!(snapshot.results.is_empty());
    assert_eq!(snapshot.active_profile.as_ref().unwrap().name, "Kim");
}

#[tokio::test]
async fn cached_profile_shortcut_never_visits_input() {
    let (orch, _store) = orchestrator(vec![Reply::Ok(chongun("Lee"))]);
    let mut rx = orch.subscribe();

    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    let settled = orch.select_mode(Mode::Chongun).await.unwrap();
    assert_eq!(settled, Screen::Result);

    let mut screens = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let SessionEvent::ScreenChanged { screen } = event {
            screens.push(screen);
        }
    }
    assert_eq!(screens, vec![Screen::Hub, Screen::Loading, Screen::Result]);
    assert!(!screens.contains(&Screen::Input));
}

#[tokio::test]
async fn gunghap_routes_through_input_even_with_cached_profile() {
    let (orch, _store) = orchestrator(vec![]);

    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    let settled = orch.select_mode(Mode::Gunghap).await.unwrap();
    assert_eq!(settled, Screen::Input);
    assert_eq!(orch.screen().await, Screen::Input);
}

#[tokio::test]
async fn signed_in_during_input_leaves_the_form_alone() {
    let (orch, _store) = orchestrator(vec![Reply::Ok(chongun("Kim"))]);

    orch.enter().await.unwrap();
    orch.select_mode(Mode::Chongun).await.unwrap();
    assert_eq!(orch.screen().await, Screen::Input);

    // Background auth refresh mid-form: the screen must not move.
    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Input);
    assert_eq!(snapshot.identity.as_ref().unwrap().id, "uid-lee");

    // The flow completes as a normal submission afterwards.
    let settled = orch.submit_profile(kim(), None).await.unwrap();
    assert_eq!(settled, Screen::Result);
}

#[tokio::test]
async fn stale_attempt_never_clobbers_the_new_result() {
    let gate = Arc::new(Notify::new());
    let (orch, _store) = orchestrator(vec![
        Reply::GatedOk(gate.clone(), lotto_luck("stale")),
        Reply::Ok(lotto_luck("fresh")),
    ]);

    orch.enter().await.unwrap();
    orch.select_mode(Mode::Lotto).await.unwrap();

    let first = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move { orch.submit_profile(kim(), None).await })
    };
    while orch.screen().await != Screen::Loading {
        sleep(Duration::from_millis(2)).await;
    }

    // The user abandons the outstanding fetch and starts over.
    orch.reset().await.unwrap();
    orch.select_mode(Mode::Lotto).await.unwrap();
    let settled = orch.submit_profile(kim(), None).await.unwrap();
    assert_eq!(settled, Screen::Result);

    // Now the superseded attempt resolves; it must be a no-op.
    gate.notify_one();
    first.await.unwrap().unwrap();

    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Result);
    match snapshot.result_for(Mode::Lotto) {
        Some(FortuneResult::Lotto(luck)) => assert_eq!(luck.reason, "fresh"),
        other => panic!("unexpected cache: {:?}", other),
    }
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let gate = Arc::new(Notify::new());
    let (orch, _store) = orchestrator(vec![Reply::GatedOk(gate.clone(), chongun("Kim"))]);

    orch.enter().await.unwrap();
    orch.select_mode(Mode::Chongun).await.unwrap();

    let first = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move { orch.submit_profile(kim(), None).await })
    };
    while orch.screen().await != Screen::Loading {
        sleep(Duration::from_millis(2)).await;
    }

    assert!(orch.submit_profile(kim(), None).await.is_err());

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), Screen::Result);
}

#[tokio::test]
async fn signed_out_while_editing_profile_returns_to_hub() {
    let (orch, _store) = orchestrator(vec![]);

    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    orch.open_profile().await.unwrap();
    assert_eq!(orch.screen().await, Screen::Profile);

    orch.handle_auth_event(AuthEvent::SignedOut).await;
    let snapshot = orch.snapshot().await;
    assert_eq!(snapshot.screen, Screen::Hub);
    assert!(snapshot.identity.is_none());
    assert!(snapshot.home_profile.is_none());
}

#[tokio::test]
async fn new_account_creates_a_profile_and_persists_it() {
    let (orch, store) = orchestrator(vec![]);

    orch.enter().await.unwrap();
    orch.request_login().await.unwrap();
    orch.handle_auth_event(signed_in("uid-new", None)).await;
    assert_eq!(orch.screen().await, Screen::Input);

    let settled = orch.submit_profile(kim(), None).await.unwrap();
    assert_eq!(settled, Screen::Hub);

    let stored = store.get("uid-new").await.unwrap().expect("profile stored");
    assert_eq!(stored.name, "Kim");
}

#[tokio::test]
async fn successful_fetch_persists_profile_for_signed_in_user() {
    let (orch, store) = orchestrator(vec![Reply::Ok(chongun("Lee"))]);

    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    let settled = orch.select_mode(Mode::Chongun).await.unwrap();
    assert_eq!(settled, Screen::Result);

    // Persistence is fire-and-forget; poll briefly for the spawned write.
    let mut stored = None;
    for _ in 0..100 {
        if let Some(profile) = store.get("uid-lee").await.unwrap() {
            stored = Some(profile);
            break;
        }
        sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(stored.expect("profile persisted").name, "Lee");
}

#[tokio::test]
async fn persistence_failure_never_blocks_the_result_screen() {
    let orch = Arc::new(SessionOrchestrator::new(
        MockOracle::new(vec![Reply::Ok(chongun("Lee"))]),
        Arc::new(FailingStore),
    ));

    orch.handle_auth_event(signed_in("uid-lee", Some(lee()))).await;
    let settled = orch.select_mode(Mode::Chongun).await.unwrap();

    assert_eq!(settled, Screen::Result);
    assert_eq!(orch.screen().await, Screen::Result);
    assert!(orch.snapshot().await.notice.is_none());
}
