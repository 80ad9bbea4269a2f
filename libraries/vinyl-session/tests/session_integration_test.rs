//! Integration tests for the session engine
//!
//! Full scenarios: vote-driven auto-skip, skip-vote quorums, cooldown
//! windows, permission gating, and queue exhaustion.

use std::rc::Rc;
use std::time::Duration;
use vinyl_core::types::{ListenerId, SourcePlatform, Track};
use vinyl_core::ManualClock;
use vinyl_playback::{PlaybackState, ProgressConfig, TickOutcome};
use vinyl_session::{
    EntryStatus, QueuePermission, SessionConfig, SessionError, SessionEvent, SessionManager,
    SkipReason, VoteDirection,
};

fn track(title: &str) -> Track {
    Track::new(title, "Artist", "3:30", SourcePlatform::SoundCloud)
}

fn listener(name: &str) -> ListenerId {
    ListenerId::new(name)
}

fn session_with_clock(config: SessionConfig) -> (SessionManager, Rc<ManualClock>, ListenerId) {
    let clock = Rc::new(ManualClock::new());
    let host = listener("host");
    let session = SessionManager::with_clock(config, host.clone(), clock.clone());
    (session, clock, host)
}

#[test]
fn two_downvotes_of_four_listeners_auto_advance() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());
    session.set_listener_count(4);

    let a = session.add_track(track("A"), &host).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.add_track(track("C"), &host).unwrap();
    session.play().unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);

    // Build up some skip votes against A to verify they reset on advance
    session.skip_vote(&listener("l1")).unwrap();
    assert_eq!(session.skip_vote_count(), 1);

    // Threshold is ceil(4 * 0.5) = 2: one downvote is not enough
    session.vote(&a, &listener("l1"), VoteDirection::Down).unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);

    // Second distinct downvote crosses it
    session.vote(&a, &listener("l2"), VoteDirection::Down).unwrap();

    let current = session.current_entry().unwrap();
    assert_eq!(current.id, b);

    // A moved to history, skip tally reset for B
    let played: Vec<_> = session.played().map(|entry| entry.id.clone()).collect();
    assert_eq!(played, vec![a.clone()]);
    assert_eq!(session.skip_vote_count(), 0);

    let events = session.take_events();
    assert!(events.iter().any(|event| matches!(
        event,
        SessionEvent::TrackSkipped { entry_id, reason: SkipReason::Downvotes } if *entry_id == a
    )));
}

#[test]
fn duplicate_vote_rejected_without_changing_counts() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());
    session.set_listener_count(10);

    let a = session.add_track(track("A"), &host).unwrap();
    session.play().unwrap();

    let alice = listener("alice");
    session.vote(&a, &alice, VoteDirection::Down).unwrap();

    let result = session.vote(&a, &alice, VoteDirection::Up);
    assert!(matches!(result, Err(SessionError::AlreadyVoted)));

    let tally = session.current_entry().unwrap().votes;
    assert_eq!(tally.down, 1);
    assert_eq!(tally.up, 0);
}

#[test]
fn skip_vote_quorum_advances() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());
    session.set_listener_count(4);

    let a = session.add_track(track("A"), &host).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.play().unwrap();

    session.skip_vote(&listener("l1")).unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);

    // Same listener cannot push the tally alone
    assert!(matches!(
        session.skip_vote(&listener("l1")),
        Err(SessionError::AlreadyVoted)
    ));

    session.skip_vote(&listener("l2")).unwrap();
    assert_eq!(session.current_entry().unwrap().id, b);
}

#[test]
fn cooldown_blocks_then_allows() {
    let config = SessionConfig {
        cooldown_seconds: 60,
        ..SessionConfig::default()
    };
    let (mut session, clock, host) = session_with_clock(config);
    let submitter = listener("crate-digger");

    session.add_track(track("First"), &submitter).unwrap();

    // 10 seconds later: still cooling down, with the wait reported
    clock.advance(Duration::from_secs(10));
    match session.add_track(track("Too Soon"), &submitter) {
        Err(SessionError::CooldownActive { remaining }) => {
            assert_eq!(remaining, Duration::from_secs(50));
        }
        other => panic!("expected CooldownActive, got {:?}", other),
    }

    // Another listener is unaffected
    session.add_track(track("Other"), &host).unwrap();

    // 61 seconds after the first add: allowed again
    clock.advance(Duration::from_secs(51));
    session.add_track(track("Second"), &submitter).unwrap();
    assert_eq!(session.upcoming().len(), 3);
}

#[test]
fn host_only_permission_gates_queue_adds() {
    let config = SessionConfig {
        queue_permission: QueuePermission::HostOnly,
        ..SessionConfig::default()
    };
    let (mut session, _clock, host) = session_with_clock(config);

    session.add_track(track("Host Pick"), &host).unwrap();

    let result = session.add_track(track("Denied"), &listener("guest"));
    assert!(matches!(result, Err(SessionError::PermissionDenied(_))));
    assert_eq!(session.upcoming().len(), 1);
}

#[test]
fn followers_permission_checks_membership() {
    let config = SessionConfig {
        queue_permission: QueuePermission::Followers,
        ..SessionConfig::default()
    };
    let (mut session, _clock, _host) = session_with_clock(config);

    let fan = listener("fan");
    let stranger = listener("stranger");
    session.add_follower(fan.clone());

    session.add_track(track("Fan Pick"), &fan).unwrap();
    assert!(matches!(
        session.add_track(track("Denied"), &stranger),
        Err(SessionError::PermissionDenied(_))
    ));
}

#[test]
fn advance_on_empty_queue_is_noop() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());

    let a = session.add_track(track("A"), &host).unwrap();
    session.play().unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);

    // Queue drained; advance must not touch current or history
    let result = session.advance();
    assert!(matches!(result, Err(SessionError::QueueExhausted)));
    assert_eq!(session.current_entry().unwrap().id, a);
    assert_eq!(session.played().count(), 0);
}

#[test]
fn advance_skips_over_non_ready_entries_in_place() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());

    let stuck = session.add_track(track("Buffering"), &host).unwrap();
    let ready = session.add_track(track("Ready"), &host).unwrap();
    session.set_entry_status(&stuck, EntryStatus::Buffering).unwrap();

    session.play().unwrap();
    assert_eq!(session.current_entry().unwrap().id, ready);

    // The buffering entry kept its queue slot
    assert_eq!(session.upcoming().len(), 1);
    assert_eq!(session.upcoming()[0].id, stuck);

    // Once it resolves, it plays
    session.set_entry_status(&stuck, EntryStatus::Ready).unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_entry().unwrap().id, stuck);
}

#[test]
fn tick_saturation_advances_then_halts_when_exhausted() {
    let host = listener("host");
    let mut session = SessionManager::new(SessionConfig::default(), host.clone())
        .with_progress_config(ProgressConfig {
            step: 50.0,
            ..ProgressConfig::default()
        });

    let a = session.add_track(track("A"), &host).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.play().unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);
    session.take_events();

    // Two ticks finish A and advance to B
    session.tick();
    assert_eq!(session.tick(), TickOutcome::Saturated);
    assert_eq!(session.current_entry().unwrap().id, b);
    assert_eq!(session.progress(), 0.0);

    // B finishes with nothing queued: halt at 100, B still current
    session.tick();
    session.tick();
    assert_eq!(session.progress(), 100.0);
    assert_eq!(session.state(), PlaybackState::Stopped);
    assert_eq!(session.current_entry().unwrap().id, b);
    assert!(session
        .take_events()
        .iter()
        .any(|event| matches!(event, SessionEvent::QueueExhausted)));

    // Re-poll after the queue refills
    let c = session.add_track(track("C"), &host).unwrap();
    session.advance().unwrap();
    assert_eq!(session.current_entry().unwrap().id, c);

    // B went to history when re-polled
    assert!(session.played().any(|entry| entry.id == b));
}

#[test]
fn shrinking_room_recomputes_threshold_and_skips() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());
    session.set_listener_count(10);

    let a = session.add_track(track("A"), &host).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.play().unwrap();

    // Two downvotes: below the threshold of 5
    session.vote(&a, &listener("l1"), VoteDirection::Down).unwrap();
    session.vote(&a, &listener("l2"), VoteDirection::Down).unwrap();
    assert_eq!(session.current_entry().unwrap().id, a);

    // The room empties out; threshold drops to 2 and the skip fires
    session.set_listener_count(4);
    assert_eq!(session.current_entry().unwrap().id, b);
}

#[test]
fn pause_freezes_session_progress() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());

    session.add_track(track("A"), &host).unwrap();
    session.play().unwrap();

    session.tick();
    session.tick();
    let frozen = session.progress();
    assert!(frozen > 0.0);

    session.pause();
    assert_eq!(session.tick(), TickOutcome::Idle);
    assert_eq!(session.progress(), frozen);

    session.play().unwrap();
    session.tick();
    assert!(session.progress() > frozen);
}

#[test]
fn previous_restores_played_entry_with_clean_slate() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());
    session.set_listener_count(4);

    let a = session.add_track(track("A"), &host).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.play().unwrap();
    session.vote(&a, &listener("l1"), VoteDirection::Up).unwrap();

    session.advance().unwrap();
    assert_eq!(session.current_entry().unwrap().id, b);

    session.previous().unwrap();
    let current = session.current_entry().unwrap();
    assert_eq!(current.id, a);
    // Votes reset per track, not carried back
    assert_eq!(current.votes.up, 0);

    // B returned to the front of the queue
    assert_eq!(session.upcoming()[0].id, b);

    // Nothing further back
    assert!(matches!(session.previous(), Err(SessionError::HistoryEmpty)));
}

#[test]
fn removing_current_entry_advances() {
    let (mut session, _clock, host) = session_with_clock(SessionConfig::default());

    let a = session.add_track(track("A"), &listener("submitter")).unwrap();
    let b = session.add_track(track("B"), &host).unwrap();
    session.play().unwrap();

    // A stranger cannot remove someone else's entry
    assert!(matches!(
        session.remove_entry(&a, &listener("stranger")),
        Err(SessionError::PermissionDenied(_))
    ));
    assert_eq!(session.current_entry().unwrap().id, a);

    // The host can; playback moves on and A does not enter history
    let removed = session.remove_entry(&a, &host).unwrap();
    assert_eq!(removed.id, a);
    assert_eq!(session.current_entry().unwrap().id, b);
    assert_eq!(session.played().count(), 0);
}
