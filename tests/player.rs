use glossviz_wasm::gloss::{
    ClipCommand, GlossMatch, GlossSession, IndexOptions, PlayerState, SequencePlayer,
};

fn entry(word: &str, urls: &[&str]) -> GlossMatch {
    GlossMatch {
        word: word.to_string(),
        urls: urls.iter().map(|u| u.to_string()).collect(),
    }
}

fn plays(commands: &[ClipCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            ClipCommand::Play { url, .. } => Some(url.as_str()),
            _ => None,
        })
        .collect()
}

fn prefetches(commands: &[ClipCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            ClipCommand::Prefetch(url) => Some(url.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn start_prefetches_everything_then_plays_first() {
    let mut player = SequencePlayer::new();
    let commands = player.start(vec![entry("book", &["b1", "b2"]), entry("drink", &["d1", "b1"])]);

    assert_eq!(prefetches(&commands), vec!["b1", "b2", "d1"]);
    assert_eq!(plays(&commands), vec!["b1"]);
    assert!(matches!(commands.last(), Some(ClipCommand::Play { .. })));
    assert_eq!(player.state(), PlayerState::Playing { entry: 0, url: 0 });
}

#[test]
fn rejected_url_falls_back_then_skips_entry() {
    let mut player = SequencePlayer::new();
    player.start(vec![entry("book", &["bad", "good"]), entry("drink", &["d1"])]);

    let first = player.current().unwrap();
    let next = player.play_rejected(first);
    assert_eq!(plays(&next), vec!["good"]);

    let second = player.current().unwrap();
    let next = player.play_rejected(second);
    assert_eq!(plays(&next), vec!["d1"]);
    assert_eq!(player.state(), PlayerState::Playing { entry: 1, url: 0 });

    let last = player.current().unwrap();
    assert!(player.play_rejected(last).is_empty());
    assert_eq!(player.state(), PlayerState::Finished);
}

#[test]
fn ended_clip_advances_to_next_entry() {
    let mut player = SequencePlayer::new();
    player.start(vec![entry("book", &["b1", "b2"]), entry("drink", &["d1"])]);

    let attempt = player.current().unwrap();
    assert_eq!(plays(&player.clip_ended(attempt)), vec!["d1"]);

    let attempt = player.current().unwrap();
    assert!(player.clip_ended(attempt).is_empty());
    assert_eq!(player.state(), PlayerState::Finished);
}

#[test]
fn stale_events_after_restart_are_ignored() {
    let mut player = SequencePlayer::new();
    player.start(vec![entry("book", &["b1", "b2"])]);
    let old = player.current().unwrap();

    player.start(vec![entry("drink", &["d1", "d2"])]);
    let fresh = player.current().unwrap();
    assert_ne!(old, fresh);

    assert!(player.play_rejected(old).is_empty());
    assert!(player.clip_ended(old).is_empty());
    assert_eq!(player.current(), Some(fresh));
}

#[test]
fn duplicate_event_for_same_attempt_does_not_skip_twice() {
    let mut player = SequencePlayer::new();
    player.start(vec![entry("a", &["a1"]), entry("b", &["b1"]), entry("c", &["c1"])]);

    let attempt = player.current().unwrap();
    player.clip_ended(attempt);
    assert!(player.clip_ended(attempt).is_empty());
    assert_eq!(player.state(), PlayerState::Playing { entry: 1, url: 0 });
}

#[test]
fn empty_queue_finishes_immediately() {
    let mut player = SequencePlayer::new();
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.start(Vec::new()).is_empty());
    assert_eq!(player.state(), PlayerState::Finished);
    assert_eq!(player.current(), None);
}

#[test]
fn stop_cancels_and_returns_to_idle() {
    let mut player = SequencePlayer::new();
    player.start(vec![entry("book", &["b1"])]);
    let attempt = player.current().unwrap();

    assert_eq!(player.stop(), vec![ClipCommand::Stop]);
    assert_eq!(player.state(), PlayerState::Idle);
    assert!(player.queue().is_empty());
    assert!(player.clip_ended(attempt).is_empty());
}

#[test]
fn session_request_drives_the_player() {
    let mut session = GlossSession::new(IndexOptions::default());
    session.load(r#"[{"gloss": "book", "instances": [{"url": "b.mp4"}]}]"#);

    let commands = session.request("the book");
    assert_eq!(prefetches(&commands), vec!["b.mp4"]);
    assert_eq!(plays(&commands), vec!["b.mp4"]);

    assert_eq!(session.teardown(), vec![ClipCommand::Stop]);
    assert_eq!(session.player_state(), PlayerState::Idle);
    assert!(session.index().is_empty());
}

#[test]
fn failed_url_is_tried_once_before_its_fallback_finishes_the_queue() {
    let mut player = SequencePlayer::new();
    let mut played = Vec::new();

    let commands = player.start(vec![entry("book", &["bad.mp4", "good.mp4"])]);
    played.extend(plays(&commands).into_iter().map(String::from));

    let bad = player.current().unwrap();
    let commands = player.play_rejected(bad);
    played.extend(plays(&commands).into_iter().map(String::from));

    let good = player.current().unwrap();
    let commands = player.clip_ended(good);
    played.extend(plays(&commands).into_iter().map(String::from));

    assert_eq!(played, vec!["bad.mp4", "good.mp4"]);
    assert_eq!(player.state(), PlayerState::Finished);
}

#[test]
fn suspended_session_keeps_its_index() {
    let mut session = GlossSession::new(IndexOptions::default());
    session.load(r#"[{"gloss": "book", "instances": [{"url": "b.mp4"}]}]"#);
    session.request("book");

    assert_eq!(session.suspend(), vec![ClipCommand::Stop]);
    assert_eq!(session.player_state(), PlayerState::Idle);
    assert!(session.index().get("book").is_some());

    // Back from the page cache: lookups still hit.
    assert_eq!(plays(&session.request("book")), vec!["b.mp4"]);
}
