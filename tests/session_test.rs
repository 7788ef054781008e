//! Tests for scoring sessions: timed toss and snapshot autosave.

use cricket_score::{
    Command, Dispatch, MatchResult, MatchSnapshot, Phase, Rejection, ScorerConfig, Session,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn config() -> ScorerConfig {
    ScorerConfig::from_toml(
        r#"
        default_overs = 1
        toss_delay_ms = 5
        "#,
    )
    .expect("valid config")
}

async fn play(session: &mut Session, tokens: &[&str]) {
    for token in tokens {
        let command = session.parse(token).expect("valid token");
        session.execute(command).await.expect("command executes");
    }
}

/// Team A makes 2, Team B makes 2 off the last ball.
const TIED_MATCH: &[&str] = &[
    "start", "2", "end", "0", "0", "0", "0", "0", "2",
];

#[tokio::test]
async fn test_toss_lands_after_delay() {
    let mut session = Session::new(&config()).with_rng(StdRng::seed_from_u64(3));
    play(&mut session, TIED_MATCH).await;
    assert_eq!(session.scorer().result(), Some(MatchResult::Tied));

    let dispatch = session.execute(Command::ResolveByToss).await.unwrap();
    assert_eq!(dispatch, Dispatch::Applied);
    assert_eq!(session.scorer().phase(), Phase::Complete);
    assert!(matches!(
        session.scorer().result(),
        Some(MatchResult::TossWon(_))
    ));
    assert!(session.scorer().result_text().unwrap().ends_with("WON by Coin Toss"));
}

#[tokio::test(start_paused = true)]
async fn test_toss_waits_for_configured_delay() {
    let config = config().with_toss_delay_ms(3000);
    let mut session = Session::new(&config).with_rng(StdRng::seed_from_u64(7));
    play(&mut session, TIED_MATCH).await;

    let before = tokio::time::Instant::now();
    let dispatch = session.execute(Command::ResolveByToss).await.unwrap();
    let waited = before.elapsed();

    assert_eq!(dispatch, Dispatch::Applied);
    assert!(waited >= Duration::from_millis(3000), "waited {:?}", waited);
    assert!(matches!(
        session.scorer().result(),
        Some(MatchResult::TossWon(_))
    ));
}

#[tokio::test]
async fn test_same_seed_same_toss_winner() {
    let mut winners = Vec::new();
    for _ in 0..2 {
        let mut session = Session::new(&config()).with_rng(StdRng::seed_from_u64(99));
        play(&mut session, TIED_MATCH).await;
        session.execute(Command::ResolveByToss).await.unwrap();
        winners.push(session.scorer().result());
    }
    assert_eq!(winners[0], winners[1]);
}

#[tokio::test]
async fn test_super_over_after_tie() {
    let mut session = Session::new(&config().with_overs(5));
    play(&mut session, &["start:2", "1", "end", "0", "0", "0", "0", "0", "0"]).await;
    for _ in 0..5 {
        play(&mut session, &["0"]).await;
    }
    play(&mut session, &["1"]).await;
    assert_eq!(session.scorer().result(), Some(MatchResult::Tied));

    play(&mut session, &["super"]).await;
    assert_eq!(session.scorer().phase(), Phase::FirstInnings);
    assert_eq!(session.scorer().state().total_overs(), 1);
}

#[tokio::test]
async fn test_autosave_and_resume() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    let config = config().with_snapshot_path(path.clone());

    let mut session = Session::new(&config);
    play(&mut session, &["start", "4", "wd", "w"]).await;
    assert!(path.exists());

    let resumed = Session::resume(&config).unwrap();
    assert_eq!(resumed.scorer().state(), session.scorer().state());
    assert_eq!(resumed.scorer().runs(), 5);
    assert_eq!(resumed.scorer().wickets(), 1);

    let snapshot = MatchSnapshot::load(&path).unwrap();
    assert_eq!(snapshot.teams().batting_first(), "Team A");
}

#[tokio::test]
async fn test_ignored_command_does_not_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    let mut session = Session::new(&config().with_snapshot_path(path.clone()));

    let dispatch = session.execute(Command::Undo).await.unwrap();
    assert_eq!(dispatch, Dispatch::Ignored(Rejection::NotStarted));
    assert!(!path.exists());
}

#[test]
fn test_resume_without_snapshot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let config = config().with_snapshot_path(dir.path().join("missing.json"));
    let session = Session::resume(&config).unwrap();
    assert_eq!(session.scorer().phase(), Phase::Setup);
}
