use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use tradefloor::core::{ClockConfig, ClockDeps, Phase, RoundClock};
use tradefloor::error::FetchError;
use tradefloor::game::{
    GameId, HttpRoundSource, MemoryRoundStore, RoundSnapshot, RoundSource, Screen, ScreenTracker,
};

mod common;
use common::{spawn_http_responder, unused_local_url, RecordingNavigator};

fn source(base_url: &str) -> Result<HttpRoundSource> {
    Ok(HttpRoundSource::new(base_url, Duration::from_secs(5))?)
}

#[tokio::test]
async fn test_fetches_round_state() -> Result<()> {
    let (url, requests) =
        spawn_http_responder(200, r#"{"currentRound": 4, "remainingTime": 87250}"#).await?;

    let snapshot = source(&url)?.fetch_round(&GameId::new("abc")).await?;

    assert_eq!(snapshot, RoundSnapshot::new(4, 87_250));
    assert_eq!(snapshot.seconds_left(), 87);
    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests, vec!["GET /games/abc/round HTTP/1.1".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_non_success_status_is_an_error() -> Result<()> {
    let (url, _) = spawn_http_responder(500, r#"{"error": "boom"}"#).await?;

    let err = source(&url)?
        .fetch_round(&GameId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(500)));
    Ok(())
}

#[tokio::test]
async fn test_wrong_shape_is_an_error() -> Result<()> {
    let (url, _) = spawn_http_responder(200, r#"{"round": 4}"#).await?;

    let err = source(&url)?
        .fetch_round(&GameId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_values_are_an_error() -> Result<()> {
    let (url, _) = spawn_http_responder(200, r#"{"currentRound": 0, "remainingTime": 1000}"#).await?;

    let err = source(&url)?
        .fetch_round(&GameId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::InvalidSnapshot(_)));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() -> Result<()> {
    let url = unused_local_url().await?;

    let err = source(&url)?
        .fetch_round(&GameId::new("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    Ok(())
}

#[tokio::test]
async fn test_clock_falls_back_when_server_errors() -> Result<()> {
    let (url, _) = spawn_http_responder(503, "unavailable").await?;
    let game_id = GameId::new("abc");
    let deps = ClockDeps {
        source: Arc::new(source(&url)?),
        navigator: RecordingNavigator::new(),
        store: Arc::new(MemoryRoundStore::with_round(&game_id, 3)),
        screen: ScreenTracker::new(Screen::Trading),
        config: ClockConfig::default(),
    };
    let mut clock = RoundClock::new(game_id, deps);
    let mut views = clock.subscribe();

    clock.start();
    let view = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if views.changed().await.is_err() {
                break None;
            }
            let view = *views.borrow_and_update();
            if view.phase != Phase::Initializing {
                break Some(view);
            }
        }
    })
    .await?
    .expect("clock settled");

    assert_eq!(view.round, 3);
    assert!(view.seconds_left >= 119);
    assert_eq!(view.phase, Phase::Running);
    clock.stop();
    Ok(())
}
