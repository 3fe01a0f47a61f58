//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod http;

pub use self::fixtures::{deps_with, RecordingNavigator, ScriptedSource, SlowStore};
pub use self::http::{spawn_http_responder, unused_local_url};

use std::time::Duration;

/// Lets spawned clock tasks run until they block again
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

/// Moves paused time forward one second at a time, letting tasks react
/// after each step
pub async fn advance_secs(seconds: u64) {
    for _ in 0..seconds {
        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
    }
}
