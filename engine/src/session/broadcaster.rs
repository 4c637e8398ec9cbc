use std::future::Future;
use std::sync::Arc;

use crate::state::{GameOverSummary, GameSnapshot};

/// Push side of a session towards its renderer. Every committed tick and the
/// final summary of each round go through here.
pub trait GameBroadcaster: Send + Sync + 'static {
    fn broadcast_state(&self, snapshot: Arc<GameSnapshot>) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, summary: GameOverSummary) -> impl Future<Output = ()> + Send;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBroadcaster;

impl GameBroadcaster for NoopBroadcaster {
    async fn broadcast_state(&self, _snapshot: Arc<GameSnapshot>) {}

    async fn broadcast_game_over(&self, _summary: GameOverSummary) {}
}
