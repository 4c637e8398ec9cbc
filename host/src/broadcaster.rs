use std::sync::Arc;

use snake_engine::{GameBroadcaster, GameOverSummary, GameSnapshot, log};

use crate::render::{render_board, status_line};

/// Stands in for a renderer: writes each committed snapshot to the log.
pub struct LogBroadcaster {
    draw_board: bool,
}

impl LogBroadcaster {
    pub fn new(draw_board: bool) -> Self {
        Self { draw_board }
    }
}

impl GameBroadcaster for LogBroadcaster {
    async fn broadcast_state(&self, snapshot: Arc<GameSnapshot>) {
        log!("{}", status_line(&snapshot));
        if self.draw_board {
            println!("{}", render_board(&snapshot));
        }
    }

    async fn broadcast_game_over(&self, summary: GameOverSummary) {
        log!(
            "Game over: {} after {} ticks, score {}, length {}. Type 'reset' to play again.",
            summary.reason,
            summary.ticks,
            summary.score,
            summary.length
        );
    }
}
