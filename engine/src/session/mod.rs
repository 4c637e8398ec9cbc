mod broadcaster;
mod input_source;

pub use broadcaster::{GameBroadcaster, NoopBroadcaster};
pub use input_source::{InputSink, InputSource};

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::config::GameConfig;
use crate::game::{SnakeGame, TickEvent};
use crate::input::InputEvent;
use crate::log;
use crate::state::GameSnapshot;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionCommand {
    Input(InputEvent),
    Reset,
    Shutdown,
}

pub struct SnakeSession;

impl SnakeSession {
    pub fn start(
        config: GameConfig,
        broadcaster: impl GameBroadcaster,
    ) -> Result<SessionHandle, String> {
        let game = SnakeGame::new(config)?;
        Ok(Self::start_with_game(game, broadcaster))
    }

    /// Spawns the session task. Must be called from inside a tokio runtime.
    pub fn start_with_game(game: SnakeGame, broadcaster: impl GameBroadcaster) -> SessionHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(Arc::new(game.snapshot()));

        let task = tokio::spawn(Self::run(game, command_rx, snapshot_tx, broadcaster));

        SessionHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            task: Some(task),
            inputs: Vec::new(),
        }
    }

    async fn run(
        mut game: SnakeGame,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        snapshots: watch::Sender<Arc<GameSnapshot>>,
        broadcaster: impl GameBroadcaster,
    ) {
        let period = game.config().tick_interval();
        let grid = game.grid();
        log!(
            "Session started: {}x{} grid, tick {}ms, seed {}",
            grid.columns(),
            grid.rows(),
            period.as_millis(),
            game.seed()
        );

        let initial = snapshots.borrow().clone();
        broadcaster.broadcast_state(initial).await;

        // Only exists while the round is running; dropping it cancels the timer.
        let mut ticker = Some(start_ticker(period));

        loop {
            tokio::select! {
                _ = next_tick(&mut ticker) => {
                    let event = game.tick();
                    let snapshot = Arc::new(game.snapshot());
                    snapshots.send_replace(snapshot.clone());
                    broadcaster.broadcast_state(snapshot).await;

                    if let TickEvent::GameOver(reason) = event {
                        ticker = None;
                        log!("Game over after {} ticks: {}, score {}", game.tick_count(), reason, game.score());
                        if let Some(summary) = game.game_over_summary() {
                            broadcaster.broadcast_game_over(summary).await;
                        }
                    }
                }
                command = commands.recv() => match command {
                    Some(SessionCommand::Input(event)) => {
                        game.handle_input(event);
                    }
                    Some(SessionCommand::Reset) => {
                        if game.reset() {
                            log!("Game reset");
                            ticker = Some(start_ticker(period));
                            let snapshot = Arc::new(game.snapshot());
                            snapshots.send_replace(snapshot.clone());
                            broadcaster.broadcast_state(snapshot).await;
                        } else {
                            log!("Reset ignored, game is still running");
                        }
                    }
                    Some(SessionCommand::Shutdown) | None => break,
                }
            }
        }

        log!("Session stopped at tick {}", game.tick_count());
    }
}

/// First tick fires one full period after creation so a reset never gets an
/// immediate extra step.
fn start_ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Owner of a running session. Dropping it aborts the session task and every
/// attached input source.
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<SessionCommand>,
    snapshots: watch::Receiver<Arc<GameSnapshot>>,
    task: Option<JoinHandle<()>>,
    inputs: Vec<(String, JoinHandle<()>)>,
}

impl SessionHandle {
    pub fn current_state(&self) -> Arc<GameSnapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<GameSnapshot>> {
        self.snapshots.clone()
    }

    pub fn input_sink(&self) -> InputSink {
        InputSink::new(self.commands.clone())
    }

    pub fn send_input(&self, event: InputEvent) -> bool {
        self.input_sink().send(event)
    }

    pub fn reset(&self) -> bool {
        self.input_sink().request_reset()
    }

    pub fn attach_input(&mut self, source: impl InputSource) {
        let name = source.name().to_string();
        let sink = self.input_sink();
        log!("Input source attached: {}", name);
        let task = tokio::spawn(source.run(sink));
        self.inputs.push((name, task));
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Resolves once the session task has ended, e.g. after an input source
    /// requested shutdown.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(e) = task.await {
                log!("Session task ended abnormally: {}", e);
            }
            self.task = None;
        }
    }

    pub async fn shutdown(mut self) {
        self.detach_inputs();
        let _ = self.commands.send(SessionCommand::Shutdown);
        self.finished().await;
    }

    fn detach_inputs(&mut self) {
        for (name, task) in self.inputs.drain(..) {
            task.abort();
            log!("Input source detached: {}", name);
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.detach_inputs();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use crate::collision::DeathReason;
    use crate::direction::Direction;
    use crate::grid::Cell;
    use crate::input::KeyInput;
    use crate::rng::SessionRng;
    use crate::state::{GameOverSummary, GameStatus};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<Mutex<Vec<Arc<GameSnapshot>>>>,
        game_overs: Arc<Mutex<Vec<GameOverSummary>>>,
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: Arc<GameSnapshot>) {
            self.states.lock().unwrap().push(snapshot);
        }

        async fn broadcast_game_over(&self, summary: GameOverSummary) {
            self.game_overs.lock().unwrap().push(summary);
        }
    }

    fn config() -> GameConfig {
        GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        }
    }

    fn wall_bound_game() -> SnakeGame {
        SnakeGame::from_parts(
            config(),
            SessionRng::new(7),
            vec![Cell::new(0, 10)],
            Some(Cell::new(5, 5)),
            Direction::Left,
        )
        .unwrap()
    }

    async fn wait_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_interval() {
        let handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        assert_eq!(handle.current_state().tick, 0);

        wait_ms(150).await;
        assert_eq!(handle.current_state().tick, 0);

        wait_ms(100).await;
        let state = handle.current_state();
        assert_eq!(state.tick, 1);
        assert_eq!(state.snake.head(), Cell::new(10, 9));

        wait_ms(400).await;
        assert_eq!(handle.current_state().tick, 3);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_applies_on_next_tick() {
        let handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        assert!(handle.send_input(InputEvent::Key(KeyInput::ArrowLeft)));

        wait_ms(50).await;
        assert_eq!(handle.current_state().snake.head(), Cell::new(10, 10));

        wait_ms(200).await;
        let state = handle.current_state();
        assert_eq!(state.snake.head(), Cell::new(9, 10));
        assert_eq!(state.direction, Direction::Left);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_timer_until_reset() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SnakeSession::start_with_game(wall_bound_game(), broadcaster.clone());

        wait_ms(250).await;
        let state = handle.current_state();
        assert_eq!(state.status, GameStatus::GameOver(DeathReason::WallCollision));
        assert_eq!(state.tick, 1);
        assert_eq!(state.snake.cells(), &[Cell::new(0, 10)]);

        wait_ms(5_000).await;
        assert_eq!(handle.current_state().tick, 1);
        let published = broadcaster.states.lock().unwrap().len();
        assert_eq!(published, 2);
        {
            let game_overs = broadcaster.game_overs.lock().unwrap();
            assert_eq!(game_overs.len(), 1);
            assert_eq!(game_overs[0].reason, DeathReason::WallCollision);
            assert_eq!(game_overs[0].length, 1);
        }

        assert!(handle.reset());
        wait_ms(10).await;
        let state = handle.current_state();
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.tick, 0);
        assert_eq!(state.snake.cells(), &[Cell::new(10, 10)]);
        assert_eq!(state.direction, Direction::Up);

        wait_ms(150).await;
        assert_eq!(handle.current_state().tick, 0);
        wait_ms(100).await;
        assert_eq!(handle.current_state().tick, 1);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_while_running_is_ignored() {
        let handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        wait_ms(450).await;
        assert!(handle.reset());
        wait_ms(10).await;
        let state = handle.current_state();
        assert_eq!(state.tick, 2);
        assert_eq!(state.snake.head(), Cell::new(10, 8));
        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_snapshot_channel() {
        let handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        let mut snapshots = handle.subscribe();
        handle.shutdown().await;
        assert!(snapshots.changed().await.is_err());
    }

    struct ScriptedInput {
        events: Vec<InputEvent>,
        dropped: Arc<AtomicBool>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    impl InputSource for ScriptedInput {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn run(self, sink: InputSink) {
            let _guard = DropFlag(self.dropped.clone());
            for event in self.events {
                sink.send(event);
            }
            std::future::pending::<()>().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_attached_source_feeds_session_and_is_aborted_on_drop() {
        let dropped = Arc::new(AtomicBool::new(false));
        let mut handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        handle.attach_input(ScriptedInput {
            events: vec![InputEvent::Key(KeyInput::ArrowRight)],
            dropped: dropped.clone(),
        });

        wait_ms(250).await;
        assert_eq!(handle.current_state().snake.head(), Cell::new(11, 10));
        assert!(!dropped.load(Ordering::SeqCst));

        drop(handle);
        wait_ms(1).await;
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_can_request_shutdown() {
        let mut handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        let sink = handle.input_sink();
        assert!(sink.request_shutdown());
        handle.finished().await;
        assert!(handle.is_finished());
        assert!(sink.is_closed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_handle_commands_fail_after_session_ends() {
        let mut handle = SnakeSession::start(config(), NoopBroadcaster).unwrap();
        assert!(handle.input_sink().request_shutdown());
        handle.finished().await;
        assert!(!handle.send_input(InputEvent::Key(KeyInput::ArrowLeft)));
        assert!(!handle.reset());
    }
}
