use snake_engine::{InputEvent, InputSink, InputSource, KeyInput, TouchPoint, log};
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostCommand {
    Input(InputEvent),
    Reset,
    Quit,
}

/// One command per line. Touch commands take `x y` screen coordinates; a
/// touch command with a bad or missing point is forwarded without one.
pub fn parse_command(line: &str) -> Option<HostCommand> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;

    if let Ok(key) = verb.parse::<KeyInput>() {
        return Some(HostCommand::Input(InputEvent::Key(key)));
    }

    let command = match verb.to_ascii_lowercase().as_str() {
        "up" | "w" => HostCommand::Input(InputEvent::Key(KeyInput::ArrowUp)),
        "down" | "s" => HostCommand::Input(InputEvent::Key(KeyInput::ArrowDown)),
        "left" | "a" => HostCommand::Input(InputEvent::Key(KeyInput::ArrowLeft)),
        "right" | "d" => HostCommand::Input(InputEvent::Key(KeyInput::ArrowRight)),
        "touchstart" => HostCommand::Input(InputEvent::TouchStart(parse_point(parts))),
        "touchmove" => HostCommand::Input(InputEvent::TouchMove(parse_point(parts))),
        "touchend" => HostCommand::Input(InputEvent::TouchEnd),
        "reset" | "r" => HostCommand::Reset,
        "quit" | "q" | "exit" => HostCommand::Quit,
        _ => return None,
    };
    Some(command)
}

fn parse_point<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<TouchPoint> {
    let x = parts.next()?.parse::<f32>().ok()?;
    let y = parts.next()?.parse::<f32>().ok()?;
    Some(TouchPoint::new(x, y))
}

/// Reads commands from the process stdin.
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for StdinInput {
    fn name(&self) -> &str {
        "stdin"
    }

    async fn run(self, sink: InputSink) {
        let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

        // Blocking reads live on a plain thread so that aborting this task
        // never waits on the terminal. The thread ends on the first send after
        // the receiver is gone.
        std::thread::spawn(move || {
            for line in std::io::stdin().lines() {
                let Ok(line) = line else {
                    break;
                };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });

        while let Some(line) = line_rx.recv().await {
            let delivered = match parse_command(&line) {
                Some(HostCommand::Input(event)) => sink.send(event),
                Some(HostCommand::Reset) => sink.request_reset(),
                Some(HostCommand::Quit) => {
                    sink.request_shutdown();
                    break;
                }
                None => {
                    if !line.trim().is_empty() {
                        log!("Unknown command: {}", line.trim());
                    }
                    true
                }
            };
            if !delivered {
                break;
            }
        }
    }
}
