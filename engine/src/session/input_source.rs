use std::future::Future;

use tokio::sync::mpsc;

use crate::input::InputEvent;
use super::SessionCommand;

/// Write end handed to input sources. Sends fail once the session is gone.
#[derive(Clone, Debug)]
pub struct InputSink {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl InputSink {
    pub(super) fn new(commands: mpsc::UnboundedSender<SessionCommand>) -> Self {
        Self { commands }
    }

    pub fn send(&self, event: InputEvent) -> bool {
        self.commands.send(SessionCommand::Input(event)).is_ok()
    }

    pub fn request_reset(&self) -> bool {
        self.commands.send(SessionCommand::Reset).is_ok()
    }

    pub fn request_shutdown(&self) -> bool {
        self.commands.send(SessionCommand::Shutdown).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }
}

/// Something that produces input events for a session, e.g. a keyboard
/// listener. Attached sources run as their own task and are aborted when the
/// session handle shuts down or is dropped.
pub trait InputSource: Send + 'static {
    fn name(&self) -> &str;

    fn run(self, sink: InputSink) -> impl Future<Output = ()> + Send;
}
