mod autopilot;
mod stdin_input;

pub use autopilot::AutopilotInput;
pub use stdin_input::StdinInput;
