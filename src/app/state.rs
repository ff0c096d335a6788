//! Render loop run state

use winit::event::WindowEvent;

/// Whether the render loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    Quit,
}

impl RunState {
    /// Applies a window event. Only a close request changes the state, and
    /// `Quit` is terminal.
    pub fn on_event(self, event: &WindowEvent) -> Self {
        match (self, event) {
            (RunState::Running, WindowEvent::CloseRequested) => RunState::Quit,
            (state, _) => state,
        }
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }
}
