pub mod commands;
pub mod render;

use crate::AppWindow;
use stockmeow::app::{reducer, AppEvent, AppState, TimerEvent};
use stockmeow::settings::Settings;
use std::sync::mpsc::Receiver;

/// UI-thread owner of the application state.
///
/// Events arrive over the channel, go through the reducer, and the window is
/// re-rendered only when the reducer reports a change.
pub struct AppRuntime {
    pub state: AppState,
    ui: slint::Weak<AppWindow>,
    dirty: bool,
    last_tick_unix: i64,
}

impl AppRuntime {
    pub fn new(ui: slint::Weak<AppWindow>, settings: &Settings) -> Self {
        Self {
            state: AppState::new(settings),
            ui,
            dirty: true,
            last_tick_unix: 0,
        }
    }

    pub fn handle_event(&mut self, ev: AppEvent) {
        if reducer::reduce(&mut self.state, ev) {
            self.dirty = true;
        }
    }

    /// Apply everything queued since the last call without blocking.
    pub fn drain(&mut self, rx: &Receiver<AppEvent>) {
        for ev in rx.try_iter() {
            self.handle_event(ev);
        }
    }

    pub fn tick_if_needed(&mut self) {
        let now = chrono::Utc::now().timestamp();
        if now != self.last_tick_unix {
            self.last_tick_unix = now;
            self.handle_event(AppEvent::Timer(TimerEvent::Tick1s { now_unix: now }));
        }
    }

    pub fn render(&mut self) {
        if let Some(ui) = self.ui.upgrade() {
            render::render(&self.state, &ui);
            self.dirty = false;
        }
    }

    pub fn render_if_dirty(&mut self) {
        if self.dirty {
            self.render();
        }
    }
}
