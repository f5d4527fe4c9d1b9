use std::time::Duration;

use marker_core::{update, AppState, Msg};

use crate::effects::EffectRunner;
use crate::persistence;
use crate::ui;

/// Tick interval for draining worker events; also caps UI staleness.
const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

pub struct MarkerApp {
    state: AppState,
    effects: EffectRunner,
    /// Raw text of the comma-separated keyword box; the parsed list lives in
    /// core state.
    keyword_input: String,
    settings_path: std::path::PathBuf,
}

impl MarkerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = persistence::settings_path();
        let mut app = Self {
            state: AppState::new(),
            effects: EffectRunner::new(),
            keyword_input: String::new(),
            settings_path,
        };
        if let Some(snapshot) = persistence::load_session(&app.settings_path) {
            app.keyword_input = snapshot.keywords.join(", ");
            app.dispatch(Msg::SessionRestored(snapshot));
        }
        app
    }

    fn dispatch(&mut self, msg: Msg) {
        // Loaded keyword files refill the text box too.
        if let Msg::KeywordsLoaded(keywords) = &msg {
            self.keyword_input = keywords.join(", ");
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.run(effects);
    }
}

impl eframe::App for MarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Worker events first, so this frame renders the newest progress.
        for msg in self.effects.drain_events() {
            self.dispatch(msg);
        }

        if let Some(notice) = self.state.take_notice() {
            ui::show_notice(&notice);
        }

        let view = self.state.view();
        let intents = ui::draw(ctx, &view, &mut self.keyword_input);
        for msg in intents {
            self.dispatch(msg);
        }

        if self.state.consume_settings_dirty() {
            persistence::save_session(&self.settings_path, &self.state.session_snapshot());
        }

        ctx.request_repaint_after(DRAIN_INTERVAL);
    }
}
