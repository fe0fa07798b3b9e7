pub mod scheduler;
pub mod state;
pub mod surface;

// std
use std::time::Duration;
// crates
use rand::Rng;
use serde::{Deserialize, Serialize};
// internal
use crate::error::SetupError;
use crate::outcome::{Outcome, OUTCOMES};
use crate::page::{Document, ElementHandle};
use crate::settings::ControllerSettings;
use scheduler::DrawTask;
use state::{DrawRecord, Phase};
use surface::{Surface, Surfaces};

pub const DRAW_LABEL: &str = "おみくじを引く";
pub const DRAWING_LABEL: &str = "おみくじを引いています...";
pub const LEVEL_CLASS: &str = "fortune-level";

pub const DRAW_TRIGGER: &str = "#drawButton";
pub const RESET_TRIGGER: &str = "#resetButton";
pub const RESULT: &str = "#result";
pub const LEVEL: &str = ".fortune-level";
pub const MESSAGE: &str = ".fortune-message";

/// What a bound trigger asks the controller to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Draw,
    Reset,
}

/// Which state blocks a new draw.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawGuard {
    /// Only `Idle` accepts a draw.
    #[default]
    Phase,
    /// Only the in-progress flag blocks a draw, so a programmatic draw while a
    /// result is showing starts a new one.
    Flag,
}

pub struct Controller<S, R> {
    surfaces: Surfaces<S>,
    settings: ControllerSettings,
    rng: R,
    phase: Phase,
    is_drawing: bool,
    current_outcome: Option<&'static Outcome>,
    pending: Option<DrawTask>,
    draws: usize,
}

impl<R: Rng> Controller<ElementHandle, R> {
    /// Resolves the five surfaces from `document` and binds both triggers.
    /// Nothing is bound unless every surface resolves.
    pub fn initialize(
        document: &Document,
        settings: ControllerSettings,
        rng: R,
    ) -> Result<Self, SetupError> {
        let resolve = |selector: &str| {
            document
                .query(selector)
                .ok_or_else(|| SetupError::MissingSurface(selector.to_owned()))
        };
        let surfaces = Surfaces {
            draw_trigger: resolve(DRAW_TRIGGER)?,
            reset_trigger: resolve(RESET_TRIGGER)?,
            result: resolve(RESULT)?,
            level: resolve(LEVEL)?,
            message: resolve(MESSAGE)?,
        };
        surfaces.draw_trigger.write().set_on_click(Some(Action::Draw));
        surfaces.reset_trigger.write().set_on_click(Some(Action::Reset));
        tracing::debug!("controller bound to `{}`", document.title());
        Ok(Self::new(surfaces, settings, rng))
    }
}

impl<S: Surface, R: Rng> Controller<S, R> {
    pub fn new(surfaces: Surfaces<S>, settings: ControllerSettings, rng: R) -> Self {
        Self {
            surfaces,
            settings,
            rng,
            phase: Phase::Idle,
            is_drawing: false,
            current_outcome: None,
            pending: None,
            draws: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn current_outcome(&self) -> Option<&'static Outcome> {
        self.current_outcome
    }

    /// Number of draws that have displayed a result.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn pending(&self) -> Option<&DrawTask> {
        self.pending.as_ref()
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Draw => {
                self.on_draw();
            }
            Action::Reset => self.on_reset(),
        }
    }

    /// Returns whether the draw was accepted.
    pub fn on_draw(&mut self) -> bool {
        // A task outliving a forced reset still blocks a second one.
        let accepted = self.pending.is_none()
            && match self.settings.draw_guard {
                DrawGuard::Phase => self.phase == Phase::Idle && !self.is_drawing,
                DrawGuard::Flag => !self.is_drawing,
            };
        if !accepted {
            tracing::debug!(phase = ?self.phase, "draw ignored");
            return false;
        }

        self.phase = Phase::Drawing;
        self.is_drawing = true;
        self.current_outcome = None;
        self.surfaces.draw_trigger.set_interactive(false);
        self.surfaces.draw_trigger.set_text(DRAWING_LABEL);
        self.pending = Some(DrawTask::new(self.settings.draw_delay));
        true
    }

    /// Never touches a pending draw: once accepted it always displays.
    pub fn on_reset(&mut self) {
        self.surfaces.result.set_hidden(true);
        self.surfaces.draw_trigger.set_hidden(false);
        self.surfaces.reset_trigger.set_hidden(true);

        self.surfaces.level.set_class_name(LEVEL_CLASS);
        self.surfaces.level.set_text("");
        self.surfaces.message.set_text("");

        self.surfaces.draw_trigger.set_interactive(true);
        self.surfaces.draw_trigger.set_text(DRAW_LABEL);
        self.is_drawing = false;
        self.current_outcome = None;
        self.phase = Phase::Idle;
    }

    /// Feeds elapsed time to the pending draw. Returns the outcome when this
    /// step completes the draw.
    pub fn step(&mut self, elapsed: Duration) -> Option<&'static Outcome> {
        let fired = self
            .pending
            .as_mut()
            .is_some_and(|task| task.update(elapsed));
        if !fired {
            return None;
        }
        self.pending = None;

        let outcome = OUTCOMES.sample(&mut self.rng);
        self.display_result(outcome);
        Some(outcome)
    }

    fn display_result(&mut self, outcome: &'static Outcome) {
        self.surfaces.level.set_text(outcome.label);
        self.surfaces
            .level
            .set_class_name(&format!("{LEVEL_CLASS} {}", outcome.style_tag));
        self.surfaces.message.set_text(outcome.message);

        self.surfaces.result.set_hidden(false);
        self.surfaces.draw_trigger.set_hidden(true);
        self.surfaces.reset_trigger.set_hidden(false);

        self.surfaces.draw_trigger.set_interactive(true);
        self.surfaces.draw_trigger.set_text(DRAW_LABEL);
        self.is_drawing = false;
        self.current_outcome = Some(outcome);
        self.phase = Phase::ShowingResult;
        self.draws += 1;

        let record = DrawRecord::new(self.draws, outcome, self.settings.draw_delay.as_millis());
        match serde_json::to_string(&record) {
            Ok(record) => tracing::info!("DrawOutcome: {record}"),
            Err(e) => tracing::warn!("failed to serialize draw record: {e}"),
        }
    }
}
