use serde::Serialize;

use crate::outcome::Outcome;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Idle,
    Drawing,
    ShowingResult,
}

/// Emitted to the log each time a draw completes.
#[derive(Debug, Clone, Serialize)]
pub struct DrawRecord {
    pub draw_id: usize,
    pub label: &'static str,
    pub style_tag: &'static str,
    pub delay_ms: u128,
}

impl DrawRecord {
    pub fn new(draw_id: usize, outcome: &'static Outcome, delay_ms: u128) -> Self {
        Self {
            draw_id,
            label: outcome.label,
            style_tag: outcome.style_tag,
            delay_ms,
        }
    }
}
