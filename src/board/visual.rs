//! Presentation-facing grid state.
//!
//! Grids never touch rendering. When their active flag changes they hand
//! back a `VisualState`, and the game manager forwards it to the actuator,
//! which maps it to whatever its presentation layer needs.

use crate::core::Side;

/// Class applied to every grid container.
pub const GRID_CONTAINER_CLASS: &str = "grid-container";

/// Class applied to an inactive grid container.
pub const INACTIVE_CLASS: &str = "inactive";

/// Visual state of one grid after an active-flag change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualState {
    /// Grid the state belongs to.
    pub target: Side,
    /// Whether the grid is now active.
    pub active: bool,
}

impl VisualState {
    /// Class list for the grid's container, e.g.
    /// `["grid-container", "right-grid-container", "inactive"]`.
    #[must_use]
    pub fn classes(&self) -> Vec<&'static str> {
        let side_class = match self.target {
            Side::Left => "left-grid-container",
            Side::Right => "right-grid-container",
        };

        let mut classes = vec![GRID_CONTAINER_CLASS, side_class];
        if !self.active {
            classes.push(INACTIVE_CLASS);
        }
        classes
    }
}
