//! Header gesture state machines.
//!
//! Two independent machines share one pointer stream:
//!
//! ```text
//! reorder:  Idle ──down on header──▶ PendingDrag ──moved > threshold──▶ Dragging
//!             ▲                          │ up: ToggleSort                 │ up: Reorder
//!             └──────────────────────────┴────────────────────────────────┘
//!
//! resize:   Idle ──down on handle──▶ Resizing ──move: SetWidth──▶ … ──up──▶ Idle
//! ```
//!
//! A resize handle wins over the header it belongs to. A second contact, a cancel or
//! an unmount abandons the gesture without committing it.

use super::layout::{HitTarget, HitTester, Point};
use crate::grid::{ColumnConfig, GridAction, GridColumn, MIN_COLUMN_WIDTH};

/// Horizontal pointer travel, in pixels, that turns a press into a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Normalized mouse / touch input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    /// A second touch point landed while a gesture was in progress.
    ExtraContact,
    /// The platform cancelled the pointer or the header was unmounted.
    Cancel,
}

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState<C> {
    Idle,
    PendingDrag {
        source: C,
        start: Point,
    },
    Dragging {
        source: C,
        /// Column currently under the pointer, for drop feedback only.
        candidate: Option<C>,
    },
    Resizing {
        column: C,
        start_x: f64,
        start_width: u32,
        current_width: u32,
    },
}

/// Translates pointer events over a grid header into [`GridAction`]s.
#[derive(Debug, Clone)]
pub struct DragController<C> {
    state: DragState<C>,
    threshold: f64,
}

impl<C: GridColumn> Default for DragController<C> {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl<C: GridColumn> DragController<C> {
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            state: DragState::Idle,
            threshold: threshold.max(0.0),
        }
    }

    #[must_use]
    pub fn state(&self) -> DragState<C> {
        self.state
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    /// Column being dragged once the threshold was crossed.
    #[must_use]
    pub fn dragging(&self) -> Option<C> {
        match self.state {
            DragState::Dragging { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Where the dragged column would land on release.
    #[must_use]
    pub fn drop_candidate(&self) -> Option<C> {
        match self.state {
            DragState::Dragging { candidate, .. } => candidate,
            _ => None,
        }
    }

    #[must_use]
    pub fn resizing(&self) -> Option<C> {
        match self.state {
            DragState::Resizing { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Feeds one pointer event and returns the configuration changes it produced.
    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        config: &ColumnConfig<C>,
        hit: &impl HitTester<C>,
    ) -> Vec<GridAction<C>> {
        let mut actions = Vec::new();

        self.state = match (self.state, event) {
            (DragState::Idle, PointerEvent::Down(at)) => match hit.hit(at) {
                HitTarget::ResizeHandle(column) => {
                    let width = config.width(column);
                    DragState::Resizing {
                        column,
                        start_x: at.x,
                        start_width: width,
                        current_width: width,
                    }
                }
                HitTarget::Header(source) if !source.is_selection() => DragState::PendingDrag { source, start: at },
                HitTarget::Header(_) | HitTarget::None => DragState::Idle,
            },

            (DragState::PendingDrag { source, start }, PointerEvent::Move(at)) => {
                if at.horizontal_distance(start) > self.threshold {
                    tracing::trace!(column = ?source, "header drag started");
                    DragState::Dragging {
                        source,
                        candidate: drop_target(hit.hit(at), source),
                    }
                } else {
                    DragState::PendingDrag { source, start }
                }
            }

            (DragState::PendingDrag { source, .. }, PointerEvent::Up(_)) => {
                actions.push(GridAction::ToggleSort(source));
                DragState::Idle
            }

            (DragState::Dragging { source, .. }, PointerEvent::Move(at)) => DragState::Dragging {
                source,
                candidate: drop_target(hit.hit(at), source),
            },

            (DragState::Dragging { source, .. }, PointerEvent::Up(at)) => {
                if let Some(target) = drop_target(hit.hit(at), source) {
                    tracing::debug!(dragged = ?source, target = ?target, "header dropped");
                    actions.push(GridAction::Reorder { dragged: source, target });
                }
                DragState::Idle
            }

            (
                DragState::Resizing {
                    column,
                    start_x,
                    start_width,
                    current_width,
                },
                PointerEvent::Move(at),
            ) => {
                let width = resized_width(start_width, current_width, at.x - start_x);
                if width != current_width {
                    actions.push(GridAction::SetWidth(column, width));
                }
                DragState::Resizing {
                    column,
                    start_x,
                    start_width,
                    current_width: width,
                }
            }

            (DragState::Resizing { .. }, PointerEvent::Up(_)) => DragState::Idle,

            (state, PointerEvent::ExtraContact | PointerEvent::Cancel) => abandon(state, &mut actions),

            // A press while a gesture is running comes from a second pointer.
            (state, PointerEvent::Down(_)) => abandon(state, &mut actions),

            (state @ DragState::Idle, PointerEvent::Move(_) | PointerEvent::Up(_)) => state,
        };

        actions
    }
}

/// Ends a gesture without committing it. An interrupted resize puts the width back.
fn abandon<C: GridColumn>(state: DragState<C>, actions: &mut Vec<GridAction<C>>) -> DragState<C> {
    match state {
        DragState::Idle => {}
        DragState::Resizing {
            column,
            start_width,
            current_width,
            ..
        } => {
            if current_width != start_width {
                actions.push(GridAction::SetWidth(column, start_width));
            }
            tracing::debug!(column = ?column, "resize abandoned");
        }
        DragState::PendingDrag { source, .. } | DragState::Dragging { source, .. } => {
            tracing::debug!(column = ?source, "header drag abandoned");
        }
    }
    DragState::Idle
}

fn drop_target<C: GridColumn>(target: HitTarget<C>, source: C) -> Option<C> {
    match target {
        HitTarget::Header(column) | HitTarget::ResizeHandle(column)
            if column != source && !column.is_selection() =>
        {
            Some(column)
        }
        _ => None,
    }
}

fn resized_width(start_width: u32, current_width: u32, delta: f64) -> u32 {
    let width = (f64::from(start_width) + delta).round();
    if !width.is_finite() {
        current_width
    } else if width <= f64::from(MIN_COLUMN_WIDTH) {
        MIN_COLUMN_WIDTH
    } else {
        width.min(f64::from(u32::MAX)) as u32
    }
}
