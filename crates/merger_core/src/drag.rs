use crate::{FileList, MergerError};

/// One drag-and-drop reorder gesture over the rendered file rows.
///
/// Hovering is advisory; only a drop mutates the list, and at most one swap
/// happens per gesture no matter how many rows were hovered on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: usize,
    },
    HoveringTarget {
        source: usize,
        target: usize,
    },
}

/// What a drop did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No gesture was live.
    NoGesture,
    /// Dropped onto the row being dragged.
    Unchanged,
    Swapped { source: usize, target: usize },
}

impl DragState {
    pub fn source(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Dragging { source } | DragState::HoveringTarget { source, .. } => {
                Some(source)
            }
        }
    }

    pub fn target(&self) -> Option<usize> {
        match *self {
            DragState::HoveringTarget { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    /// Begins a gesture on row `index`. A live gesture is abandoned.
    pub fn start(&mut self, index: usize, list: &FileList) -> Result<(), MergerError> {
        *self = DragState::Idle;
        check_row(index, list)?;
        *self = DragState::Dragging { source: index };
        Ok(())
    }

    /// Pointer moved over row `index`.
    pub fn hover(&mut self, index: usize, list: &FileList) -> Result<(), MergerError> {
        let Some(source) = self.source() else {
            return Ok(());
        };
        if let Err(err) = check_row(index, list) {
            *self = DragState::Idle;
            return Err(err);
        }
        *self = if index == source {
            DragState::Dragging { source }
        } else {
            DragState::HoveringTarget {
                source,
                target: index,
            }
        };
        Ok(())
    }

    /// Pointer left row `index`; clears the drop-target marker if it was on that row.
    pub fn leave(&mut self, index: usize) {
        if let DragState::HoveringTarget { source, target } = *self {
            if target == index {
                *self = DragState::Dragging { source };
            }
        }
    }

    /// Completes the gesture over row `index`. Always ends `Idle`.
    pub fn drop_on(
        &mut self,
        index: usize,
        list: &mut FileList,
    ) -> Result<DropOutcome, MergerError> {
        let source = self.source();
        *self = DragState::Idle;
        let Some(source) = source else {
            return Ok(DropOutcome::NoGesture);
        };
        if index == source {
            check_row(index, list)?;
            return Ok(DropOutcome::Unchanged);
        }
        list.swap(source, index)?;
        Ok(DropOutcome::Swapped {
            source,
            target: index,
        })
    }

    /// Gesture ended without a drop.
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }
}

fn check_row(index: usize, list: &FileList) -> Result<(), MergerError> {
    if index < list.len() {
        Ok(())
    } else {
        Err(MergerError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }
}
