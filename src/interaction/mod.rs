//! Pointer callbacks forwarded from marks to the host.
//!
//! Marks never interpret pointer events. They attach whatever handlers the
//! caller supplied to the primitive they emit, and the host calls
//! [`MouseHandlers::dispatch`] when its own hit testing lands on that primitive.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub type MouseHandlerFn = Arc<dyn Fn(&MouseEvent) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseEventKind {
    Move,
    Enter,
    Leave,
}

/// Pointer position in pixel space at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: f64,
    pub y: f64,
}

impl MouseEvent {
    #[must_use]
    pub fn new(kind: MouseEventKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Clone, Default)]
pub struct MouseHandlers {
    pub on_mouse_move: Option<MouseHandlerFn>,
    pub on_mouse_enter: Option<MouseHandlerFn>,
    pub on_mouse_leave: Option<MouseHandlerFn>,
}

impl MouseHandlers {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on_mouse_move.is_none() && self.on_mouse_enter.is_none() && self.on_mouse_leave.is_none()
    }

    #[must_use]
    pub fn with_mouse_move(mut self, handler: impl Fn(&MouseEvent) + Send + Sync + 'static) -> Self {
        self.on_mouse_move = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_mouse_enter(
        mut self,
        handler: impl Fn(&MouseEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_mouse_enter = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn with_mouse_leave(
        mut self,
        handler: impl Fn(&MouseEvent) + Send + Sync + 'static,
    ) -> Self {
        self.on_mouse_leave = Some(Arc::new(handler));
        self
    }

    /// Invokes the handler registered for `event.kind`.
    ///
    /// Returns `false` when no handler is registered for that kind.
    pub fn dispatch(&self, event: &MouseEvent) -> bool {
        let handler = match event.kind {
            MouseEventKind::Move => self.on_mouse_move.as_ref(),
            MouseEventKind::Enter => self.on_mouse_enter.as_ref(),
            MouseEventKind::Leave => self.on_mouse_leave.as_ref(),
        };
        match handler {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for MouseHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MouseHandlers")
            .field("on_mouse_move", &self.on_mouse_move.is_some())
            .field("on_mouse_enter", &self.on_mouse_enter.is_some())
            .field("on_mouse_leave", &self.on_mouse_leave.is_some())
            .finish()
    }
}

/// Handlers compare equal when they share the same callback allocations.
impl PartialEq for MouseHandlers {
    fn eq(&self, other: &Self) -> bool {
        fn same(a: Option<&MouseHandlerFn>, b: Option<&MouseHandlerFn>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        same(self.on_mouse_move.as_ref(), other.on_mouse_move.as_ref())
            && same(self.on_mouse_enter.as_ref(), other.on_mouse_enter.as_ref())
            && same(self.on_mouse_leave.as_ref(), other.on_mouse_leave.as_ref())
    }
}
