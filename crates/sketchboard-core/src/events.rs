//! Board events: pointer gestures and listener registration.

use crate::error::CoreError;
use kurbo::Point;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Event names a board emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardEventKind {
    Point,
    MoveStart,
    Move,
    MoveEnd,
    Hover,
    Leave,
}

impl BoardEventKind {
    pub const ALL: [BoardEventKind; 6] = [
        BoardEventKind::Point,
        BoardEventKind::MoveStart,
        BoardEventKind::Move,
        BoardEventKind::MoveEnd,
        BoardEventKind::Hover,
        BoardEventKind::Leave,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardEventKind::Point => "point",
            BoardEventKind::MoveStart => "moveStart",
            BoardEventKind::Move => "move",
            BoardEventKind::MoveEnd => "moveEnd",
            BoardEventKind::Hover => "hover",
            BoardEventKind::Leave => "leave",
        }
    }
}

impl FromStr for BoardEventKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::InvalidOption(format!("unknown event name '{}'", s)))
    }
}

impl fmt::Display for BoardEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pointer event in board (screen, CSS pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoardEvent {
    /// Pointer pressed.
    Point(Point),
    /// A drag begins at this point.
    MoveStart(Point),
    /// Pointer moved while pressed.
    Move(Point),
    /// Pointer released or drag aborted.
    MoveEnd(Point),
    /// Pointer moved without a press.
    Hover(Point),
    /// Pointer left the board.
    Leave(Point),
}

impl BoardEvent {
    pub fn kind(&self) -> BoardEventKind {
        match self {
            BoardEvent::Point(_) => BoardEventKind::Point,
            BoardEvent::MoveStart(_) => BoardEventKind::MoveStart,
            BoardEvent::Move(_) => BoardEventKind::Move,
            BoardEvent::MoveEnd(_) => BoardEventKind::MoveEnd,
            BoardEvent::Hover(_) => BoardEventKind::Hover,
            BoardEvent::Leave(_) => BoardEventKind::Leave,
        }
    }

    pub fn point(&self) -> Point {
        match *self {
            BoardEvent::Point(p)
            | BoardEvent::MoveStart(p)
            | BoardEvent::Move(p)
            | BoardEvent::MoveEnd(p)
            | BoardEvent::Hover(p)
            | BoardEvent::Leave(p) => p,
        }
    }
}

/// Handle returned by [`EventEmitter::on`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u32);

impl ListenerId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }
}

type Listener = Box<dyn FnMut(&BoardEvent)>;

/// Listener registry keyed by event kind.
#[derive(Default)]
pub struct EventEmitter {
    next_id: u32,
    listeners: HashMap<BoardEventKind, Vec<(ListenerId, Listener)>>,
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, list)| (kind.as_str(), list.len()))
            .collect();
        f.debug_struct("EventEmitter")
            .field("next_id", &self.next_id)
            .field("listeners", &counts)
            .finish()
    }
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; listeners run in registration order.
    pub fn on(&mut self, kind: BoardEventKind, listener: impl FnMut(&BoardEvent) + 'static) -> ListenerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = ListenerId(self.next_id);
        self.listeners
            .entry(kind)
            .or_default()
            .push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn off(&mut self, kind: BoardEventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener_id, _)| *listener_id != id);
        before != list.len()
    }

    /// Call every listener registered for the event's kind.
    /// Returns the number of listeners called.
    pub fn emit(&mut self, event: &BoardEvent) -> usize {
        match self.listeners.get_mut(&event.kind()) {
            Some(list) => {
                for (_, listener) in list.iter_mut() {
                    listener(event);
                }
                list.len()
            }
            None => 0,
        }
    }

    pub fn has(&self, kind: BoardEventKind) -> bool {
        self.listeners.get(&kind).is_some_and(|list| !list.is_empty())
    }

    /// Remove every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Turns raw pointer down/move/up/leave input into board events.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTracker {
    pressed: bool,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn pointer_down(&mut self, point: Point) -> Vec<BoardEvent> {
        self.pressed = true;
        vec![BoardEvent::Point(point), BoardEvent::MoveStart(point)]
    }

    pub fn pointer_move(&mut self, point: Point) -> Vec<BoardEvent> {
        if self.pressed {
            vec![BoardEvent::Move(point)]
        } else {
            vec![BoardEvent::Hover(point)]
        }
    }

    pub fn pointer_up(&mut self, point: Point) -> Vec<BoardEvent> {
        if std::mem::take(&mut self.pressed) {
            vec![BoardEvent::MoveEnd(point)]
        } else {
            Vec::new()
        }
    }

    pub fn pointer_leave(&mut self, point: Point) -> Vec<BoardEvent> {
        if std::mem::take(&mut self.pressed) {
            vec![BoardEvent::MoveEnd(point), BoardEvent::Leave(point)]
        } else {
            vec![BoardEvent::Leave(point)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in BoardEventKind::ALL {
            assert_eq!(kind.as_str().parse::<BoardEventKind>().unwrap(), kind);
        }
        assert!("click".parse::<BoardEventKind>().is_err());
    }

    #[test]
    fn test_emit_calls_matching_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut emitter = EventEmitter::new();
        let sink = seen.clone();
        emitter.on(BoardEventKind::Move, move |e| sink.borrow_mut().push(e.point()));

        assert_eq!(emitter.emit(&BoardEvent::Move(Point::new(1.0, 2.0))), 1);
        assert_eq!(emitter.emit(&BoardEvent::Point(Point::new(3.0, 4.0))), 0);
        assert_eq!(*seen.borrow(), vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_off_removes_listener() {
        let count = Rc::new(RefCell::new(0));
        let mut emitter = EventEmitter::new();
        let c = count.clone();
        let id = emitter.on(BoardEventKind::Point, move |_| *c.borrow_mut() += 1);
        assert!(emitter.has(BoardEventKind::Point));
        assert!(!emitter.off(BoardEventKind::Move, id));
        assert!(emitter.off(BoardEventKind::Point, id));
        assert!(!emitter.off(BoardEventKind::Point, id));
        emitter.emit(&BoardEvent::Point(Point::ZERO));
        assert_eq!(*count.borrow(), 0);
        assert!(!emitter.has(BoardEventKind::Point));
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let mut emitter = EventEmitter::new();
        let a = emitter.on(BoardEventKind::Move, |_| {});
        let b = emitter.on(BoardEventKind::Move, |_| {});
        assert_ne!(a, b);
        emitter.clear();
        assert!(!emitter.has(BoardEventKind::Move));
    }

    #[test]
    fn test_gesture_sequence() {
        let mut tracker = GestureTracker::new();
        let p = Point::new(5.0, 5.0);
        assert_eq!(tracker.pointer_move(p), vec![BoardEvent::Hover(p)]);
        assert_eq!(tracker.pointer_down(p), vec![BoardEvent::Point(p), BoardEvent::MoveStart(p)]);
        assert!(tracker.is_pressed());
        assert_eq!(tracker.pointer_move(p), vec![BoardEvent::Move(p)]);
        assert_eq!(tracker.pointer_up(p), vec![BoardEvent::MoveEnd(p)]);
        assert!(tracker.pointer_up(p).is_empty());
    }

    #[test]
    fn test_leave_while_pressed_ends_move() {
        let mut tracker = GestureTracker::new();
        let p = Point::new(1.0, 1.0);
        tracker.pointer_down(p);
        assert_eq!(tracker.pointer_leave(p), vec![BoardEvent::MoveEnd(p), BoardEvent::Leave(p)]);
        assert!(!tracker.is_pressed());
        assert_eq!(tracker.pointer_leave(p), vec![BoardEvent::Leave(p)]);
    }
}
