//! The inbound figure-collection contract and the built-in observable list.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::core::figure::{FigureId, FigureRef, Subscription};

/// One change to an observed figure collection, carrying the affected
/// figures.
#[derive(Clone)]
pub enum FigureListChange {
    Added(Vec<FigureRef>),
    Removed(Vec<FigureRef>),
    Moved,
    Replaced,
    Reset,
}

impl fmt::Debug for FigureListChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added(figures) => f.debug_tuple("Added").field(&figures.len()).finish(),
            Self::Removed(figures) => f.debug_tuple("Removed").field(&figures.len()).finish(),
            Self::Moved => f.write_str("Moved"),
            Self::Replaced => f.write_str("Replaced"),
            Self::Reset => f.write_str("Reset"),
        }
    }
}

/// Listener invoked with each collection change.
pub type FigureListListener = Rc<dyn Fn(&FigureListChange)>;

/// Inbound contract for the collection a chart plots.
///
/// A plain `Vec<FigureRef>` is a valid (static) collection; observable
/// collections additionally hand out change notifications.
pub trait FigureCollection {
    /// Current contents, in order.
    fn snapshot(&self) -> Vec<FigureRef>;

    /// Optional collection-change-notification capability.
    fn subscribe(&self, listener: FigureListListener) -> Option<Subscription> {
        let _ = listener;
        None
    }
}

impl FigureCollection for Vec<FigureRef> {
    fn snapshot(&self) -> Vec<FigureRef> {
        self.clone()
    }
}

type ListenerSlots = Rc<RefCell<Vec<(u64, FigureListListener)>>>;

/// Built-in observable, ordered figure collection.
#[derive(Default)]
pub struct FigureList {
    items: RefCell<Vec<FigureRef>>,
    listeners: ListenerSlots,
    next_listener_id: Cell<u64>,
}

impl FigureList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_figures(figures: impl IntoIterator<Item = FigureRef>) -> Self {
        let list = Self::new();
        *list.items.borrow_mut() = figures.into_iter().collect();
        list
    }

    pub fn push(&self, figure: FigureRef) {
        self.items.borrow_mut().push(Rc::clone(&figure));
        self.emit(&FigureListChange::Added(vec![figure]));
    }

    /// Removes the figure with the same identity, if present.
    pub fn remove(&self, figure: &FigureRef) -> bool {
        let id = FigureId::of(figure);
        let removed = {
            let mut items = self.items.borrow_mut();
            match items.iter().position(|item| FigureId::of(item) == id) {
                Some(index) => Some(items.remove(index)),
                None => None,
            }
        };
        match removed {
            Some(removed) => {
                self.emit(&FigureListChange::Removed(vec![removed]));
                true
            }
            None => false,
        }
    }

    /// Replaces the figure at `index`; out-of-range indices are ignored.
    pub fn replace(&self, index: usize, figure: FigureRef) {
        {
            let mut items = self.items.borrow_mut();
            let Some(slot) = items.get_mut(index) else {
                return;
            };
            *slot = figure;
        }
        self.emit(&FigureListChange::Replaced);
    }

    /// Moves the figure at `from` to `to`; out-of-range indices are
    /// ignored.
    pub fn move_item(&self, from: usize, to: usize) {
        {
            let mut items = self.items.borrow_mut();
            if from >= items.len() || to >= items.len() {
                return;
            }
            let figure = items.remove(from);
            items.insert(to, figure);
        }
        self.emit(&FigureListChange::Moved);
    }

    /// Removes every figure at once.
    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.emit(&FigureListChange::Reset);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<FigureRef> {
        self.items.borrow().get(index).map(Rc::clone)
    }

    fn emit(&self, change: &FigureListChange) {
        let listeners: Vec<FigureListListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(change);
        }
    }
}

impl fmt::Debug for FigureList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureList")
            .field("len", &self.len())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl FigureCollection for FigureList {
    fn snapshot(&self) -> Vec<FigureRef> {
        self.items.borrow().clone()
    }

    fn subscribe(&self, listener: FigureListListener) -> Option<Subscription> {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let slots = Rc::clone(&self.listeners);
        Some(Subscription::new(move || {
            slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
        }))
    }
}
