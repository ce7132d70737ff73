//! The figure capability contract and the built-in observable figure.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::render::Color;

/// Field of a figure named by a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureField {
    Value,
    Description,
    Color,
}

/// Shared handle to one host figure.
pub type FigureRef = Rc<dyn FigureSource>;

/// Listener invoked with the changed field of an observable figure.
pub type FigureListener = Rc<dyn Fn(FigureField)>;

/// Stable identity token for one figure.
///
/// Identity is the shared allocation, never structural equality: two
/// figures with equal fields stay distinct, and a figure keeps its
/// identity while its fields mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FigureId(usize);

impl FigureId {
    #[must_use]
    pub fn of(figure: &FigureRef) -> Self {
        Self(Rc::as_ptr(figure).cast::<()>() as usize)
    }
}

/// Removal callback obtained at subscribe time.
///
/// `unsubscribe` runs the callback at most once; calling it again (or
/// dropping an already-unsubscribed handle) is a no-op.
pub struct Subscription(Option<Box<dyn FnOnce()>>);

impl Subscription {
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(cancel)))
    }

    pub fn unsubscribe(&mut self) {
        if let Some(cancel) = self.0.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Subscription")
            .field(&self.0.is_some())
            .finish()
    }
}

/// Capability contract for anything a chart can plot.
///
/// Every method has a defaulted fallback, so a host type implements only
/// the capabilities it actually has and heterogeneous figure lists are
/// legal. The defaults: value 0, empty description, light-gray color,
/// not observable.
pub trait FigureSource {
    fn value(&self) -> f64 {
        0.0
    }

    fn description(&self) -> String {
        String::new()
    }

    fn color(&self) -> Color {
        Color::LIGHT_GRAY
    }

    /// Optional change-notification capability.
    ///
    /// Observable figures return a [`Subscription`] that detaches the
    /// listener; non-observable figures return `None` and are simply
    /// re-read when the chart rebuilds.
    fn subscribe(&self, listener: FigureListener) -> Option<Subscription> {
        let _ = listener;
        None
    }
}

type ListenerSlots = Rc<RefCell<Vec<(u64, FigureListener)>>>;

/// Built-in observable figure.
///
/// Setters go through `&self` so a figure can live inside an `Rc` shared
/// between the host and a chart; each setter buffers the new field and
/// notifies every live listener.
pub struct Figure {
    value: Cell<f64>,
    description: RefCell<String>,
    color: Cell<Color>,
    listeners: ListenerSlots,
    next_listener_id: Cell<u64>,
}

impl Figure {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value: Cell::new(value),
            description: RefCell::new(String::new()),
            color: Cell::new(Color::LIGHT_GRAY),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener_id: Cell::new(0),
        }
    }

    #[must_use]
    pub fn with_description(self, description: impl Into<String>) -> Self {
        *self.description.borrow_mut() = description.into();
        self
    }

    #[must_use]
    pub fn with_color(self, color: Color) -> Self {
        self.color.set(color);
        self
    }

    pub fn set_value(&self, value: f64) {
        self.value.set(value);
        self.emit(FigureField::Value);
    }

    pub fn set_description(&self, description: impl Into<String>) {
        *self.description.borrow_mut() = description.into();
        self.emit(FigureField::Description);
    }

    pub fn set_color(&self, color: Color) {
        self.color.set(color);
        self.emit(FigureField::Color);
    }

    fn emit(&self, field: FigureField) {
        // Listeners run outside the borrow; one of them may unsubscribe.
        let listeners: Vec<FigureListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(field);
        }
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure")
            .field("value", &self.value.get())
            .field("description", &self.description.borrow())
            .field("color", &self.color.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl FigureSource for Figure {
    fn value(&self) -> f64 {
        self.value.get()
    }

    fn description(&self) -> String {
        self.description.borrow().clone()
    }

    fn color(&self) -> Color {
        self.color.get()
    }

    fn subscribe(&self, listener: FigureListener) -> Option<Subscription> {
        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let slots = Rc::clone(&self.listeners);
        Some(Subscription::new(move || {
            slots.borrow_mut().retain(|(slot_id, _)| *slot_id != id);
        }))
    }
}
