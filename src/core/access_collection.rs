use indexmap::IndexMap;

use crate::core::figure::{FigureId, FigureRef};
use crate::core::figure_access::FigureAccess;

/// Insertion-ordered set of figure accesses, keyed by figure identity.
///
/// At most one access exists per live figure identity; lookups run both
/// by identity token and by the original figure reference, which is how
/// a host removal notification finds the access to tear down.
#[derive(Debug, Default)]
pub struct FigureAccessCollection {
    entries: IndexMap<FigureId, FigureAccess>,
}

impl FigureAccessCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an access under its figure's identity.
    ///
    /// Returns `false` (and keeps the existing entry) when the identity
    /// is already tracked.
    pub(crate) fn insert(&mut self, access: FigureAccess) -> bool {
        let id = access.id();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, access);
        true
    }

    pub(crate) fn remove(&mut self, id: FigureId) -> Option<FigureAccess> {
        // shift_remove keeps the remaining accesses in insertion order.
        self.entries.shift_remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: FigureId) -> Option<&FigureAccess> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: FigureId) -> Option<&mut FigureAccess> {
        self.entries.get_mut(&id)
    }

    #[must_use]
    pub fn get_by_source(&self, figure: &FigureRef) -> Option<&FigureAccess> {
        self.get(FigureId::of(figure))
    }

    pub(crate) fn get_mut_by_source(&mut self, figure: &FigureRef) -> Option<&mut FigureAccess> {
        self.get_mut(FigureId::of(figure))
    }

    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&FigureAccess> {
        self.entries.get_index(index).map(|(_, access)| access)
    }

    #[must_use]
    pub fn contains(&self, id: FigureId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FigureAccess> {
        self.entries.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut FigureAccess> {
        self.entries.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::FigureAccessCollection;
    use crate::core::figure::{Figure, FigureId, FigureRef};
    use crate::core::figure_access::{FieldChangeSink, FigureAccess};
    use std::rc::Rc;

    fn access_for(figure: &FigureRef) -> FigureAccess {
        let sink: FieldChangeSink = Rc::new(|_, _| {});
        FigureAccess::new(Rc::clone(figure), false, &sink)
    }

    #[test]
    fn keeps_insertion_order_and_rejects_duplicates() {
        let first: FigureRef = Rc::new(Figure::new(1.0));
        let second: FigureRef = Rc::new(Figure::new(2.0));

        let mut collection = FigureAccessCollection::new();
        assert!(collection.insert(access_for(&first)));
        assert!(collection.insert(access_for(&second)));
        assert!(!collection.insert(access_for(&first)));
        assert_eq!(collection.len(), 2);

        let values: Vec<f64> = collection.iter().map(|access| access.value()).collect();
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn removal_preserves_remaining_order() {
        let figures: Vec<FigureRef> = (0..4).map(|i| Rc::new(Figure::new(f64::from(i))) as FigureRef).collect();

        let mut collection = FigureAccessCollection::new();
        for figure in &figures {
            collection.insert(access_for(figure));
        }

        assert!(collection.remove(FigureId::of(&figures[1])).is_some());
        assert!(collection.remove(FigureId::of(&figures[1])).is_none());

        let values: Vec<f64> = collection.iter().map(|access| access.value()).collect();
        assert_eq!(values, vec![0.0, 2.0, 3.0]);
        assert!(collection.get_by_source(&figures[2]).is_some());
        assert_eq!(collection.get_index(1).map(FigureAccess::value), Some(2.0));
    }
}
