use crate::{FieldRef, Position};

/// What changed, passed to every observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Subject {
    /// Phase, step, step mode, current player or the player list.
    Board,
    Player(usize),
    Space(Position),
    Field(FieldRef),
}

/// Handle returned by [`ObserverRegistry::subscribe()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Synchronous change listeners.
///
/// Observers are called in subscription order, before the mutating call
/// returns.
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(ObserverId, Box<dyn FnMut(Subject)>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F: FnMut(Subject) + 'static>(&mut self, observer: F) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if no observer with this id was subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let len_before = self.observers.len();
        self.observers.retain(|(other, _)| *other != id);
        self.observers.len() != len_before
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn notify(&mut self, subject: Subject) {
        for (_, observer) in self.observers.iter_mut() {
            observer(subject);
        }
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}
