// ============================================================================
// REACTIVITY - Estado observable y bus de eventos (single-thread)
// ============================================================================
// ReactiveState<T>: guarda el último valor y se lo entrega a cada suscriptor
// nuevo en el momento de suscribirse. Un componente que se suscribe tarde ve
// igualmente el estado actual.
// EventBus<T>: eventos transitorios. Quien no estaba suscrito no los recibe.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Identificador para cancelar una suscripción
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

type Callback<T> = Rc<dyn Fn(&T)>;

struct Subscribers<T> {
    next_id: Cell<u64>,
    callbacks: RefCell<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T> Subscribers<T> {
    fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            callbacks: RefCell::new(Vec::new()),
        }
    }

    fn add(&self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.callbacks.borrow_mut().push((id, callback));
        id
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut callbacks = self.callbacks.borrow_mut();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    /// Copia la lista antes de llamar: un callback puede suscribir o
    /// desuscribir sin chocar con el borrow.
    fn notify(&self, value: &T) {
        let snapshot: Vec<Callback<T>> = self
            .callbacks
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in snapshot {
            callback(value);
        }
    }
}

/// Estado reactivo con reenvío del último valor
pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<Subscribers<T>>,
}

impl<T: Clone + 'static> ReactiveState<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(Subscribers::new()),
        }
    }

    /// Copia del valor actual
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios. El callback recibe el valor actual de inmediato.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let callback: Callback<T> = Rc::new(callback);
        let id = self.subscribers.add(callback.clone());
        let current = self.get();
        callback(&current);
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self) {
        let current = self.get();
        self.subscribers.notify(&current);
    }
}

impl<T: PartialEq + Clone + 'static> ReactiveState<T> {
    /// Como `set`, pero sin notificar si el valor no cambió
    pub fn set_if_changed(&self, new_value: T) -> bool {
        if *self.value.borrow() == new_value {
            return false;
        }
        self.set(new_value);
        true
    }
}

// Los clones comparten valor y suscriptores
impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

/// Canal de eventos transitorios (sin reenvío)
pub struct EventBus<T> {
    subscribers: Rc<Subscribers<T>>,
}

impl<T: 'static> EventBus<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Rc::new(Subscribers::new()),
        }
    }

    pub fn emit(&self, event: T) {
        self.subscribers.notify(&event);
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.add(Rc::new(callback))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
        }
    }
}
