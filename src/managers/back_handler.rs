//! Hardware back-button registry.
//!
//! Screens subscribe while mounted and get a [`BackSubscription`] guard;
//! dropping the guard removes the handler. The newest handler sees the event
//! first and the first one to return `true` consumes it.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::types::errors::BackHandlerError;

type Handler = Arc<Mutex<dyn FnMut() -> bool + Send>>;

#[derive(Default)]
struct Inner {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Process-wide source of back events with scoped subscriptions.
#[derive(Clone, Default)]
pub struct BackHandlerRegistry {
    inner: Arc<Mutex<Inner>>,
}

impl BackHandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` until the returned guard is dropped.
    pub fn register<F>(&self, handler: F) -> BackSubscription
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let mut inner = lock(&self.inner);
        inner.next_id += 1;
        let id = inner.next_id;
        let handler: Handler = Arc::new(Mutex::new(handler));
        inner.handlers.push((id, handler));
        debug!("Registered back handler {}", id);
        BackSubscription {
            id,
            registry: self.clone(),
            active: true,
        }
    }

    /// Offers a back event to the registered handlers, newest first.
    ///
    /// Returns `false` when nobody consumed it, meaning the default platform
    /// behaviour applies. Handlers run without the registry lock held, so
    /// they may register or drop subscriptions.
    pub fn dispatch(&self) -> bool {
        let snapshot: Vec<Handler> = lock(&self.inner)
            .handlers
            .iter()
            .rev()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in snapshot {
            let mut f = handler.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            if (&mut *f)() {
                return true;
            }
        }
        false
    }

    pub fn handler_count(&self) -> usize {
        lock(&self.inner).handlers.len()
    }

    fn unregister(&self, id: u64) -> Result<(), BackHandlerError> {
        let mut inner = lock(&self.inner);
        let before = inner.handlers.len();
        inner.handlers.retain(|(hid, _)| *hid != id);
        if inner.handlers.len() == before {
            return Err(BackHandlerError::NotRegistered(id));
        }
        debug!("Removed back handler {}", id);
        Ok(())
    }
}

/// Guard for one registered back handler.
pub struct BackSubscription {
    id: u64,
    registry: BackHandlerRegistry,
    active: bool,
}

impl BackSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Removes the handler now instead of on drop.
    pub fn remove(mut self) -> Result<(), BackHandlerError> {
        self.active = false;
        self.registry.unregister(self.id)
    }
}

impl Drop for BackSubscription {
    fn drop(&mut self) {
        if self.active {
            let _ = self.registry.unregister(self.id);
        }
    }
}

fn lock(inner: &Mutex<Inner>) -> std::sync::MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
