use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// The engine-side registry of custom URL scheme handlers.
pub trait ProtocolBackend: Send + Sync + 'static {
    fn register(&self, scheme: &str);
    fn deregister(&self, scheme: &str);
}

struct Shared<B> {
    backend: B,
    holders: Mutex<HashMap<String, usize>>,
}

/// Reference-counted handle over a [`ProtocolBackend`].
///
/// Map sections take a [`ProtocolLease`] for every scheme their sources use.
/// The first lease for a scheme registers the handler, the last one to drop
/// deregisters it, so sections mounted side by side never pull a handler out
/// from under each other.
pub struct ProtocolRegistry<B> {
    shared: Arc<Shared<B>>,
}

impl<B> Clone for ProtocolRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: ProtocolBackend> ProtocolRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend,
                holders: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn acquire(&self, scheme: &str) -> ProtocolLease<B> {
        let mut holders = self
            .shared
            .holders
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let count = holders.entry(scheme.to_owned()).or_insert(0);
        if *count == 0 {
            self.shared.backend.register(scheme);
        }
        *count += 1;
        ProtocolLease {
            shared: Arc::clone(&self.shared),
            scheme: scheme.to_owned(),
        }
    }

    /// Number of live leases for `scheme`.
    pub fn holders(&self, scheme: &str) -> usize {
        self.shared
            .holders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(scheme)
            .copied()
            .unwrap_or(0)
    }

    pub fn backend(&self) -> &B {
        &self.shared.backend
    }
}

/// Released exactly once, on drop.
pub struct ProtocolLease<B: ProtocolBackend> {
    shared: Arc<Shared<B>>,
    scheme: String,
}

impl<B: ProtocolBackend> ProtocolLease<B> {
    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl<B: ProtocolBackend> Drop for ProtocolLease<B> {
    fn drop(&mut self) {
        let mut holders = self
            .shared
            .holders
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(count) = holders.get_mut(&self.scheme) else {
            return;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            holders.remove(&self.scheme);
            self.shared.backend.deregister(&self.scheme);
        }
    }
}
