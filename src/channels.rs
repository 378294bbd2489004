//! In-process reactive channels.
//!
//! A [`Subject`] is a cloneable broadcast point: every call to
//! [`Subject::next`] delivers a clone of the value to each live subscriber's
//! `mpsc` receiver. Subscribing hands back a [`Subscription`], which splits
//! into the typed receiver and a type-erased [`SubscriptionHandle`]. Handles
//! are collected in a [`SubscriptionSet`] so that everything acquired at
//! initialization can be released together, exactly once.
//!
//! Producers may live on other threads; consumers drain their receivers on
//! the UI thread.

use std::fmt;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Listener<T> {
    id: u64,
    sender: Sender<T>,
}

struct SubjectInner<T> {
    next_id: u64,
    listeners: Vec<Listener<T>>,
}

/// Broadcast channel with explicit subscribe/unsubscribe.
pub struct Subject<T> {
    inner: Arc<Mutex<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T> {
    /// Number of currently attached subscribers.
    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SubjectInner {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Attach a new subscriber. Only values emitted after this call are seen.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = std::sync::mpsc::channel();
        let id = {
            let mut inner = lock(&self.inner);
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push(Listener { id, sender: tx });
            id
        };
        let source: Weak<Mutex<SubjectInner<T>>> = Arc::downgrade(&self.inner);
        let handle = SubscriptionHandle::new(move || {
            if let Some(inner) = source.upgrade() {
                lock(&inner).listeners.retain(|l| l.id != id);
            }
        });
        Subscription { rx, handle }
    }

    /// Emit `value` to every subscriber. Subscribers whose receiver was
    /// dropped are pruned.
    pub fn next(&self, value: T) {
        let mut inner = lock(&self.inner);
        inner
            .listeners
            .retain(|l| l.sender.send(value.clone()).is_ok());
    }
}

/// A live subscription: the receiving end plus its release handle.
pub struct Subscription<T> {
    rx: Receiver<T>,
    handle: SubscriptionHandle,
}

impl<T> Subscription<T> {
    /// Pop the next pending value without blocking.
    pub fn try_next(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Split into the receiver and the release handle.
    pub fn into_parts(self) -> (Receiver<T>, SubscriptionHandle) {
        (self.rx, self.handle)
    }
}

/// Type-erased release handle for one subscription.
///
/// Releasing is idempotent; a handle that is dropped without being released
/// releases itself.
pub struct SubscriptionHandle {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionHandle {
    fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Detach from the source channel. Returns `true` only on the call that
    /// actually released it.
    pub fn unsubscribe(&mut self) -> bool {
        match self.release.take() {
            Some(release) => {
                release();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// The set of handles acquired by one owner, keyed by channel.
#[derive(Debug)]
pub struct SubscriptionSet<K> {
    handles: Vec<(K, SubscriptionHandle)>,
}

impl<K> Default for SubscriptionSet<K> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq + fmt::Debug> SubscriptionSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, handle: SubscriptionHandle) {
        self.handles.push((key, handle));
    }

    pub fn contains(&self, key: K) -> bool {
        self.handles.iter().any(|(k, _)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Release every held handle and return the keys that were released.
    /// The set is empty afterwards, so a second call releases nothing.
    pub fn release_all(&mut self) -> Vec<K> {
        let mut released = Vec::with_capacity(self.handles.len());
        for (key, mut handle) in self.handles.drain(..) {
            if handle.unsubscribe() {
                released.push(key);
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_reaches_every_subscriber() {
        let subject = Subject::new();
        let a = subject.subscribe();
        let b = subject.subscribe();
        subject.next(7u32);
        assert_eq!(a.try_next(), Some(7));
        assert_eq!(b.try_next(), Some(7));
        assert_eq!(a.try_next(), None);
    }

    #[test]
    fn values_before_subscribe_are_not_replayed() {
        let subject = Subject::new();
        subject.next(1u32);
        let sub = subject.subscribe();
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn unsubscribe_detaches_exactly_once() {
        let subject: Subject<u32> = Subject::new();
        let (_rx, mut handle) = subject.subscribe().into_parts();
        assert_eq!(subject.listener_count(), 1);
        assert!(handle.unsubscribe());
        assert!(!handle.unsubscribe());
        assert_eq!(subject.listener_count(), 0);
    }

    #[test]
    fn dropped_handle_releases_itself() {
        let subject: Subject<u32> = Subject::new();
        {
            let _sub = subject.subscribe();
            assert_eq!(subject.listener_count(), 1);
        }
        assert_eq!(subject.listener_count(), 0);
    }

    #[test]
    fn dropped_receiver_is_pruned_on_next() {
        let subject: Subject<u32> = Subject::new();
        let (rx, handle) = subject.subscribe().into_parts();
        drop(rx);
        subject.next(3);
        assert_eq!(subject.listener_count(), 0);
        drop(handle);
    }

    #[test]
    fn release_all_reports_keys_and_empties_set() {
        let a: Subject<u32> = Subject::new();
        let b: Subject<String> = Subject::new();
        let mut set = SubscriptionSet::new();
        let (_ra, ha) = a.subscribe().into_parts();
        let (_rb, hb) = b.subscribe().into_parts();
        set.insert("a", ha);
        set.insert("b", hb);
        assert!(set.contains("a"));
        assert_eq!(set.release_all(), vec!["a", "b"]);
        assert!(set.is_empty());
        assert!(set.release_all().is_empty());
        assert_eq!(a.listener_count(), 0);
        assert_eq!(b.listener_count(), 0);
    }
}
