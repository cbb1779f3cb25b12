//! Values confined to the UI thread
//!
//! A [`Confined<T>`] keeps its value in a registry local to the UI thread and
//! hands out an id-based handle that any thread may hold. Access always runs
//! on the UI thread, so `T` itself needs neither `Send` nor a lock.

use std::any::Any;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::error::{PlatformError, Result};
use crate::looper::{MainLooper, MainThread};

thread_local! {
    static REGISTRY: RefCell<FxHashMap<u64, Box<dyn Any>>> = RefCell::new(FxHashMap::default());
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a value owned by the UI thread.
///
/// Cloning the handle does not clone the value. The value lives until
/// [`Confined::release`] is called.
pub struct Confined<T: 'static> {
    id: u64,
    main: MainThread,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Clone for Confined<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            main: self.main.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: 'static> std::fmt::Debug for Confined<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Confined")
            .field("id", &self.id)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: 'static> Confined<T> {
    /// Register `value` from the UI thread.
    ///
    /// Borrowing the looper proves the caller is on its thread.
    pub fn new(looper: &MainLooper, value: T) -> Self {
        Self::register(looper.handle(), value)
    }

    /// Build the value on the UI thread from any thread
    pub fn spawn<F>(main: &MainThread, init: F) -> Result<Self>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = main.clone();
        main.send_blocking(move || Self::register(handle, init()))
    }

    fn register(main: MainThread, value: T) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let cell: Rc<RefCell<T>> = Rc::new(RefCell::new(value));
        REGISTRY.with(|registry| registry.borrow_mut().insert(id, Box::new(cell)));
        Self {
            id,
            main,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn main_thread(&self) -> &MainThread {
        &self.main
    }

    /// Run `f` against the value on the UI thread and return its result
    pub fn with<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut T) -> R + Send + 'static,
    {
        let id = self.id;
        self.main.send_blocking(move || with_local::<T, R>(id, f))?
    }

    /// Whether the value is still registered
    pub fn is_alive(&self) -> bool {
        let id = self.id;
        self.main
            .send_blocking(move || lookup::<T>(id).is_some())
            .unwrap_or(false)
    }

    /// Drop the value on the UI thread.
    ///
    /// Returns `false` when it was already released.
    pub fn release(&self) -> Result<bool> {
        let id = self.id;
        self.main.send_blocking(move || {
            // removed first so the value's own Drop may touch the registry
            let removed = REGISTRY.with(|registry| registry.borrow_mut().remove(&id));
            removed.is_some()
        })
    }
}

fn lookup<T: 'static>(id: u64) -> Option<Rc<RefCell<T>>> {
    REGISTRY.with(|registry| {
        registry
            .borrow()
            .get(&id)
            .and_then(|slot| slot.downcast_ref::<Rc<RefCell<T>>>())
            .cloned()
    })
}

fn with_local<T: 'static, R>(id: u64, f: impl FnOnce(&mut T) -> R) -> Result<R> {
    let cell = lookup::<T>(id).ok_or(PlatformError::Released(id))?;
    let mut value = cell
        .try_borrow_mut()
        .map_err(|_| PlatformError::Reentrant(id))?;
    Ok(f(&mut *value))
}

/// A UI-thread object driven by host message codes
pub trait MessageHandler {
    type Message: Send + 'static;
    type Reply: Send + 'static;

    /// Handle one message; `None` means the message was not handled
    fn handle_message(&mut self, message: Self::Message) -> Option<Self::Reply>;
}

impl<T: MessageHandler + 'static> Confined<T> {
    /// Deliver `message` on the UI thread and wait for the reply
    pub fn send_message(&self, message: T::Message) -> Result<Option<T::Reply>> {
        self.with(move |handler| handler.handle_message(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    struct Counter {
        hits: u32,
        // not Send: proves the value never leaves the UI thread
        _local: Rc<()>,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                hits: 0,
                _local: Rc::new(()),
            }
        }
    }

    enum CounterMsg {
        Bump,
        Read,
        Unknown,
    }

    impl MessageHandler for Counter {
        type Message = CounterMsg;
        type Reply = u32;

        fn handle_message(&mut self, message: CounterMsg) -> Option<u32> {
            match message {
                CounterMsg::Bump => {
                    self.hits += 1;
                    Some(self.hits)
                }
                CounterMsg::Read => Some(self.hits),
                CounterMsg::Unknown => None,
            }
        }
    }

    #[test]
    fn test_with_on_ui_thread() {
        let looper = MainLooper::prepare();
        let counter = Confined::new(&looper, Counter::new());
        assert_eq!(counter.with(|c| c.hits), Ok(0));
        assert_eq!(counter.send_message(CounterMsg::Bump), Ok(Some(1)));
        assert_eq!(counter.send_message(CounterMsg::Unknown), Ok(None));
        assert!(counter.is_alive());
    }

    #[test]
    fn test_reentrant_access_is_an_error() {
        let looper = MainLooper::prepare();
        let counter = Confined::new(&looper, Counter::new());
        let inner = counter.clone();
        let nested = counter.with(move |_| inner.with(|c| c.hits)).unwrap();
        assert_eq!(nested, Err(PlatformError::Reentrant(counter.id())));
    }

    #[test]
    fn test_released_value() {
        let looper = MainLooper::prepare();
        let counter = Confined::new(&looper, Counter::new());
        assert_eq!(counter.release(), Ok(true));
        assert_eq!(counter.release(), Ok(false));
        assert!(!counter.is_alive());
        assert_eq!(
            counter.with(|c| c.hits),
            Err(PlatformError::Released(counter.id()))
        );
    }

    #[test]
    fn test_message_from_worker_thread() {
        let looper = MainLooper::prepare();
        let counter = Confined::new(&looper, Counter::new());

        let worker = {
            let counter = counter.clone();
            thread::spawn(move || {
                let first = counter.send_message(CounterMsg::Bump).unwrap();
                let second = counter.send_message(CounterMsg::Bump).unwrap();
                counter.main_thread().quit().unwrap();
                (first, second)
            })
        };

        looper.run();
        assert_eq!(worker.join().unwrap(), (Some(1), Some(2)));
        assert_eq!(counter.send_message(CounterMsg::Read), Ok(Some(2)));
    }

    #[test]
    fn test_spawn_from_worker_thread() {
        let looper = MainLooper::prepare();
        let main = looper.handle();

        let worker = thread::spawn(move || {
            let counter = Confined::spawn(&main, Counter::new).unwrap();
            counter.send_message(CounterMsg::Bump).unwrap();
            main.quit().unwrap();
            counter
        });

        looper.run();
        let counter = worker.join().unwrap();
        assert_eq!(counter.with(|c| c.hits), Ok(1));
    }
}
