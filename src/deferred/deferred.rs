use crate::deferred::task_queue::enqueue_task;
use crate::deferred::task_queue::run_queued_task;
use crate::error::FieldError;
use std::cell::RefCell;
use std::rc::Rc;

/// The outcome a [`Deferred::then`] continuation settles its downstream
/// deferred with: a plain value, another deferred to adopt, or a rejection.
pub enum Settle<T> {
    Value(T),
    Deferred(Deferred<T>),
    Err(FieldError),
}

enum State<T> {
    Pending {
        callbacks: Vec<Box<dyn FnOnce(Result<T, FieldError>)>>,
    },
    Fulfilled(T),
    Rejected(FieldError),
}

/// A settle-once container for an eventual value or rejection; the engine's
/// promise primitive.
///
/// A deferred is in one of three states: pending, fulfilled, or rejected.
/// Once settled the state is terminal; later `resolve`/`reject` calls are
/// no-ops. Continuations registered with [`Deferred::then`] run on the
/// thread-local task queue in FIFO order, never inline.
pub struct Deferred<T>(Rc<RefCell<State<T>>>);
impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred(Rc::clone(&self.0))
    }
}
impl<T: Clone + 'static> Default for Deferred<T> {
    fn default() -> Self {
        Self::pending()
    }
}
impl<T: Clone + 'static> Deferred<T> {
    pub fn pending() -> Self {
        Deferred(Rc::new(RefCell::new(State::Pending { callbacks: vec![] })))
    }

    pub fn fulfilled(value: T) -> Self {
        Deferred(Rc::new(RefCell::new(State::Fulfilled(value))))
    }

    pub fn rejected(error: FieldError) -> Self {
        Deferred(Rc::new(RefCell::new(State::Rejected(error))))
    }

    pub fn is_pending(&self) -> bool {
        matches!(&*self.0.borrow(), State::Pending { .. })
    }

    /// Transition pending -> fulfilled. A no-op once settled.
    pub fn resolve(&self, value: T) {
        self.settle(Ok(value));
    }

    /// Transition pending -> rejected. A no-op once settled.
    pub fn reject(&self, error: FieldError) {
        self.settle(Err(error));
    }

    /// Settle with a [`Settle`] outcome; adopting a deferred outcome chains
    /// this deferred to the other's eventual state.
    pub fn settle_with(&self, outcome: Settle<T>) {
        match outcome {
            Settle::Value(value) => self.resolve(value),
            Settle::Err(error) => self.reject(error),
            Settle::Deferred(other) => {
                let this = self.clone();
                other.subscribe(Box::new(move |result| this.settle(result)));
            }
        }
    }

    /// Register a continuation and return the deferred for its outcome.
    ///
    /// The continuation receives the settled result and is always run from
    /// the task queue. Returning [`Settle::Err`] rejects the downstream
    /// deferred.
    pub fn then<U: Clone + 'static>(
        &self,
        callback: impl FnOnce(Result<T, FieldError>) -> Settle<U> + 'static,
    ) -> Deferred<U> {
        let downstream = Deferred::<U>::pending();
        let downstream_clone = downstream.clone();
        self.subscribe(Box::new(move |result| {
            downstream_clone.settle_with(callback(result));
        }));
        downstream
    }

    /// Settles fulfilled with an index-preserving vector once every item has
    /// settled fulfilled; rejects on the first rejection. Already-settled
    /// items (use [`Deferred::fulfilled`] for plain values) are fine.
    pub fn all(items: Vec<Deferred<T>>) -> Deferred<Vec<T>> {
        if items.is_empty() {
            return Deferred::fulfilled(vec![]);
        }

        let combined = Deferred::<Vec<T>>::pending();
        let slots: Rc<RefCell<Vec<Option<T>>>> =
            Rc::new(RefCell::new(items.iter().map(|_| None).collect()));
        let remaining = Rc::new(RefCell::new(items.len()));

        for (index, item) in items.into_iter().enumerate() {
            let combined = combined.clone();
            let slots = Rc::clone(&slots);
            let remaining = Rc::clone(&remaining);
            item.subscribe(Box::new(move |result| match result {
                Ok(value) => {
                    slots.borrow_mut()[index] = Some(value);
                    *remaining.borrow_mut() -= 1;
                    if *remaining.borrow() == 0 {
                        let values = slots
                            .borrow_mut()
                            .iter_mut()
                            .map(|slot| slot.take().expect("all slots are filled"))
                            .collect();
                        combined.resolve(values);
                    }
                }
                Err(error) => combined.reject(error),
            }));
        }

        combined
    }

    /// Pump the thread-local task queue until this deferred settles, then
    /// return the settled result.
    ///
    /// A deferred that is still pending when the queue runs dry was abandoned
    /// by whoever created it; that is a programming error, surfaced as an
    /// internal (non-client-safe) rejection.
    pub fn wait(&self) -> Result<T, FieldError> {
        while self.is_pending() && run_queued_task() {}

        match &*self.0.borrow() {
            State::Fulfilled(value) => Ok(value.clone()),
            State::Rejected(error) => Err(error.clone()),
            State::Pending { .. } => Err(FieldError::internal(
                "deferred value never settled: the task queue drained while it was still pending",
            )),
        }
    }

    /// Register a callback to be enqueued when this deferred settles. If it
    /// already settled, the callback is enqueued immediately.
    pub(crate) fn subscribe(&self, callback: Box<dyn FnOnce(Result<T, FieldError>)>) {
        let mut state = self.0.borrow_mut();
        match &mut *state {
            State::Pending { callbacks } => callbacks.push(callback),
            State::Fulfilled(value) => {
                let result = Ok(value.clone());
                enqueue_task(Box::new(move || callback(result)));
            }
            State::Rejected(error) => {
                let result = Err(error.clone());
                enqueue_task(Box::new(move || callback(result)));
            }
        }
    }

    fn settle(&self, result: Result<T, FieldError>) {
        let callbacks = {
            let mut state = self.0.borrow_mut();
            let State::Pending { callbacks } = &mut *state else {
                // Settled already; later transitions are no-ops.
                return;
            };
            let callbacks = std::mem::take(callbacks);
            *state = match &result {
                Ok(value) => State::Fulfilled(value.clone()),
                Err(error) => State::Rejected(error.clone()),
            };
            callbacks
        };

        for callback in callbacks {
            let result = result.clone();
            enqueue_task(Box::new(move || callback(result)));
        }
    }
}
