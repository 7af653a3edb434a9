use crate::deferred::Deferred;
use crate::deferred::Settle;
use crate::error::FieldError;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn resolve_settles_once() {
    let deferred = Deferred::<i64>::pending();
    assert!(deferred.is_pending());

    deferred.resolve(1);
    deferred.resolve(2);
    deferred.reject(FieldError::new("too late"));

    assert_eq!(deferred.wait(), Ok(1));
}

#[test]
fn reject_settles_once() {
    let deferred = Deferred::<i64>::pending();
    deferred.reject(FieldError::new("boom"));
    deferred.resolve(1);

    assert_eq!(deferred.wait(), Err(FieldError::new("boom")));
}

#[test]
fn then_chains_on_fulfillment() {
    let deferred = Deferred::<i64>::pending();
    let chained = deferred.then(|result| match result {
        Ok(value) => Settle::Value(value * 10),
        Err(error) => Settle::Err(error),
    });

    deferred.resolve(4);
    assert_eq!(chained.wait(), Ok(40));
}

#[test]
fn then_error_becomes_rejection() {
    let deferred = Deferred::<i64>::fulfilled(1);
    let chained = deferred.then(|_| -> Settle<i64> { Settle::Err(FieldError::new("nope")) });

    assert_eq!(chained.wait(), Err(FieldError::new("nope")));
}

#[test]
fn settle_with_adopts_deferred_state() {
    let inner = Deferred::<i64>::pending();
    let outer = Deferred::<i64>::pending();
    outer.settle_with(Settle::Deferred(inner.clone()));

    assert!(outer.is_pending());
    inner.resolve(7);
    assert_eq!(outer.wait(), Ok(7));
}

#[test]
fn all_preserves_index_order() {
    let first = Deferred::<i64>::pending();
    let second = Deferred::<i64>::fulfilled(2);
    let third = Deferred::<i64>::pending();

    let combined = Deferred::all(vec![first.clone(), second, third.clone()]);

    // Settle out of declaration order; the result must not care.
    third.resolve(3);
    first.resolve(1);

    assert_eq!(combined.wait(), Ok(vec![1, 2, 3]));
}

#[test]
fn all_rejects_on_first_rejection() {
    let first = Deferred::<i64>::pending();
    let second = Deferred::<i64>::pending();
    let combined = Deferred::all(vec![first.clone(), second.clone()]);

    second.reject(FieldError::new("second failed"));
    first.resolve(1);

    assert_eq!(combined.wait(), Err(FieldError::new("second failed")));
}

#[test]
fn all_of_empty_fulfills_immediately() {
    let combined = Deferred::<i64>::all(vec![]);
    assert_eq!(combined.wait(), Ok(vec![]));
}

#[test]
fn continuations_run_in_fifo_order() {
    let order = Rc::new(RefCell::new(vec![]));
    let deferred = Deferred::<i64>::pending();

    for tag in 0..3 {
        let order = Rc::clone(&order);
        deferred.then(move |_| {
            order.borrow_mut().push(tag);
            Settle::Value(())
        });
    }

    deferred.resolve(0);
    deferred.wait().unwrap();
    while crate::deferred::run_queued_task() {}

    assert_eq!(*order.borrow(), vec![0, 1, 2]);
}

#[test]
fn wait_on_abandoned_deferred_is_internal_error() {
    let deferred = Deferred::<i64>::pending();
    let error = deferred.wait().unwrap_err();
    assert!(!error.is_client_safe);
}
