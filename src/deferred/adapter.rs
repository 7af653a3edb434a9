use crate::deferred::Deferred;
use crate::host_value::HostValue;
use std::any::Any;

/// Bridges an external promise library (an async runtime) into the engine.
///
/// The executor itself is written against [`Deferred`]; an adapter's job is
/// to convert foreign async handles into engine deferreds at the resolver
/// boundary ([`PromiseAdapter::adopt`]) and to drive outstanding work when
/// the executor blocks on a result ([`PromiseAdapter::drain`]).
///
/// Adapters must keep their queues isolated per execution (or per thread)
/// when the host runs executions in parallel.
pub trait PromiseAdapter {
    /// Convert a host async handle into an engine deferred. The default
    /// adapter only understands already-adopted deferreds; runtime-specific
    /// adapters downcast `handle` to their promise type and subscribe to it.
    fn adopt(&self, handle: Box<dyn Any>) -> Deferred<HostValue>;

    /// Drive outstanding work until `deferred` settles or no progress can be
    /// made.
    fn drain(&self, deferred: &Deferred<HostValue>);
}

/// The default adapter: the thread-local cooperative task queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncPromiseAdapter;
impl PromiseAdapter for SyncPromiseAdapter {
    fn adopt(&self, handle: Box<dyn Any>) -> Deferred<HostValue> {
        match handle.downcast::<Deferred<HostValue>>() {
            Ok(deferred) => *deferred,
            Err(_) => Deferred::rejected(crate::error::FieldError::internal(
                "the sync promise adapter can only adopt engine deferreds",
            )),
        }
    }

    fn drain(&self, deferred: &Deferred<HostValue>) {
        while deferred.is_pending() && crate::deferred::run_queued_task() {}
    }
}
