use std::cell::RefCell;
use std::collections::VecDeque;

thread_local! {
    static TASK_QUEUE: RefCell<VecDeque<Box<dyn FnOnce()>>> = RefCell::new(VecDeque::new());
}

/// Enqueue a continuation on this thread's task queue.
///
/// The queue drains strictly FIFO, which is what gives the executor its
/// field-declaration-order guarantee for continuations enqueued within one
/// resolution step.
pub(crate) fn enqueue_task(task: Box<dyn FnOnce()>) {
    TASK_QUEUE.with(|queue| queue.borrow_mut().push_back(task));
}

/// Pop and run the oldest queued task. Returns false when the queue is empty.
///
/// The task must be popped before running: a task may itself enqueue (or
/// drain) further tasks, so the queue cannot stay borrowed across the call.
pub fn run_queued_task() -> bool {
    let task = TASK_QUEUE.with(|queue| queue.borrow_mut().pop_front());
    match task {
        Some(task) => {
            task();
            true
        }
        None => false,
    }
}

/// Number of tasks currently queued on this thread.
pub fn task_queue_len() -> usize {
    TASK_QUEUE.with(|queue| queue.borrow().len())
}
