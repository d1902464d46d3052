use core::future::Future;
use core::mem;
use alloc::sync::Arc;
use std::thread::{self, JoinHandle};

use async_task::Runnable;
use log::debug;

use crate::{Task, block_on};

// -----------------------------------------------------------------------------
// OnDrop

struct CallOnDrop(Option<Arc<dyn Fn() + Send + Sync + 'static>>);

impl Drop for CallOnDrop {
    fn drop(&mut self) {
        if let Some(call) = self.0.as_ref() {
            call();
        }
    }
}

// -----------------------------------------------------------------------------
// TaskPoolBuilder

/// Builder for creating a [`TaskPool`].
///
/// Currently configurable parameters:
///
/// - [`thread_num`]: Number of worker threads to spawn.
///   Defaults to the number of logical cores on the system.
///
/// - [`thread_name`]: Thread name prefix. If set, threads are named in the format
///   `{thread_name} ({id})`, e.g., `loader (1)`. Default: `TaskPool ({id})`.
///
/// - [`stack_size`]: Stack size for worker threads. Default is system-dependent.
///
/// - [`on_thread_spawn`]: Callback executed once when each thread spawns.
///
/// - [`on_thread_destroy`]: Callback executed once when each thread is about to terminate.
///
/// # Examples
///
/// ```
/// use vc_task::{TaskPoolBuilder, block_on};
///
/// let task_pool = TaskPoolBuilder::new()
///     .thread_num(2)
///     .thread_name(String::from("doc"))
///     .build();
///
/// let tasks: Vec<_> = (0..100_u32)
///     .map(|i| task_pool.spawn(async move { i * 2 }))
///     .collect();
///
/// let sum: u32 = tasks.into_iter().map(block_on).sum();
/// assert_eq!(sum, 9900);
/// ```
///
/// [`thread_num`]: Self::thread_num
/// [`thread_name`]: Self::thread_name
/// [`stack_size`]: Self::stack_size
/// [`on_thread_spawn`]: Self::on_thread_spawn
/// [`on_thread_destroy`]: Self::on_thread_destroy
#[derive(Default)]
#[must_use]
pub struct TaskPoolBuilder {
    /// Number of threads. If `None`, uses logical core count.
    thread_num: Option<usize>,
    /// Custom stack size.
    stack_size: Option<usize>,
    /// Thread name prefix.
    thread_name: Option<String>,
    /// Called on thread spawn.
    on_thread_spawn: Option<Arc<dyn Fn() + Send + Sync + 'static>>,
    /// Called on thread termination.
    on_thread_destroy: Option<Arc<dyn Fn() + Send + Sync + 'static>>,
}

impl TaskPoolBuilder {
    /// Creates a new [`TaskPoolBuilder`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            thread_num: None,
            stack_size: None,
            thread_name: None,
            on_thread_spawn: None,
            on_thread_destroy: None,
        }
    }

    /// Sets the number of threads in the pool.
    ///
    /// If unset, defaults to the system's logical core count.
    /// A pool always owns at least one thread.
    #[inline]
    pub fn thread_num(mut self, thread_num: usize) -> Self {
        self.thread_num = Some(thread_num);
        self
    }

    /// Override the stack size of the threads created for the pool.
    #[inline]
    pub fn stack_size(mut self, stack_size: usize) -> Self {
        self.stack_size = Some(stack_size);
        self
    }

    /// Sets the thread name prefix.
    ///
    /// Threads will be named `<thread_name> (<thread_index>)`, e.g., `MyThreadPool (2)`.
    #[inline]
    pub fn thread_name(mut self, thread_name: String) -> Self {
        self.thread_name = Some(thread_name);
        self
    }

    /// Sets a callback invoked once per thread when it starts.
    ///
    /// Executed on the thread itself, before it picks up any task.
    #[inline]
    pub fn on_thread_spawn(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_thread_spawn = Some(Arc::new(f));
        self
    }

    /// Sets a callback invoked once per thread when it terminates.
    ///
    /// Executed on the thread itself. Blocks thread termination until
    /// the callback completes.
    #[inline]
    pub fn on_thread_destroy(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_thread_destroy = Some(Arc::new(f));
        self
    }

    /// Creates a [`TaskPool`] with the configured options.
    #[inline]
    pub fn build(self) -> TaskPool {
        TaskPool::new_internal(self)
    }
}

// -----------------------------------------------------------------------------
// TaskPool

/// A thread pool for executing `'static` tasks.
///
/// Spawned futures are pushed into a shared queue, every worker thread pulls
/// from it and runs the task until it yields. A woken task is pushed back
/// into the same queue, so it may resume on any worker.
///
/// Dropping the pool closes the queue and joins the workers, tasks that have
/// not completed by then are canceled.
///
/// # Examples
///
/// ```
/// use vc_task::{TaskPool, block_on};
///
/// let task_pool = TaskPool::new();
/// let task = task_pool.spawn(async { 1 + 1 });
///
/// assert_eq!(block_on(task), 2);
/// ```
#[derive(Debug)]
pub struct TaskPool {
    /// Queue of scheduled runnables.
    queue: async_channel::Sender<Runnable>,
    /// Worker threads.
    threads: Box<[JoinHandle<()>]>,
}

impl TaskPool {
    /// Creates a `TaskPool` with default configuration.
    ///
    /// The number of threads created by this function is depends on
    /// [`std::thread::available_parallelism`], not less than `1`.
    pub fn new() -> Self {
        TaskPoolBuilder::new().build()
    }

    /// Creates a [`TaskPoolBuilder`].
    #[inline]
    pub const fn builder() -> TaskPoolBuilder {
        TaskPoolBuilder::new()
    }

    fn new_internal(builder: TaskPoolBuilder) -> Self {
        let (queue, receiver) = async_channel::unbounded::<Runnable>();

        let thread_num = builder
            .thread_num
            .unwrap_or_else(|| thread::available_parallelism().map_or(1, |n| n.get()))
            .max(1);

        let threads: Box<[JoinHandle<()>]> = (0..thread_num)
            .map(|i| {
                let receiver = receiver.clone();

                let thread_name = if let Some(thread_name) = builder.thread_name.as_deref() {
                    format!("{thread_name} ({i})")
                } else {
                    format!("TaskPool ({i})")
                };

                let mut thread_builder = thread::Builder::new().name(thread_name);

                if let Some(stack_size) = builder.stack_size {
                    thread_builder = thread_builder.stack_size(stack_size);
                }

                let on_thread_spawn = builder.on_thread_spawn.clone();
                let on_thread_destroy = builder.on_thread_destroy.clone();

                thread_builder
                    .spawn(move || {
                        if let Some(on_spawn) = on_thread_spawn {
                            on_spawn();
                        }

                        let _destructor = CallOnDrop(on_thread_destroy);

                        // Panics are caught by the runnable and resurface in the `Task`.
                        while let Ok(runnable) = block_on(receiver.recv()) {
                            runnable.run();
                        }
                    })
                    .expect("Failed to spawn thread.")
            })
            .collect();

        debug!("task pool started with {thread_num} worker threads");

        Self { queue, threads }
    }

    /// Returns the number of worker threads in the pool.
    #[inline]
    pub fn thread_num(&self) -> usize {
        self.threads.len()
    }

    /// Spawns a `'static` future onto the pool.
    ///
    /// The returned [`Task`] resolves to the output of the future. Dropping
    /// it cancels the future, use [`Task::detach`] to keep it running.
    pub fn spawn<T: Send + 'static>(
        &self,
        future: impl Future<Output = T> + Send + 'static,
    ) -> Task<T> {
        let queue = self.queue.clone();

        // A closed queue drops the runnable, which cancels the task.
        let schedule = move |runnable: Runnable| {
            let _ = queue.try_send(runnable);
        };

        let (runnable, task) = async_task::Builder::new()
            .propagate_panic(true)
            .spawn(move |_| future, schedule);

        runnable.schedule();
        Task(task)
    }
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.queue.close();

        let panicking = thread::panicking();
        let current = thread::current().id();

        let threads = mem::replace(&mut self.threads, Box::new([]));

        for join_handle in threads {
            // The last handle may be released by a task running on the pool.
            if join_handle.thread().id() == current {
                continue;
            }
            let res = join_handle.join();
            if !panicking {
                res.expect("Task thread panicked while executing.");
            }
        }

        debug!("task pool shut down");
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{TaskPool, TaskPoolBuilder};
    use crate::block_on;

    #[test]
    fn thread_num_is_at_least_one() {
        let pool = TaskPoolBuilder::new().thread_num(0).build();
        assert_eq!(pool.thread_num(), 1);

        let pool = TaskPoolBuilder::new().thread_num(3).build();
        assert_eq!(pool.thread_num(), 3);
    }

    #[test]
    fn spawn_and_join() {
        let pool = TaskPoolBuilder::new().thread_num(4).build();
        let counter = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let counter = Arc::clone(&counter);
                pool.spawn(async move {
                    counter.fetch_add(1, Ordering::AcqRel);
                    i
                })
            })
            .collect();

        let sum: usize = tasks.into_iter().map(block_on).sum();

        assert_eq!(sum, (0..64).sum());
        assert_eq!(counter.load(Ordering::Acquire), 64);
    }

    #[test]
    fn fan_in_through_channel() {
        let pool = TaskPoolBuilder::new().thread_num(2).build();
        let (tx, rx) = async_channel::unbounded::<u32>();

        let tasks: Vec<_> = (0..10_u32)
            .map(|i| {
                let tx = tx.clone();
                pool.spawn(async move {
                    let _ = tx.send(i).await;
                })
            })
            .collect();
        drop(tx);

        tasks.into_iter().for_each(block_on);

        let mut values: Vec<u32> = core::iter::from_fn(|| rx.try_recv().ok()).collect();
        values.sort_unstable();
        assert_eq!(values, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn thread_callbacks_run() {
        let spawned = Arc::new(AtomicUsize::new(0));
        let destroyed = Arc::new(AtomicUsize::new(0));

        {
            let spawned = Arc::clone(&spawned);
            let destroyed = Arc::clone(&destroyed);
            let pool = TaskPoolBuilder::new()
                .thread_num(2)
                .on_thread_spawn(move || {
                    spawned.fetch_add(1, Ordering::AcqRel);
                })
                .on_thread_destroy(move || {
                    destroyed.fetch_add(1, Ordering::AcqRel);
                })
                .build();

            // Each worker runs its spawn callback before taking a task.
            block_on(pool.spawn(async {}));
        }

        assert_eq!(destroyed.load(Ordering::Acquire), 2);
        assert_eq!(spawned.load(Ordering::Acquire), 2);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn panic_resurfaces_in_task() {
        let pool = TaskPool::new();
        block_on(pool.spawn(async {
            if true {
                panic!("boom");
            }
        }));
    }
}
