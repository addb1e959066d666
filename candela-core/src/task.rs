use tokio::task::JoinHandle;

/// Abstraction over a spawned task that can be queried for completion
/// and aborted.
pub trait Joinable {
    /// Abort the underlying task if it is still running.
    fn abort(&mut self);
    /// Return `true` if the underlying task has completed.
    fn is_finished(&self) -> bool;
}

impl Joinable for JoinHandle<()> {
    fn abort(&mut self) {
        // JoinHandle::abort takes &self
        Self::abort(self);
    }

    fn is_finished(&self) -> bool {
        Self::is_finished(self)
    }
}

/// Abstraction over a one-shot stop signal.
pub trait StopSignal {
    /// Send a best-effort stop signal to request graceful shutdown.
    fn fire(self);
}

impl StopSignal for tokio::sync::oneshot::Sender<()> {
    fn fire(self) {
        let _ = self.send(());
    }
}

/// Owner of a background task and its stop channel.
///
/// Dropping the guard fires the stop signal, if still held, and then
/// aborts the task unless it already finished. A graceful shutdown
/// calls [`fire_stop`](Self::fire_stop), pulls the task out with
/// [`take_task`](Self::take_task) and awaits the join outside the
/// guard; the later drop then has nothing left to abort.
pub struct TaskGuard<J: Joinable, S: StopSignal> {
    task: Option<J>,
    stop: Option<S>,
}

impl<J: Joinable, S: StopSignal> TaskGuard<J, S> {
    /// Wrap a freshly spawned task and its stop channel.
    pub fn new(task: J, stop: S) -> Self {
        Self {
            task: Some(task),
            stop: Some(stop),
        }
    }

    /// Fire the stop signal now. The signal is consumed, so a later
    /// drop will not fire it again.
    pub fn fire_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.fire();
        }
    }

    /// Take the task out of the guard, leaving nothing to abort on drop.
    pub fn take_task(&mut self) -> Option<J> {
        self.task.take()
    }
}

impl<J: Joinable, S: StopSignal> Drop for TaskGuard<J, S> {
    fn drop(&mut self) {
        self.fire_stop();
        if let Some(mut task) = self.task.take()
            && !task.is_finished()
        {
            task.abort();
        }
    }
}
