//! Task Boundary Services
//!
//! Task lifecycle and task-directed operations. Two conventions apply
//! throughout:
//!
//! - The null handle names the calling task wherever a target is
//!   optional, so a task never needs a pooled handle for itself
//! - A handle that does not translate stops the operation at the
//!   boundary and the kernel is never invoked with a forged target

use crate::gate::Gate;
use crate::kernel::{
    IsrWake, NotifyAction, Scheduler, TaskFlags, TaskServices, TaskSpec, Ticks,
};
use crate::pool::{TaskHandle, TaskRef};
use crate::port::Port;

impl<K, P, const N: usize> Gate<K, P, N>
where
    K: TaskServices + Scheduler,
    P: Port,
{
    /// Creates a task and returns its handle.
    ///
    /// When the caller is unprivileged, the `PRIVILEGED` flag is stripped
    /// from `spec` before the crossing, so an unprivileged task can never
    /// mint a privileged one. Returns `None` when the pool is exhausted
    /// (the kernel is not invoked) or when the kernel rejects the creation
    /// (the reserved slot is rolled back).
    pub fn task_create(&self, spec: &TaskSpec<'_>) -> Option<TaskHandle> {
        // Captured before the bracket raises; inside it everyone looks
        // privileged.
        let caller_privileged = P::is_privileged();
        let mut spec = *spec;
        if !caller_privileged {
            spec.flags.remove(TaskFlags::PRIVILEGED);
        }
        self.system_call(|| self.create_object(|kernel| kernel.task_create(&spec)))
    }

    /// Deletes a task. The null handle deletes the calling task.
    ///
    /// The slot is retired before the kernel call: deleting the calling
    /// task does not return, and a slot retired late is a slot leaked.
    pub fn task_delete(&self, handle: TaskHandle) {
        self.system_call(|| {
            if handle.is_null() {
                if let Some(current) = self.kernel.current_task() {
                    if let Some(index) = self.locate_slot(current) {
                        self.retire_slot(index);
                    }
                }
                self.kernel.task_delete(None);
            } else if let Some((index, task)) = self.pool.resolve_entry(handle) {
                self.retire_slot(index);
                self.kernel.task_delete(Some(task));
            }
        });
    }

    /// Suspends a task. The null handle suspends the calling task.
    pub fn task_suspend(&self, handle: TaskHandle) {
        self.system_call(|| {
            if let Some(target) = self.target_task(handle) {
                self.kernel.task_suspend(target);
            }
        });
    }

    /// Resumes a suspended task.
    pub fn task_resume(&self, handle: TaskHandle) {
        self.system_call(|| {
            if let Some(task) = self.pool.resolve(handle) {
                self.kernel.task_resume(task);
            }
        });
    }

    /// Resumes a suspended task from an interrupt handler. Returns true
    /// when the resumed task should preempt on interrupt exit.
    pub fn task_resume_from_isr(&self, handle: TaskHandle) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(task) => self.kernel.task_resume_from_isr(task),
            None => false,
        })
    }

    /// Priority of a task. The null handle queries the calling task.
    pub fn task_priority(&self, handle: TaskHandle) -> Option<u8> {
        self.system_call(|| {
            let target = self.target_task(handle)?;
            Some(self.kernel.task_priority(target))
        })
    }

    /// Changes a task's priority. The null handle targets the calling
    /// task.
    pub fn task_set_priority(&self, handle: TaskHandle, priority: u8) {
        self.system_call(|| {
            if let Some(target) = self.target_task(handle) {
                self.kernel.task_set_priority(target, priority);
            }
        });
    }

    /// Blocks the calling task for `ticks`.
    pub fn task_delay(&self, ticks: Ticks) {
        self.system_call(|| self.kernel.task_delay(ticks));
    }

    /// Blocks the calling task until `previous_wake + period`, updating
    /// `previous_wake` for the next cycle. Returns true when the task
    /// actually slept.
    pub fn task_delay_until(&self, previous_wake: &mut Ticks, period: Ticks) -> bool {
        self.system_call(|| self.kernel.task_delay_until(previous_wake, period))
    }

    /// Forces a blocked task out of its wait. Returns true when the task
    /// was actually waiting.
    pub fn task_abort_delay(&self, handle: TaskHandle) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(task) => self.kernel.task_abort_delay(task),
            None => false,
        })
    }

    /// Sends a notification to a task.
    pub fn task_notify(
        &self,
        handle: TaskHandle,
        index: u8,
        value: u32,
        action: NotifyAction,
    ) -> bool {
        self.system_call(|| match self.pool.resolve(handle) {
            Some(task) => self.kernel.task_notify(task, index, value, action),
            None => false,
        })
    }

    /// Sends a notification from an interrupt handler.
    pub fn task_notify_from_isr(
        &self,
        handle: TaskHandle,
        index: u8,
        value: u32,
        action: NotifyAction,
        wake: &mut IsrWake,
    ) -> bool {
        self.from_interrupt(|| match self.pool.resolve(handle) {
            Some(task) => self
                .kernel
                .task_notify_from_isr(task, index, value, action, wake),
            None => false,
        })
    }

    /// Waits for a notification on the calling task. Returns the
    /// notification value, or `None` on timeout.
    pub fn task_notify_wait(
        &self,
        index: u8,
        clear_on_entry: u32,
        clear_on_exit: u32,
        ticks: Ticks,
    ) -> Option<u32> {
        self.system_call(|| {
            self.kernel
                .task_notify_wait(index, clear_on_entry, clear_on_exit, ticks)
        })
    }

    /// Clears a pending notification. The null handle targets the
    /// calling task. Returns true when one was pending.
    pub fn task_notify_state_clear(&self, handle: TaskHandle, index: u8) -> bool {
        self.system_call(|| match self.target_task(handle) {
            Some(target) => self.kernel.task_notify_state_clear(target, index),
            None => false,
        })
    }

    /// Clears bits in a notification value, returning the value before
    /// the clear. The null handle targets the calling task.
    pub fn task_notify_value_clear(
        &self,
        handle: TaskHandle,
        index: u8,
        bits: u32,
    ) -> Option<u32> {
        self.system_call(|| {
            let target = self.target_task(handle)?;
            Some(self.kernel.task_notify_value_clear(target, index, bits))
        })
    }

    /// Handle for the calling task, minting one if the task has never
    /// been visible through the pool (tasks created before the gate came
    /// up, or by privileged code going around it).
    pub fn current_task_handle(&self) -> Option<TaskHandle> {
        self.system_call(|| {
            let current = self.kernel.current_task()?;
            self.expose(current)
        })
    }

    /// Suspends the scheduler. Pairs with [`Self::resume_scheduler`].
    pub fn suspend_scheduler(&self) {
        self.system_call(|| self.kernel.suspend_all());
    }

    /// Resumes the scheduler.
    pub fn resume_scheduler(&self) {
        self.system_call(|| self.kernel.resume_all());
    }

    /// Null maps to the calling task; anything else must translate.
    /// Outer `None` means the handle did not translate.
    fn target_task(&self, handle: TaskHandle) -> Option<Option<TaskRef>> {
        if handle.is_null() {
            Some(None)
        } else {
            self.pool.resolve(handle).map(Some)
        }
    }
}
