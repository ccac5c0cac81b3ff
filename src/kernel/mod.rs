//! Kernel Service Traits
//!
//! The outbound interface of the boundary layer: one trait per service
//! family, implemented by the embedding kernel on its privileged side.
//! Methods deal in [`ObjectRef`](crate::pool::ObjectRef)s; no external
//! handle ever reaches these implementations.
//!
//! Return shapes follow the kernel's native idiom (success flags, counts,
//! optional references) so the gate can map translation failures onto them
//! without inventing a distinguishable error channel.

mod types;

pub use types::{
    EventBits, IsrWake, NotifyAction, QueuePosition, StreamBufferKind, TaskEntry, TaskFlags,
    TaskSpec, TimerCallback, TimerCommand, Ticks,
};

#[cfg(feature = "event-groups")]
use crate::pool::EventGroupRef;
use crate::pool::{QueueRef, TaskRef};
#[cfg(feature = "queue-sets")]
use crate::pool::QueueSetRef;
#[cfg(feature = "stream-buffers")]
use crate::pool::StreamBufferRef;
#[cfg(feature = "timers")]
use crate::pool::TimerRef;

/// Scheduler-level locking. The gate suspends the scheduler around pool
/// scans so no other task can observe a half-finished scan-then-claim.
pub trait Scheduler {
    /// Prevents task switches until the matching resume.
    fn suspend_all(&self);

    /// Re-enables task switches.
    fn resume_all(&self);
}

/// Task control and direct-to-task notifications.
pub trait TaskServices {
    /// Creates a task. `None` on resource exhaustion inside the kernel.
    fn task_create(&self, spec: &TaskSpec<'_>) -> Option<TaskRef>;

    /// Deletes a task; `None` deletes the calling task and may not return.
    fn task_delete(&self, task: Option<TaskRef>);

    /// Suspends a task; `None` suspends the calling task.
    fn task_suspend(&self, task: Option<TaskRef>);

    /// Resumes a suspended task.
    fn task_resume(&self, task: TaskRef);

    /// Resumes a suspended task from an interrupt handler. Returns whether
    /// the handler should end in a yield.
    fn task_resume_from_isr(&self, task: TaskRef) -> bool;

    /// Priority of a task; `None` queries the calling task.
    fn task_priority(&self, task: Option<TaskRef>) -> u8;

    /// Changes a task's priority; `None` targets the calling task.
    fn task_set_priority(&self, task: Option<TaskRef>, priority: u8);

    /// Blocks the calling task for a duration.
    fn task_delay(&self, ticks: Ticks);

    /// Blocks the calling task until `previous_wake + period`, updating
    /// `previous_wake`. Returns whether the task actually slept.
    fn task_delay_until(&self, previous_wake: &mut Ticks, period: Ticks) -> bool;

    /// Forces a blocked task ready. Returns whether it was blocked.
    fn task_abort_delay(&self, task: TaskRef) -> bool;

    /// Sends a notification to slot `index` of a task's notification
    /// array. Returns `false` only for [`NotifyAction::SetValueIfIdle`]
    /// with a pending notification.
    fn task_notify(&self, task: TaskRef, index: u8, value: u32, action: NotifyAction) -> bool;

    /// Interrupt-side [`TaskServices::task_notify`].
    fn task_notify_from_isr(
        &self,
        task: TaskRef,
        index: u8,
        value: u32,
        action: NotifyAction,
        wake: &mut IsrWake,
    ) -> bool;

    /// Blocks the calling task until notified on slot `index`, clearing
    /// the given bits on entry and exit. `Some(value)` when notified,
    /// `None` on timeout.
    fn task_notify_wait(
        &self,
        index: u8,
        clear_on_entry: u32,
        clear_on_exit: u32,
        ticks: Ticks,
    ) -> Option<u32>;

    /// Clears a pending notification. Returns whether one was pending.
    fn task_notify_state_clear(&self, task: Option<TaskRef>, index: u8) -> bool;

    /// Clears bits of a notification value, returning the prior value.
    fn task_notify_value_clear(&self, task: Option<TaskRef>, index: u8, bits: u32) -> u32;

    /// The running task. `None` before the scheduler starts.
    fn current_task(&self) -> Option<TaskRef>;
}

/// Queues, and the mutexes and semaphores built on them.
pub trait QueueServices {
    /// Creates a queue of `length` items of `item_size` bytes.
    fn queue_create(&self, length: usize, item_size: usize) -> Option<QueueRef>;

    /// Creates a mutex (a queue with priority-inheritance behavior).
    fn mutex_create(&self) -> Option<QueueRef>;

    /// Creates a counting semaphore.
    fn semaphore_create(&self, max_count: usize, initial_count: usize) -> Option<QueueRef>;

    /// Destroys a queue, mutex or semaphore.
    fn queue_delete(&self, queue: QueueRef);

    /// Copies an item in. `false` when the queue stayed full past `ticks`.
    fn queue_send(&self, queue: QueueRef, item: &[u8], ticks: Ticks, position: QueuePosition)
        -> bool;

    /// Copies the oldest item out. `false` on timeout.
    fn queue_receive(&self, queue: QueueRef, buffer: &mut [u8], ticks: Ticks) -> bool;

    /// Copies the oldest item out without removing it. `false` on timeout.
    fn queue_peek(&self, queue: QueueRef, buffer: &mut [u8], ticks: Ticks) -> bool;

    /// Empties a queue, readying tasks blocked on a full queue. `false`
    /// when the kernel refuses the reset.
    fn queue_reset(&self, queue: QueueRef) -> bool;

    /// Takes a semaphore or mutex. `false` on timeout.
    fn semaphore_take(&self, queue: QueueRef, ticks: Ticks) -> bool;

    /// Gives a semaphore or releases a mutex.
    fn semaphore_give(&self, queue: QueueRef) -> bool;

    /// Takes a mutex the calling task may already hold, blocking up to
    /// `ticks` on the first acquisition only. Each take adds one level.
    fn mutex_take_recursive(&self, mutex: QueueRef, ticks: Ticks) -> bool;

    /// Releases one level of a recursively taken mutex. `false` when the
    /// calling task is not the holder.
    fn mutex_give_recursive(&self, mutex: QueueRef) -> bool;

    /// The task holding a mutex, if any.
    fn mutex_holder(&self, mutex: QueueRef) -> Option<TaskRef>;

    /// Items currently queued.
    fn queue_messages_waiting(&self, queue: QueueRef) -> usize;

    /// Free item slots.
    fn queue_spaces_available(&self, queue: QueueRef) -> usize;

    /// Interrupt-side send; never blocks.
    fn queue_send_from_isr(
        &self,
        queue: QueueRef,
        item: &[u8],
        position: QueuePosition,
        wake: &mut IsrWake,
    ) -> bool;

    /// Interrupt-side receive; never blocks.
    fn queue_receive_from_isr(&self, queue: QueueRef, buffer: &mut [u8], wake: &mut IsrWake)
        -> bool;

    /// Interrupt-side peek.
    fn queue_peek_from_isr(&self, queue: QueueRef, buffer: &mut [u8]) -> bool;

    /// Interrupt-side semaphore give.
    fn semaphore_give_from_isr(&self, queue: QueueRef, wake: &mut IsrWake) -> bool;

    /// Interrupt-side mutex holder query.
    fn mutex_holder_from_isr(&self, mutex: QueueRef) -> Option<TaskRef>;

    /// Interrupt-side queue length query.
    fn queue_messages_waiting_from_isr(&self, queue: QueueRef) -> usize;

    /// Interrupt-side emptiness query.
    fn queue_is_empty_from_isr(&self, queue: QueueRef) -> bool;

    /// Interrupt-side fullness query.
    fn queue_is_full_from_isr(&self, queue: QueueRef) -> bool;
}

/// Queue sets: blocking on several queues and semaphores at once.
#[cfg(feature = "queue-sets")]
pub trait QueueSetServices {
    /// Creates a set able to register `event_capacity` pending events.
    fn queue_set_create(&self, event_capacity: usize) -> Option<QueueSetRef>;

    /// Destroys a set. Members must have been removed by the caller.
    fn queue_set_delete(&self, set: QueueSetRef);

    /// Adds a queue to a set. `false` if the member is non-empty or
    /// already belongs to a set.
    fn queue_set_add(&self, set: QueueSetRef, member: QueueRef) -> bool;

    /// Removes a queue from a set. `false` if it is not a member.
    fn queue_set_remove(&self, set: QueueSetRef, member: QueueRef) -> bool;

    /// Blocks until a member is ready, returning that member.
    fn queue_set_select(&self, set: QueueSetRef, ticks: Ticks) -> Option<QueueRef>;

    /// Interrupt-side select; never blocks.
    fn queue_set_select_from_isr(&self, set: QueueSetRef) -> Option<QueueRef>;
}

/// Event groups: many-bit rendezvous and broadcast flags.
#[cfg(feature = "event-groups")]
pub trait EventGroupServices {
    /// Creates an event group with all bits clear.
    fn event_group_create(&self) -> Option<EventGroupRef>;

    /// Destroys an event group, waking any waiters.
    fn event_group_delete(&self, group: EventGroupRef);

    /// Blocks until the waited bits are set. Returns the bits at wake or
    /// timeout.
    fn event_wait(
        &self,
        group: EventGroupRef,
        bits: EventBits,
        clear_on_exit: bool,
        wait_all: bool,
        ticks: Ticks,
    ) -> EventBits;

    /// Sets bits, waking satisfied waiters. Returns the bits afterward.
    fn event_set(&self, group: EventGroupRef, bits: EventBits) -> EventBits;

    /// Clears bits. Returns the bits before clearing.
    fn event_clear(&self, group: EventGroupRef, bits: EventBits) -> EventBits;

    /// Sets bits then waits for the rendezvous bits; the atomic
    /// set-then-wait used for multi-task synchronization points.
    fn event_sync(
        &self,
        group: EventGroupRef,
        set: EventBits,
        wait: EventBits,
        ticks: Ticks,
    ) -> EventBits;

    /// Interrupt-side set, deferred to the daemon. `false` if the defer
    /// queue is full.
    fn event_set_from_isr(&self, group: EventGroupRef, bits: EventBits, wake: &mut IsrWake)
        -> bool;

    /// Interrupt-side clear, deferred to the daemon.
    fn event_clear_from_isr(&self, group: EventGroupRef, bits: EventBits) -> bool;

    /// Interrupt-side read of the current bits.
    fn event_get_from_isr(&self, group: EventGroupRef) -> EventBits;
}

/// Software timers serviced by the kernel's timer daemon task.
#[cfg(feature = "timers")]
pub trait TimerServices {
    /// Creates a dormant timer.
    fn timer_create(
        &self,
        period: Ticks,
        auto_reload: bool,
        id: usize,
        callback: TimerCallback,
    ) -> Option<TimerRef>;

    /// Queues a delete command to the daemon, waiting up to `ticks` for
    /// command queue space. `true` once the command is accepted; the
    /// daemon destroys the timer asynchronously.
    fn timer_delete(&self, timer: TimerRef, ticks: Ticks) -> bool;

    /// Queues a control command to the daemon.
    fn timer_command(&self, timer: TimerRef, command: TimerCommand, ticks: Ticks) -> bool;

    /// Interrupt-side control command; never blocks.
    fn timer_command_from_isr(
        &self,
        timer: TimerRef,
        command: TimerCommand,
        wake: &mut IsrWake,
    ) -> bool;

    /// The timer's period.
    fn timer_period(&self, timer: TimerRef) -> Ticks;

    /// Absolute tick at which the timer next expires.
    fn timer_expiry_time(&self, timer: TimerRef) -> Ticks;

    /// Whether the timer is running.
    fn timer_is_active(&self, timer: TimerRef) -> bool;

    /// Whether the timer re-arms itself on expiry.
    fn timer_reload_mode(&self, timer: TimerRef) -> bool;

    /// Switches the timer between one-shot and auto-reload.
    fn timer_set_reload_mode(&self, timer: TimerRef, auto_reload: bool);

    /// The timer's user ID word.
    fn timer_id(&self, timer: TimerRef) -> usize;

    /// Sets the timer's user ID word.
    fn timer_set_id(&self, timer: TimerRef, id: usize);

    /// The daemon task servicing timer commands. `None` before the
    /// scheduler starts.
    fn daemon_task(&self) -> Option<TaskRef>;
}

/// Stream and message buffers: single-reader single-writer byte pipes.
#[cfg(feature = "stream-buffers")]
pub trait StreamBufferServices {
    /// Creates a buffer of `capacity` bytes that wakes readers once
    /// `trigger_level` bytes are available.
    fn stream_create(
        &self,
        capacity: usize,
        trigger_level: usize,
        kind: StreamBufferKind,
    ) -> Option<StreamBufferRef>;

    /// Destroys a buffer.
    fn stream_delete(&self, stream: StreamBufferRef);

    /// Writes bytes, blocking up to `ticks` for space. Returns the count
    /// written.
    fn stream_send(&self, stream: StreamBufferRef, data: &[u8], ticks: Ticks) -> usize;

    /// Reads bytes, blocking up to `ticks` for the trigger level. Returns
    /// the count read.
    fn stream_receive(&self, stream: StreamBufferRef, buffer: &mut [u8], ticks: Ticks) -> usize;

    /// Interrupt-side write; never blocks.
    fn stream_send_from_isr(&self, stream: StreamBufferRef, data: &[u8], wake: &mut IsrWake)
        -> usize;

    /// Interrupt-side read; never blocks.
    fn stream_receive_from_isr(
        &self,
        stream: StreamBufferRef,
        buffer: &mut [u8],
        wake: &mut IsrWake,
    ) -> usize;

    /// Bytes ready to read.
    fn stream_bytes_available(&self, stream: StreamBufferRef) -> usize;

    /// Bytes of free space.
    fn stream_spaces_available(&self, stream: StreamBufferRef) -> usize;

    /// Empties the buffer. `false` if a task is blocked on it.
    fn stream_reset(&self, stream: StreamBufferRef) -> bool;

    /// Changes the trigger level. `false` if it exceeds the capacity.
    fn stream_set_trigger_level(&self, stream: StreamBufferRef, trigger_level: usize) -> bool;

    /// Whether no byte is buffered.
    fn stream_is_empty(&self, stream: StreamBufferRef) -> bool;

    /// Whether no space remains.
    fn stream_is_full(&self, stream: StreamBufferRef) -> bool;

    /// Length of the next framed message, zero when empty. Message
    /// buffers only.
    fn stream_next_message_length(&self, stream: StreamBufferRef) -> usize;
}
