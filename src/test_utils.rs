//! Shared Test Doubles
//!
//! A recording mock kernel and a controllable mock port. Both append to a
//! single per-thread trace so tests can assert the exact interleaving of
//! privilege transitions, fences, locks and kernel invocations.

use std::cell::{Cell, RefCell};

use crate::kernel::TaskSpec;
#[cfg(feature = "event-groups")]
use crate::kernel::{EventBits, EventGroupServices};
#[cfg(feature = "queue-sets")]
use crate::kernel::QueueSetServices;
#[cfg(feature = "stream-buffers")]
use crate::kernel::{StreamBufferKind, StreamBufferServices};
#[cfg(feature = "timers")]
use crate::kernel::{TimerCallback, TimerCommand, TimerServices};
use crate::kernel::{
    IsrWake, NotifyAction, QueuePosition, QueueServices, Scheduler, TaskServices, Ticks,
};
#[cfg(feature = "event-groups")]
use crate::pool::EventGroupRef;
#[cfg(feature = "queue-sets")]
use crate::pool::QueueSetRef;
#[cfg(feature = "stream-buffers")]
use crate::pool::StreamBufferRef;
#[cfg(feature = "timers")]
use crate::pool::TimerRef;
use crate::pool::{Kind, ObjectRef, QueueRef, TaskRef};
use crate::port::{Port, PrivilegeLevel};

/// One observable step of a boundary crossing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum TraceEvent {
    Raise,
    Lower,
    Fence,
    EnterCritical,
    ExitCritical,
    SuspendAll,
    ResumeAll,
    Kernel(&'static str),
}

thread_local! {
    static TRACE: RefCell<Vec<TraceEvent>> = const { RefCell::new(Vec::new()) };
    static PRIVILEGED: Cell<bool> = const { Cell::new(false) };
}

pub(crate) fn trace(event: TraceEvent) {
    TRACE.with(|t| t.borrow_mut().push(event));
}

pub(crate) fn take_trace() -> Vec<TraceEvent> {
    TRACE.with(|t| t.take())
}

pub(crate) fn set_privileged(privileged: bool) {
    PRIVILEGED.with(|p| p.set(privileged));
}

/// Clears the trace and drops back to unprivileged, the state a fresh
/// application task starts in.
pub(crate) fn reset_test_state() {
    take_trace();
    set_privileged(false);
}

/// Port whose privilege state lives in a thread local, so tests can start
/// crossings from either side of the boundary.
pub(crate) struct MockPort;

impl Port for MockPort {
    fn privilege() -> PrivilegeLevel {
        if PRIVILEGED.with(Cell::get) {
            PrivilegeLevel::Privileged
        } else {
            PrivilegeLevel::Unprivileged
        }
    }

    unsafe fn raise_privilege() {
        set_privileged(true);
        trace(TraceEvent::Raise);
    }

    unsafe fn lower_privilege() {
        set_privileged(false);
        trace(TraceEvent::Lower);
    }

    fn memory_fence() {
        trace(TraceEvent::Fence);
    }

    fn enter_critical() {
        trace(TraceEvent::EnterCritical);
    }

    fn exit_critical() {
        trace(TraceEvent::ExitCritical);
    }
}

/// Kernel double that records every invocation and mints predictable
/// object addresses (0x1000, 0x1010, ...).
pub(crate) struct MockKernel {
    next_addr: Cell<usize>,
    failing_creates: Cell<u32>,
    pub(crate) current: Cell<Option<TaskRef>>,
    pub(crate) holder: Cell<Option<TaskRef>>,
    #[cfg(feature = "queue-sets")]
    pub(crate) select_result: Cell<Option<QueueRef>>,
    #[cfg(feature = "timers")]
    pub(crate) daemon: Cell<Option<TaskRef>>,
    #[cfg(feature = "timers")]
    pub(crate) refuse_timer_delete: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl MockKernel {
    pub(crate) fn new() -> Self {
        Self {
            next_addr: Cell::new(0x1000),
            failing_creates: Cell::new(0),
            current: Cell::new(None),
            holder: Cell::new(None),
            #[cfg(feature = "queue-sets")]
            select_result: Cell::new(None),
            #[cfg(feature = "timers")]
            daemon: Cell::new(None),
            #[cfg(feature = "timers")]
            refuse_timer_delete: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Makes the next object construction fail.
    pub(crate) fn fail_next_create(&self) {
        self.failing_creates.set(1);
    }

    /// Mints the next object reference, honoring queued failures.
    pub(crate) fn construct<K: Kind>(&self) -> Option<ObjectRef<K>> {
        if self.failing_creates.get() > 0 {
            self.failing_creates.set(self.failing_creates.get() - 1);
            return None;
        }
        let addr = self.next_addr.get();
        self.next_addr.set(addr + 0x10);
        ObjectRef::from_addr(addr)
    }

    /// Mints a reference that no create call has handed out, standing in
    /// for objects the kernel built internally.
    #[cfg(feature = "queue-sets")]
    pub(crate) fn internal_ref<K: Kind>(&self) -> ObjectRef<K> {
        ObjectRef::from_addr(0xDEAD_0000).unwrap()
    }

    fn record(&self, name: &'static str, detail: String) {
        trace(TraceEvent::Kernel(name));
        self.calls.borrow_mut().push(detail);
    }

    /// Number of recorded invocations whose name matches.
    pub(crate) fn call_count(&self, name: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.split(' ').next() == Some(name))
            .count()
    }

    /// The most recent recorded invocation.
    pub(crate) fn last_call(&self) -> Option<String> {
        self.calls.borrow().last().cloned()
    }
}

impl Scheduler for MockKernel {
    fn suspend_all(&self) {
        trace(TraceEvent::SuspendAll);
    }

    fn resume_all(&self) {
        trace(TraceEvent::ResumeAll);
    }
}

impl TaskServices for MockKernel {
    fn task_create(&self, spec: &TaskSpec<'_>) -> Option<TaskRef> {
        self.record(
            "task_create",
            format!(
                "task_create name={} prio={} flags={:#x}",
                spec.name,
                spec.priority,
                spec.flags.bits()
            ),
        );
        self.construct()
    }

    fn task_delete(&self, task: Option<TaskRef>) {
        self.record("task_delete", format!("task_delete {:?}", task.map(|t| t.addr())));
    }

    fn task_suspend(&self, task: Option<TaskRef>) {
        self.record("task_suspend", format!("task_suspend {:?}", task.map(|t| t.addr())));
    }

    fn task_resume(&self, task: TaskRef) {
        self.record("task_resume", format!("task_resume {:#x}", task.addr()));
    }

    fn task_resume_from_isr(&self, task: TaskRef) -> bool {
        self.record(
            "task_resume_from_isr",
            format!("task_resume_from_isr {:#x}", task.addr()),
        );
        true
    }

    fn task_priority(&self, task: Option<TaskRef>) -> u8 {
        self.record("task_priority", format!("task_priority {:?}", task.map(|t| t.addr())));
        7
    }

    fn task_set_priority(&self, task: Option<TaskRef>, priority: u8) {
        self.record(
            "task_set_priority",
            format!("task_set_priority {:?} prio={}", task.map(|t| t.addr()), priority),
        );
    }

    fn task_delay(&self, ticks: Ticks) {
        self.record("task_delay", format!("task_delay {}", ticks.as_u32()));
    }

    fn task_delay_until(&self, previous_wake: &mut Ticks, period: Ticks) -> bool {
        self.record(
            "task_delay_until",
            format!(
                "task_delay_until from={} period={}",
                previous_wake.as_u32(),
                period.as_u32()
            ),
        );
        *previous_wake = Ticks::new(previous_wake.as_u32() + period.as_u32());
        true
    }

    fn task_abort_delay(&self, task: TaskRef) -> bool {
        self.record("task_abort_delay", format!("task_abort_delay {:#x}", task.addr()));
        true
    }

    fn task_notify(&self, task: TaskRef, index: u8, value: u32, action: NotifyAction) -> bool {
        self.record(
            "task_notify",
            format!(
                "task_notify {:#x} index={} value={:#x} action={:?}",
                task.addr(),
                index,
                value,
                action
            ),
        );
        true
    }

    fn task_notify_from_isr(
        &self,
        task: TaskRef,
        index: u8,
        value: u32,
        action: NotifyAction,
        wake: &mut IsrWake,
    ) -> bool {
        self.record(
            "task_notify_from_isr",
            format!(
                "task_notify_from_isr {:#x} index={} value={:#x} action={:?}",
                task.addr(),
                index,
                value,
                action
            ),
        );
        wake.set();
        true
    }

    fn task_notify_wait(
        &self,
        index: u8,
        clear_on_entry: u32,
        clear_on_exit: u32,
        ticks: Ticks,
    ) -> Option<u32> {
        self.record(
            "task_notify_wait",
            format!(
                "task_notify_wait index={} entry={:#x} exit={:#x} ticks={}",
                index,
                clear_on_entry,
                clear_on_exit,
                ticks.as_u32()
            ),
        );
        Some(0xA5)
    }

    fn task_notify_state_clear(&self, task: Option<TaskRef>, index: u8) -> bool {
        self.record(
            "task_notify_state_clear",
            format!(
                "task_notify_state_clear {:?} index={}",
                task.map(|t| t.addr()),
                index
            ),
        );
        true
    }

    fn task_notify_value_clear(&self, task: Option<TaskRef>, index: u8, bits: u32) -> u32 {
        self.record(
            "task_notify_value_clear",
            format!(
                "task_notify_value_clear {:?} index={} bits={:#x}",
                task.map(|t| t.addr()),
                index,
                bits
            ),
        );
        0xFFFF
    }

    fn current_task(&self) -> Option<TaskRef> {
        self.current.get()
    }
}

impl QueueServices for MockKernel {
    fn queue_create(&self, length: usize, item_size: usize) -> Option<QueueRef> {
        self.record(
            "queue_create",
            format!("queue_create len={} item={}", length, item_size),
        );
        self.construct()
    }

    fn mutex_create(&self) -> Option<QueueRef> {
        self.record("mutex_create", "mutex_create".to_string());
        self.construct()
    }

    fn semaphore_create(&self, max_count: usize, initial_count: usize) -> Option<QueueRef> {
        self.record(
            "semaphore_create",
            format!("semaphore_create max={} initial={}", max_count, initial_count),
        );
        self.construct()
    }

    fn queue_delete(&self, queue: QueueRef) {
        self.record("queue_delete", format!("queue_delete {:#x}", queue.addr()));
    }

    fn queue_send(
        &self,
        queue: QueueRef,
        item: &[u8],
        ticks: Ticks,
        position: QueuePosition,
    ) -> bool {
        self.record(
            "queue_send",
            format!(
                "queue_send {:#x} len={} ticks={} pos={:?}",
                queue.addr(),
                item.len(),
                ticks.as_u32(),
                position
            ),
        );
        true
    }

    fn queue_receive(&self, queue: QueueRef, buffer: &mut [u8], ticks: Ticks) -> bool {
        self.record(
            "queue_receive",
            format!(
                "queue_receive {:#x} len={} ticks={}",
                queue.addr(),
                buffer.len(),
                ticks.as_u32()
            ),
        );
        buffer.fill(0xAB);
        true
    }

    fn queue_peek(&self, queue: QueueRef, buffer: &mut [u8], ticks: Ticks) -> bool {
        self.record(
            "queue_peek",
            format!(
                "queue_peek {:#x} len={} ticks={}",
                queue.addr(),
                buffer.len(),
                ticks.as_u32()
            ),
        );
        true
    }

    fn queue_reset(&self, queue: QueueRef) -> bool {
        self.record("queue_reset", format!("queue_reset {:#x}", queue.addr()));
        true
    }

    fn semaphore_take(&self, queue: QueueRef, ticks: Ticks) -> bool {
        self.record(
            "semaphore_take",
            format!("semaphore_take {:#x} ticks={}", queue.addr(), ticks.as_u32()),
        );
        true
    }

    fn semaphore_give(&self, queue: QueueRef) -> bool {
        self.record("semaphore_give", format!("semaphore_give {:#x}", queue.addr()));
        true
    }

    fn mutex_take_recursive(&self, mutex: QueueRef, ticks: Ticks) -> bool {
        self.record(
            "mutex_take_recursive",
            format!(
                "mutex_take_recursive {:#x} ticks={}",
                mutex.addr(),
                ticks.as_u32()
            ),
        );
        true
    }

    fn mutex_give_recursive(&self, mutex: QueueRef) -> bool {
        self.record(
            "mutex_give_recursive",
            format!("mutex_give_recursive {:#x}", mutex.addr()),
        );
        true
    }

    fn mutex_holder(&self, mutex: QueueRef) -> Option<TaskRef> {
        self.record("mutex_holder", format!("mutex_holder {:#x}", mutex.addr()));
        self.holder.get()
    }

    fn queue_messages_waiting(&self, queue: QueueRef) -> usize {
        self.record(
            "queue_messages_waiting",
            format!("queue_messages_waiting {:#x}", queue.addr()),
        );
        3
    }

    fn queue_spaces_available(&self, queue: QueueRef) -> usize {
        self.record(
            "queue_spaces_available",
            format!("queue_spaces_available {:#x}", queue.addr()),
        );
        5
    }

    fn queue_send_from_isr(
        &self,
        queue: QueueRef,
        item: &[u8],
        position: QueuePosition,
        wake: &mut IsrWake,
    ) -> bool {
        self.record(
            "queue_send_from_isr",
            format!(
                "queue_send_from_isr {:#x} len={} pos={:?}",
                queue.addr(),
                item.len(),
                position
            ),
        );
        wake.set();
        true
    }

    fn queue_receive_from_isr(
        &self,
        queue: QueueRef,
        buffer: &mut [u8],
        _wake: &mut IsrWake,
    ) -> bool {
        self.record(
            "queue_receive_from_isr",
            format!("queue_receive_from_isr {:#x} len={}", queue.addr(), buffer.len()),
        );
        true
    }

    fn queue_peek_from_isr(&self, queue: QueueRef, buffer: &mut [u8]) -> bool {
        self.record(
            "queue_peek_from_isr",
            format!("queue_peek_from_isr {:#x} len={}", queue.addr(), buffer.len()),
        );
        true
    }

    fn semaphore_give_from_isr(&self, queue: QueueRef, wake: &mut IsrWake) -> bool {
        self.record(
            "semaphore_give_from_isr",
            format!("semaphore_give_from_isr {:#x}", queue.addr()),
        );
        wake.set();
        true
    }

    fn mutex_holder_from_isr(&self, mutex: QueueRef) -> Option<TaskRef> {
        self.record(
            "mutex_holder_from_isr",
            format!("mutex_holder_from_isr {:#x}", mutex.addr()),
        );
        self.holder.get()
    }

    fn queue_messages_waiting_from_isr(&self, queue: QueueRef) -> usize {
        self.record(
            "queue_messages_waiting_from_isr",
            format!("queue_messages_waiting_from_isr {:#x}", queue.addr()),
        );
        2
    }

    fn queue_is_empty_from_isr(&self, queue: QueueRef) -> bool {
        self.record(
            "queue_is_empty_from_isr",
            format!("queue_is_empty_from_isr {:#x}", queue.addr()),
        );
        true
    }

    fn queue_is_full_from_isr(&self, queue: QueueRef) -> bool {
        self.record(
            "queue_is_full_from_isr",
            format!("queue_is_full_from_isr {:#x}", queue.addr()),
        );
        false
    }
}

#[cfg(feature = "queue-sets")]
impl QueueSetServices for MockKernel {
    fn queue_set_create(&self, event_capacity: usize) -> Option<QueueSetRef> {
        self.record(
            "queue_set_create",
            format!("queue_set_create cap={}", event_capacity),
        );
        self.construct()
    }

    fn queue_set_delete(&self, set: QueueSetRef) {
        self.record("queue_set_delete", format!("queue_set_delete {:#x}", set.addr()));
    }

    fn queue_set_add(&self, set: QueueSetRef, member: QueueRef) -> bool {
        self.record(
            "queue_set_add",
            format!("queue_set_add {:#x} member={:#x}", set.addr(), member.addr()),
        );
        true
    }

    fn queue_set_remove(&self, set: QueueSetRef, member: QueueRef) -> bool {
        self.record(
            "queue_set_remove",
            format!("queue_set_remove {:#x} member={:#x}", set.addr(), member.addr()),
        );
        true
    }

    fn queue_set_select(&self, set: QueueSetRef, ticks: Ticks) -> Option<QueueRef> {
        self.record(
            "queue_set_select",
            format!("queue_set_select {:#x} ticks={}", set.addr(), ticks.as_u32()),
        );
        self.select_result.get()
    }

    fn queue_set_select_from_isr(&self, set: QueueSetRef) -> Option<QueueRef> {
        self.record(
            "queue_set_select_from_isr",
            format!("queue_set_select_from_isr {:#x}", set.addr()),
        );
        self.select_result.get()
    }
}

#[cfg(feature = "event-groups")]
impl EventGroupServices for MockKernel {
    fn event_group_create(&self) -> Option<EventGroupRef> {
        self.record("event_group_create", "event_group_create".to_string());
        self.construct()
    }

    fn event_group_delete(&self, group: EventGroupRef) {
        self.record(
            "event_group_delete",
            format!("event_group_delete {:#x}", group.addr()),
        );
    }

    fn event_wait(
        &self,
        group: EventGroupRef,
        bits: EventBits,
        clear_on_exit: bool,
        wait_all: bool,
        ticks: Ticks,
    ) -> EventBits {
        self.record(
            "event_wait",
            format!(
                "event_wait {:#x} bits={:#x} clear={} all={} ticks={}",
                group.addr(),
                bits.bits(),
                clear_on_exit,
                wait_all,
                ticks.as_u32()
            ),
        );
        bits
    }

    fn event_set(&self, group: EventGroupRef, bits: EventBits) -> EventBits {
        self.record(
            "event_set",
            format!("event_set {:#x} bits={:#x}", group.addr(), bits.bits()),
        );
        bits
    }

    fn event_clear(&self, group: EventGroupRef, bits: EventBits) -> EventBits {
        self.record(
            "event_clear",
            format!("event_clear {:#x} bits={:#x}", group.addr(), bits.bits()),
        );
        EventBits::new(0xFF)
    }

    fn event_sync(
        &self,
        group: EventGroupRef,
        set: EventBits,
        wait: EventBits,
        ticks: Ticks,
    ) -> EventBits {
        self.record(
            "event_sync",
            format!(
                "event_sync {:#x} set={:#x} wait={:#x} ticks={}",
                group.addr(),
                set.bits(),
                wait.bits(),
                ticks.as_u32()
            ),
        );
        wait
    }

    fn event_set_from_isr(
        &self,
        group: EventGroupRef,
        bits: EventBits,
        wake: &mut IsrWake,
    ) -> bool {
        self.record(
            "event_set_from_isr",
            format!("event_set_from_isr {:#x} bits={:#x}", group.addr(), bits.bits()),
        );
        wake.set();
        true
    }

    fn event_clear_from_isr(&self, group: EventGroupRef, bits: EventBits) -> bool {
        self.record(
            "event_clear_from_isr",
            format!("event_clear_from_isr {:#x} bits={:#x}", group.addr(), bits.bits()),
        );
        true
    }

    fn event_get_from_isr(&self, group: EventGroupRef) -> EventBits {
        self.record(
            "event_get_from_isr",
            format!("event_get_from_isr {:#x}", group.addr()),
        );
        EventBits::new(0x55)
    }
}

#[cfg(feature = "timers")]
impl TimerServices for MockKernel {
    fn timer_create(
        &self,
        period: Ticks,
        auto_reload: bool,
        id: usize,
        _callback: TimerCallback,
    ) -> Option<TimerRef> {
        self.record(
            "timer_create",
            format!(
                "timer_create period={} reload={} id={}",
                period.as_u32(),
                auto_reload,
                id
            ),
        );
        self.construct()
    }

    fn timer_delete(&self, timer: TimerRef, ticks: Ticks) -> bool {
        self.record(
            "timer_delete",
            format!("timer_delete {:#x} ticks={}", timer.addr(), ticks.as_u32()),
        );
        !self.refuse_timer_delete.get()
    }

    fn timer_command(&self, timer: TimerRef, command: TimerCommand, ticks: Ticks) -> bool {
        self.record(
            "timer_command",
            format!(
                "timer_command {:#x} cmd={:?} ticks={}",
                timer.addr(),
                command,
                ticks.as_u32()
            ),
        );
        true
    }

    fn timer_command_from_isr(
        &self,
        timer: TimerRef,
        command: TimerCommand,
        wake: &mut IsrWake,
    ) -> bool {
        self.record(
            "timer_command_from_isr",
            format!("timer_command_from_isr {:#x} cmd={:?}", timer.addr(), command),
        );
        wake.set();
        true
    }

    fn timer_period(&self, timer: TimerRef) -> Ticks {
        self.record("timer_period", format!("timer_period {:#x}", timer.addr()));
        Ticks::new(100)
    }

    fn timer_expiry_time(&self, timer: TimerRef) -> Ticks {
        self.record("timer_expiry_time", format!("timer_expiry_time {:#x}", timer.addr()));
        Ticks::new(250)
    }

    fn timer_is_active(&self, timer: TimerRef) -> bool {
        self.record("timer_is_active", format!("timer_is_active {:#x}", timer.addr()));
        true
    }

    fn timer_reload_mode(&self, timer: TimerRef) -> bool {
        self.record("timer_reload_mode", format!("timer_reload_mode {:#x}", timer.addr()));
        true
    }

    fn timer_set_reload_mode(&self, timer: TimerRef, auto_reload: bool) {
        self.record(
            "timer_set_reload_mode",
            format!("timer_set_reload_mode {:#x} reload={}", timer.addr(), auto_reload),
        );
    }

    fn timer_id(&self, timer: TimerRef) -> usize {
        self.record("timer_id", format!("timer_id {:#x}", timer.addr()));
        42
    }

    fn timer_set_id(&self, timer: TimerRef, id: usize) {
        self.record(
            "timer_set_id",
            format!("timer_set_id {:#x} id={}", timer.addr(), id),
        );
    }

    fn daemon_task(&self) -> Option<TaskRef> {
        self.record("daemon_task", "daemon_task".to_string());
        self.daemon.get()
    }
}

#[cfg(feature = "stream-buffers")]
impl StreamBufferServices for MockKernel {
    fn stream_create(
        &self,
        capacity: usize,
        trigger_level: usize,
        kind: StreamBufferKind,
    ) -> Option<StreamBufferRef> {
        self.record(
            "stream_create",
            format!(
                "stream_create cap={} trigger={} kind={:?}",
                capacity, trigger_level, kind
            ),
        );
        self.construct()
    }

    fn stream_delete(&self, stream: StreamBufferRef) {
        self.record("stream_delete", format!("stream_delete {:#x}", stream.addr()));
    }

    fn stream_send(&self, stream: StreamBufferRef, data: &[u8], ticks: Ticks) -> usize {
        self.record(
            "stream_send",
            format!(
                "stream_send {:#x} len={} ticks={}",
                stream.addr(),
                data.len(),
                ticks.as_u32()
            ),
        );
        data.len()
    }

    fn stream_receive(&self, stream: StreamBufferRef, buffer: &mut [u8], ticks: Ticks) -> usize {
        self.record(
            "stream_receive",
            format!(
                "stream_receive {:#x} len={} ticks={}",
                stream.addr(),
                buffer.len(),
                ticks.as_u32()
            ),
        );
        buffer.len().min(4)
    }

    fn stream_send_from_isr(
        &self,
        stream: StreamBufferRef,
        data: &[u8],
        wake: &mut IsrWake,
    ) -> usize {
        self.record(
            "stream_send_from_isr",
            format!("stream_send_from_isr {:#x} len={}", stream.addr(), data.len()),
        );
        wake.set();
        data.len()
    }

    fn stream_receive_from_isr(
        &self,
        stream: StreamBufferRef,
        buffer: &mut [u8],
        _wake: &mut IsrWake,
    ) -> usize {
        self.record(
            "stream_receive_from_isr",
            format!("stream_receive_from_isr {:#x} len={}", stream.addr(), buffer.len()),
        );
        buffer.len().min(4)
    }

    fn stream_bytes_available(&self, stream: StreamBufferRef) -> usize {
        self.record(
            "stream_bytes_available",
            format!("stream_bytes_available {:#x}", stream.addr()),
        );
        6
    }

    fn stream_spaces_available(&self, stream: StreamBufferRef) -> usize {
        self.record(
            "stream_spaces_available",
            format!("stream_spaces_available {:#x}", stream.addr()),
        );
        10
    }

    fn stream_reset(&self, stream: StreamBufferRef) -> bool {
        self.record("stream_reset", format!("stream_reset {:#x}", stream.addr()));
        true
    }

    fn stream_set_trigger_level(&self, stream: StreamBufferRef, trigger_level: usize) -> bool {
        self.record(
            "stream_set_trigger_level",
            format!(
                "stream_set_trigger_level {:#x} trigger={}",
                stream.addr(),
                trigger_level
            ),
        );
        true
    }

    fn stream_is_empty(&self, stream: StreamBufferRef) -> bool {
        self.record("stream_is_empty", format!("stream_is_empty {:#x}", stream.addr()));
        false
    }

    fn stream_is_full(&self, stream: StreamBufferRef) -> bool {
        self.record("stream_is_full", format!("stream_is_full {:#x}", stream.addr()));
        false
    }

    fn stream_next_message_length(&self, stream: StreamBufferRef) -> usize {
        self.record(
            "stream_next_message_length",
            format!("stream_next_message_length {:#x}", stream.addr()),
        );
        4
    }
}
