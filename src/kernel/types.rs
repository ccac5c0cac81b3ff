//! Plain-Data Types Crossing the Service Traits
//!
//! Everything here is `Copy`, pointer-free and safe to build in
//! unprivileged memory before a call crosses the boundary.

use bitflags::bitflags;

use crate::pool::TimerRef;

/// Tick-count duration for blocking calls.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct Ticks(u32);

impl Ticks {
    /// Do not block.
    pub const ZERO: Self = Self(0);

    /// Block until the operation completes.
    pub const FOREVER: Self = Self(u32::MAX);

    /// Duration of `count` ticks.
    #[inline]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    /// The raw tick count.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

bitflags! {
    /// Behavior flags for task creation.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct TaskFlags: u32 {
        /// Create the task in privileged mode. The gate clears this flag
        /// when the requesting context is unprivileged; only privileged
        /// callers can mint privileged tasks.
        const PRIVILEGED = 1 << 0;

        /// The task uses the floating point unit and needs its context
        /// saved. Passed through to the kernel untouched.
        const USES_FPU = 1 << 1;
    }
}

/// Entry function of a task.
pub type TaskEntry = fn(usize);

/// Creation parameters for a task.
#[derive(Clone, Copy, Debug)]
pub struct TaskSpec<'a> {
    /// Human-readable name, copied by the kernel.
    pub name: &'a str,

    /// Entry function.
    pub entry: TaskEntry,

    /// Argument word handed to the entry function.
    pub arg: usize,

    /// Stack depth in words.
    pub stack_words: usize,

    /// Scheduling priority. A plain number; privilege is carried in
    /// [`TaskFlags`], never encoded in the priority value.
    pub priority: u8,

    /// Behavior flags.
    pub flags: TaskFlags,
}

/// How a direct-to-task notification updates the target's value.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NotifyAction {
    /// Mark the notification pending without touching the value.
    NoAction,

    /// OR the sent bits into the value.
    SetBits,

    /// Increment the value.
    Increment,

    /// Overwrite the value unconditionally.
    SetValue,

    /// Write the value only if no notification is already pending.
    SetValueIfIdle,
}

/// Where a queue send places the item.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QueuePosition {
    /// Append at the back (normal send).
    Back,

    /// Prepend at the front (urgent send).
    Front,

    /// Replace the single item of a length-one queue.
    Overwrite,
}

/// Bit set carried by an event group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct EventBits(u32);

impl EventBits {
    /// The empty bit set.
    pub const NONE: Self = Self(0);

    /// Bit set from raw bits.
    #[inline]
    pub const fn new(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether no bit is set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Commands accepted by a software timer.
///
/// Deletion is not a command: it retires the timer's handle and goes
/// through the dedicated delete path.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerCommand {
    /// Start, or restart from now.
    Start,

    /// Stop without destroying.
    Stop,

    /// Re-arm from now with the current period.
    Reset,

    /// Change the period and restart.
    ChangePeriod(Ticks),
}

/// Callback run by the timer daemon when a timer expires. Executes in
/// privileged context, so it receives the internal reference directly.
pub type TimerCallback = fn(TimerRef);

/// Flavor of a stream buffer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StreamBufferKind {
    /// Byte stream: reads take whatever is available.
    Stream,

    /// Message buffer: writes and reads are framed.
    Message,
}

/// Records whether an interrupt-side operation readied a task of higher
/// priority than the one it interrupted, so the handler can request a
/// context switch on exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct IsrWake {
    woken: bool,
}

impl IsrWake {
    /// No context switch requested yet.
    #[inline]
    pub const fn new() -> Self {
        Self { woken: false }
    }

    /// Marks that a context switch should follow the handler.
    #[inline]
    pub fn set(&mut self) {
        self.woken = true;
    }

    /// Whether the handler should end in a yield.
    #[inline]
    pub const fn should_yield(self) -> bool {
        self.woken
    }
}
