//! Hardware Privilege Boundary
//!
//! The platform primitives the gate is built on. Each target supplies one
//! zero-sized implementor; everything here is an associated function so
//! crossing code monomorphizes to direct calls with nothing to indirect
//! through at run time.
//!
//! # Port Contract
//! - `raise_privilege` is only reachable from contexts the hardware allows
//!   to escalate (the kernel's system call entry path)
//! - every raise is paired with exactly one lower; the gate enforces this
//!   structurally
//! - `memory_fence` orders both instruction fetch and data access across a
//!   privilege transition
//! - critical sections nest; each enter pairs with one exit

/// Execution privilege of the current context.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PrivilegeLevel {
    /// MPU restrictions apply; kernel memory is unreachable.
    Unprivileged,

    /// Full access; the MPU permits kernel memory and peripherals.
    Privileged,
}

/// Platform primitives for crossing the privilege boundary.
pub trait Port {
    /// Privilege level of the executing context.
    fn privilege() -> PrivilegeLevel;

    /// Whether the executing context is privileged.
    #[inline]
    fn is_privileged() -> bool {
        Self::privilege() == PrivilegeLevel::Privileged
    }

    /// Escalates the current context to privileged execution.
    ///
    /// # Safety
    /// Must only be invoked from the system call entry path, where the
    /// hardware permits escalation, and every invocation must be paired
    /// with [`Port::lower_privilege`] before control returns to the
    /// caller.
    unsafe fn raise_privilege();

    /// Returns the current context to unprivileged execution.
    ///
    /// # Safety
    /// Must pair with a prior [`Port::raise_privilege`] in the same
    /// context.
    unsafe fn lower_privilege();

    /// Memory-ordering fence executed on every privilege transition, so
    /// no access issued on one side of the boundary drifts to the other.
    fn memory_fence();

    /// Masks interrupts. Nestable.
    fn enter_critical();

    /// Unmasks interrupts when the outermost critical section exits.
    fn exit_critical();
}
