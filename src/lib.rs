//! privgate - Privilege-Boundary Layer for MPU-Protected Real-Time Kernels
//!
//! The shim between unprivileged application tasks and a privileged
//! real-time kernel on MPU hardware. Tasks never hold kernel pointers:
//! every kernel object is addressed through a fixed-capacity handle pool,
//! and every service call crosses a single privilege trampoline.
//!
//! # Security Features
//! - Indirected object identity: handles are small integers, never pointers
//! - Fail-safe translation: forged, stale and out-of-range handles are
//!   indistinguishable from missing objects
//! - Structural privilege symmetry: one bracket with one exit restores the
//!   caller's privilege level on every path
//! - Kind-tagged slots: a queue handle can never resolve as a task
//!
//! # Architecture
//! - `pool`: the handle pool (slot state machine, translation, adoption)
//! - `port`: hardware primitives supplied by the platform layer
//! - `kernel`: service traits implemented by the embedding kernel
//! - `gate`: the trampoline and slot lifecycle protocols
//! - `services`: the protected entry points, one module per service family
//!
//! The embedding kernel constructs a [`Gate`] at boot, typically in a
//! `static`, and routes its system call entry through the gate's methods.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

mod gate;
pub mod kernel;
pub mod pool;
pub mod port;
mod services;

#[cfg(test)]
mod test_utils;

pub use gate::Gate;
pub use pool::{
    kind, EventGroupHandle, EventGroupRef, Handle, HandlePool, Kind, ObjectKind, ObjectRef,
    QueueHandle, QueueRef, QueueSetHandle, QueueSetRef, SlotIndex, StreamBufferHandle,
    StreamBufferRef, TaskHandle, TaskRef, TimerHandle, TimerRef, INDEX_OFFSET,
};
pub use port::{Port, PrivilegeLevel};
