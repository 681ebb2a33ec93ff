/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Offset type for arena addresses
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Simulated time in integer ticks
pub type Tick = u64;
