//! Session/auth gate.
//!
//! # Responsibility
//! - Track the Anonymous/Authenticated state.
//! - Persist a password-free session snapshot across restarts.
//! - Decide route access for the view layer.
//!
//! # Invariants
//! - The session snapshot never contains a password.
//! - This gate is not a security boundary; see `PasswordPolicy`.

pub mod gate;
pub mod session;
