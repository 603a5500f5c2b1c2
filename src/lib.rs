//! Purpose: CSV→JSON codec library backing the `csvjson` CLI and C ABI.
//! Exports: `core` (scanner, table policy, typing, emitter, errors), `abi`.
//! Role: Builds as rlib for Rust callers and cdylib/staticlib for shims.
//! Invariants: The codec is stateless and reentrant; every call works on
//!             its own input and its own output allocation.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod abi;
pub mod core;
