//! Controller layer: UI events, the transfer lifecycle reducer, and command
//! orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
