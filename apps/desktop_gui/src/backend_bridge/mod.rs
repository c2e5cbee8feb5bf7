//! Bridge between the UI thread and the wallet worker thread.

pub mod commands;
pub mod worker;
