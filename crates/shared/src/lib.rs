//! Domain types shared between the wallet core and the desktop UI.

pub mod chain;
pub mod domain;
