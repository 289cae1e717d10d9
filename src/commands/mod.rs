//! Command implementations for hades

pub mod check;
pub mod compare;
pub mod dispatch;
