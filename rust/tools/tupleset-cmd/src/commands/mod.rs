//! Command implementations for tupleset-cmd

pub mod inspect;
pub mod page;
pub mod reduce;
