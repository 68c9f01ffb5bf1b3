//! Pure, request-scoped data structures. Nothing here is persisted.

pub mod catalog;
pub mod command;
pub mod driver;
pub mod result;

pub use catalog::*;
pub use command::*;
pub use driver::*;
pub use result::*;
