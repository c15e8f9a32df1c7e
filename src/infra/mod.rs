//! Infrastructure layer
//!
//! Direct contact with the operating system: the native-call seam and the
//! path checks that gate every privileged operation.

pub mod backend;
pub mod checks;
