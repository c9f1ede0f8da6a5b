//! Command implementations for the plainzip CLI.

mod inject;
mod pack;
mod verify;

pub use inject::cmd_inject;
pub use pack::cmd_pack;
pub use verify::cmd_verify;
