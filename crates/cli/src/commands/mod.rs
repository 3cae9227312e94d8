pub mod inspect;
mod session;
pub mod trace;

pub use inspect::inspect_command;
pub use session::Session;
pub use trace::trace_command;
