//! Session transports

mod stdio;

pub use stdio::StdioSession;
