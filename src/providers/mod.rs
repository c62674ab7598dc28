pub mod clipboard;

pub use clipboard::{MemoryClipboard, TerminalClipboard};
