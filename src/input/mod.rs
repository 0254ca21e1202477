//! Input reading from arguments, files and stdin.

mod reader;

pub use reader::InputReader;
