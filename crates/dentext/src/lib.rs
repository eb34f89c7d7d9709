//! Dentext
//!
//! Incremental emission of indentation-sensitive text: generated source
//! code, configuration files, structured reports. Output is built in one
//! pass. Nothing is re-scanned or re-indented after it is written.
//!
//! # Architecture
//!
//! - [`TextBuffer`]: growable storage with an explicit capacity policy and a
//!   canonical newline token
//! - [`split_lines`]: zero-copy line splitting over `\n`, `\r` and `\r\n`
//!   (from `dentext_lines`)
//! - [`IndentedWriter`]: tracks nesting depth and line state, and writes
//!   indentation before the first character of every line
//! - [`BracketBlock`]: `{ ... }`-style blocks on top of the writer
//!
//! The writer is the only component with semantic state. The buffer knows
//! nothing about lines; the scanner knows nothing about storage.
//!
//! # Example
//!
//! ```
//! use dentext::{Indentation, IndentedWriter, Newline, BufferConfig};
//!
//! # fn main() -> Result<(), dentext::BufferError> {
//! let config = BufferConfig::default().with_newline(Newline::Lf);
//! let mut w = IndentedWriter::with_config(Indentation::spaces(4), config)?;
//!
//! w.append_line("fn answer() -> u32")?;
//! {
//!     let mut body = w.enter_braces()?;
//!     body.append_line("42")?;
//! }
//!
//! assert_eq!(w.render(), "fn answer() -> u32\n{\n    42\n}\n");
//! # Ok(())
//! # }
//! ```

pub mod block;
pub mod buffer;
pub mod config;
pub mod error;
pub mod writer;

pub use block::{BracketBlock, CLOSE_BRACE, OPEN_BRACE};
pub use buffer::TextBuffer;
pub use config::{BufferConfig, Indentation, Newline};
pub use dentext_lines::{split_lines, LineSplit};
pub use error::BufferError;
pub use writer::{IndentedWriter, NestingScope};
