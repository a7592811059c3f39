//! An incremental, event-driven JSON lexer.
//!
//! [`Parser`] consumes input one byte chunk at a time and reports a stream of
//! structural [`Event`]s — the starts and ends of strings, numbers, booleans,
//! nulls, objects, arrays and object keys — without building a value tree.
//! Input may arrive split at arbitrary byte boundaries (network reads,
//! incremental decompression); the event stream is identical no matter how
//! the document is chunked.
//!
//! The parser reports token boundaries only and never copies payload bytes.
//! A caller that needs the text of a string or number accumulates the bytes
//! it fed between that token's `Start` and `End` events.
//!
//! ```
//! use jolex::{Event, Parser};
//!
//! let mut parser = Parser::new();
//! let events: Vec<_> = parser
//!     .events(b"[1, true]")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(
//!     events,
//!     [
//!         Event::ArrayStart,
//!         Event::NumberStart,
//!         Event::NumberEnd,
//!         Event::BoolStart,
//!         Event::BoolEnd,
//!         Event::ArrayEnd,
//!     ]
//! );
//! assert_eq!(parser.end(), Ok(Event::Done));
//! ```
//!
//! For finer control, [`Parser::parse`] processes a buffer until at most one
//! event is produced and reports how many bytes it consumed, which lets a
//! caller track the exact byte span of every token. [`Parser::skip`]
//! suppresses the events of selected subtrees on the fly, for callers that
//! extract or redact parts of a document without inspecting the rest.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod event;
mod parser;

pub use error::{ErrorKind, SyntaxError};
pub use event::{Category, Event, Phase};
pub use parser::{Events, Parser};
