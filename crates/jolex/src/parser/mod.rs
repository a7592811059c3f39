//! The incremental state machine: byte consumer, continuation stack and the
//! depth-indexed skip controller.
//!
//! The machine advances one byte per step. Three transitions instead leave
//! the current byte unconsumed so that the next dispatch re-examines it:
//!
//! - a closing `"` is left for the continuation popped off the stack, which
//!   rediscovers it and decides between `StringEnd` and `KeyEnd` (keys and
//!   string values share the string sub-machine);
//! - the first byte of an array element is left for the value dispatch after
//!   the element's continuation has been pushed;
//! - a number only ends once a byte that cannot belong to it appears, so
//!   `NumberEnd` is reported with the terminating byte unconsumed and the
//!   caller re-presents it against the resumed state.
//!
//! Nesting is recursive in the grammar but not in the implementation: when a
//! nested value begins, the state to resume afterwards is pushed onto a
//! `Vec`-backed continuation stack, so parse depth is bounded by memory
//! rather than call-stack frames. Popping on an empty stack means the single
//! permitted top-level value just finished.

use alloc::vec::Vec;

use crate::{
    error::{ErrorKind, SyntaxError},
    event::{Category, Event, Phase},
};

/// A precise position in the JSON grammar. The comments show the shortest
/// input prefix that leaves the machine in each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Expecting the beginning of a value.
    Value,
    /// The top-level value is complete; only whitespace may follow.
    Done,

    /// `{`
    ObjectKeyOrBrace,
    /// Re-examining the closing quote of an object key.
    ObjectKeyDone,
    /// `{"foo"`
    ObjectColon,
    /// `{"foo":1`
    ObjectCommaOrBrace,
    /// `{"foo":1,`
    ObjectKey,

    /// `[`
    ArrayValueOrBracket,
    /// `[1`
    ArrayCommaOrBracket,

    /// `"\u`
    StringUnicode,
    /// `"\u1`
    StringUnicode2,
    /// `"\u12`
    StringUnicode3,
    /// `"\u123`
    StringUnicode4,
    /// `"`
    String,
    /// Re-examining the closing quote of a string value.
    StringDone,
    /// `"\`
    StringEscaped,

    /// `-`
    NumberNegative,
    /// `0`
    NumberZero,
    /// `1`
    Number,
    /// `1.`
    NumberDotFirstDigit,
    /// `1.2`
    NumberDotDigit,
    /// `1e`
    NumberExpSign,
    /// `1e+`
    NumberExpFirstDigit,
    /// `1e+3`
    NumberExpDigit,

    /// `t`
    True,
    /// `tr`
    True2,
    /// `tru`
    True3,
    /// `f`
    False,
    /// `fa`
    False2,
    /// `fal`
    False3,
    /// `fals`
    False4,
    /// `n`
    Null,
    /// `nu`
    Null2,
    /// `nul`
    Null3,
}

impl State {
    /// Whitespace is legal between tokens, i.e. wherever a structural or
    /// value byte is otherwise expected. It is illegal inside tokens.
    fn allows_space(self) -> bool {
        matches!(
            self,
            State::Value
                | State::Done
                | State::ObjectKeyOrBrace
                | State::ObjectKey
                | State::ObjectColon
                | State::ObjectCommaOrBrace
                | State::ArrayValueOrBracket
                | State::ArrayCommaOrBracket
        )
    }
}

fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

/// An incremental, event-driven JSON parser.
///
/// Feed bytes with [`parse`](Parser::parse) (or drain a whole buffer with
/// [`events`](Parser::events)), then signal end of input with
/// [`end`](Parser::end). Exactly one top-level value is accepted per instance
/// lifetime between [`reset`](Parser::reset)s.
///
/// An instance is single-threaded mutable state; concurrent documents each
/// get their own instance.
#[derive(Debug)]
pub struct Parser {
    state: State,
    /// Continuation stack: states to resume once the current nested value
    /// finishes.
    stack: Vec<State>,

    depth: usize,
    /// Set between a key's `KeyStart` and the start of its value.
    property: bool,

    // Skip window. Active while `drop + empty > 0`; `limit` is the depth
    // threshold whose upward crossings spend budget.
    drop: usize,
    empty: usize,
    limit: usize,

    /// Bytes consumed since the last reset; error offsets are derived from
    /// it.
    pos: usize,
    error: Option<SyntaxError>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser expecting the beginning of a top-level value.
    #[must_use]
    pub fn new() -> Self {
        Parser {
            state: State::Value,
            stack: Vec::new(),
            depth: 0,
            property: false,
            drop: 0,
            empty: 0,
            limit: 0,
            pos: 0,
            error: None,
        }
    }

    /// Processes `input` until at most one event is produced.
    ///
    /// Returns the number of bytes consumed and the event, if any. `None`
    /// with every byte consumed means more input is needed. The consumed
    /// count can be less than `input.len()` when an event fires mid-buffer,
    /// and `NumberEnd` is reported with its terminating byte unconsumed, so
    /// the caller must re-present the unconsumed tail on the next call.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] on the first byte that cannot legally occur
    /// in the current state. The error is sticky until
    /// [`reset`](Parser::reset).
    #[allow(clippy::too_many_lines)]
    pub fn parse(&mut self, input: &[u8]) -> Result<(usize, Option<Event>), SyntaxError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut i = 0;
        while i < input.len() {
            let b = input[i];

            if self.state.allows_space() && is_space(b) {
                i += 1;
                continue;
            }

            // `consume` is cleared at the re-examine sites: the byte stays
            // where it is and the next dispatch (or the next call) sees it
            // again.
            let mut consume = true;
            let event = match self.state {
                State::Value => match b {
                    b'{' => {
                        self.state = State::ObjectKeyOrBrace;
                        Some(Event::ObjectStart)
                    }
                    b'[' => {
                        self.state = State::ArrayValueOrBracket;
                        Some(Event::ArrayStart)
                    }
                    b'"' => {
                        self.state = State::String;
                        self.stack.push(State::StringDone);
                        Some(Event::StringStart)
                    }
                    b'-' => {
                        self.state = State::NumberNegative;
                        Some(Event::NumberStart)
                    }
                    b'0' => {
                        self.state = State::NumberZero;
                        Some(Event::NumberStart)
                    }
                    b'1'..=b'9' => {
                        self.state = State::Number;
                        Some(Event::NumberStart)
                    }
                    b't' => {
                        self.state = State::True;
                        Some(Event::BoolStart)
                    }
                    b'f' => {
                        self.state = State::False;
                        Some(Event::BoolStart)
                    }
                    b'n' => {
                        self.state = State::Null;
                        Some(Event::NullStart)
                    }
                    _ => return Err(self.fail(ErrorKind::ExpectedValue, i)),
                },

                State::ObjectKeyOrBrace => {
                    if b == b'}' {
                        self.state = self.resume();
                        Some(Event::ObjectEnd)
                    } else {
                        // not a brace, so it must be a key
                        self.state = State::ObjectKey;
                        consume = false;
                        None
                    }
                }

                State::ObjectKey => {
                    if b == b'"' {
                        self.state = State::String;
                        self.stack.push(State::ObjectKeyDone);
                        Some(Event::KeyStart)
                    } else {
                        return Err(self.fail(ErrorKind::ExpectedObjectKey, i));
                    }
                }

                // only ever entered on the re-examined closing quote
                State::ObjectKeyDone => {
                    self.state = State::ObjectColon;
                    Some(Event::KeyEnd)
                }

                State::ObjectColon => {
                    if b == b':' {
                        self.state = State::Value;
                        self.stack.push(State::ObjectCommaOrBrace);
                        None
                    } else {
                        return Err(self.fail(ErrorKind::ExpectedColon, i));
                    }
                }

                State::ObjectCommaOrBrace => match b {
                    b',' => {
                        self.state = State::ObjectKey;
                        None
                    }
                    b'}' => {
                        self.state = self.resume();
                        Some(Event::ObjectEnd)
                    }
                    _ => return Err(self.fail(ErrorKind::ExpectedCommaOrCloseBrace, i)),
                },

                State::ArrayValueOrBracket => {
                    if b == b']' {
                        self.state = self.resume();
                        Some(Event::ArrayEnd)
                    } else {
                        // leave the byte for the value dispatch
                        self.state = State::Value;
                        self.stack.push(State::ArrayCommaOrBracket);
                        consume = false;
                        None
                    }
                }

                State::ArrayCommaOrBracket => match b {
                    b',' => {
                        self.state = State::Value;
                        self.stack.push(State::ArrayCommaOrBracket);
                        None
                    }
                    b']' => {
                        self.state = self.resume();
                        Some(Event::ArrayEnd)
                    }
                    _ => return Err(self.fail(ErrorKind::ExpectedCommaOrCloseBracket, i)),
                },

                State::StringUnicode
                | State::StringUnicode2
                | State::StringUnicode3
                | State::StringUnicode4 => {
                    if b.is_ascii_hexdigit() {
                        self.state = match self.state {
                            State::StringUnicode => State::StringUnicode2,
                            State::StringUnicode2 => State::StringUnicode3,
                            State::StringUnicode3 => State::StringUnicode4,
                            _ => State::String,
                        };
                        None
                    } else {
                        return Err(self.fail(ErrorKind::InvalidUnicodeEscape, i));
                    }
                }

                State::String => match b {
                    b'"' => {
                        // leave the quote for the popped continuation, which
                        // rediscovers it and emits StringEnd or KeyEnd
                        self.state = self.resume();
                        consume = false;
                        None
                    }
                    b'\\' => {
                        self.state = State::StringEscaped;
                        None
                    }
                    _ if b < 0x20 => {
                        return Err(self.fail(ErrorKind::InvalidStringCharacter, i));
                    }
                    _ => None,
                },

                // only ever entered on the re-examined closing quote
                State::StringDone => {
                    self.state = self.resume();
                    Some(Event::StringEnd)
                }

                State::StringEscaped => match b {
                    b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"' => {
                        self.state = State::String;
                        None
                    }
                    b'u' => {
                        self.state = State::StringUnicode;
                        None
                    }
                    _ => return Err(self.fail(ErrorKind::InvalidEscape, i)),
                },

                State::NumberNegative => match b {
                    b'0' => {
                        self.state = State::NumberZero;
                        None
                    }
                    b'1'..=b'9' => {
                        self.state = State::Number;
                        None
                    }
                    _ => return Err(self.fail(ErrorKind::ExpectedIntegerDigit, i)),
                },

                State::Number => {
                    if b.is_ascii_digit() {
                        None
                    } else {
                        // the same terminators apply as after a leading zero
                        self.state = State::NumberZero;
                        consume = false;
                        None
                    }
                }

                State::NumberZero => match b {
                    b'.' => {
                        self.state = State::NumberDotFirstDigit;
                        None
                    }
                    b'e' | b'E' => {
                        self.state = State::NumberExpSign;
                        None
                    }
                    _ => {
                        // the byte is not part of the number; leave it for
                        // the resumed state
                        self.state = self.resume();
                        consume = false;
                        Some(Event::NumberEnd)
                    }
                },

                State::NumberDotFirstDigit => {
                    if b.is_ascii_digit() {
                        self.state = State::NumberDotDigit;
                        None
                    } else {
                        return Err(self.fail(ErrorKind::ExpectedFractionDigit, i));
                    }
                }

                State::NumberDotDigit => match b {
                    b'e' | b'E' => {
                        self.state = State::NumberExpSign;
                        None
                    }
                    _ if b.is_ascii_digit() => None,
                    _ => {
                        self.state = self.resume();
                        consume = false;
                        Some(Event::NumberEnd)
                    }
                },

                State::NumberExpSign => {
                    self.state = State::NumberExpFirstDigit;
                    if b == b'+' || b == b'-' {
                        None
                    } else {
                        consume = false;
                        None
                    }
                }

                State::NumberExpFirstDigit => {
                    if b.is_ascii_digit() {
                        self.state = State::NumberExpDigit;
                        None
                    } else {
                        return Err(self.fail(ErrorKind::ExpectedExponentDigit, i));
                    }
                }

                State::NumberExpDigit => {
                    if b.is_ascii_digit() {
                        None
                    } else {
                        self.state = self.resume();
                        consume = false;
                        Some(Event::NumberEnd)
                    }
                }

                State::True => {
                    if b == b'r' {
                        self.state = State::True2;
                        None
                    } else {
                        return Err(self.fail_literal("true", 'r', i));
                    }
                }
                State::True2 => {
                    if b == b'u' {
                        self.state = State::True3;
                        None
                    } else {
                        return Err(self.fail_literal("true", 'u', i));
                    }
                }
                State::True3 => {
                    if b == b'e' {
                        self.state = self.resume();
                        Some(Event::BoolEnd)
                    } else {
                        return Err(self.fail_literal("true", 'e', i));
                    }
                }

                State::False => {
                    if b == b'a' {
                        self.state = State::False2;
                        None
                    } else {
                        return Err(self.fail_literal("false", 'a', i));
                    }
                }
                State::False2 => {
                    if b == b'l' {
                        self.state = State::False3;
                        None
                    } else {
                        return Err(self.fail_literal("false", 'l', i));
                    }
                }
                State::False3 => {
                    if b == b's' {
                        self.state = State::False4;
                        None
                    } else {
                        return Err(self.fail_literal("false", 's', i));
                    }
                }
                State::False4 => {
                    if b == b'e' {
                        self.state = self.resume();
                        Some(Event::BoolEnd)
                    } else {
                        return Err(self.fail_literal("false", 'e', i));
                    }
                }

                State::Null => {
                    if b == b'u' {
                        self.state = State::Null2;
                        None
                    } else {
                        return Err(self.fail_literal("null", 'u', i));
                    }
                }
                State::Null2 => {
                    if b == b'l' {
                        self.state = State::Null3;
                        None
                    } else {
                        return Err(self.fail_literal("null", 'l', i));
                    }
                }
                State::Null3 => {
                    if b == b'l' {
                        self.state = self.resume();
                        Some(Event::NullEnd)
                    } else {
                        return Err(self.fail_literal("null", 'l', i));
                    }
                }

                State::Done => return Err(self.fail(ErrorKind::TrailingData, i)),
            };

            if consume {
                i += 1;
            }

            let Some(event) = event else { continue };

            self.account(event);

            if let Some(event) = self.suppress(event) {
                self.pos += i;
                return Ok((i, Some(event)));
            }
        }

        self.pos += i;
        Ok((i, None))
    }

    /// Signals that no further input will arrive.
    ///
    /// Returns [`Event::Done`] once the top-level value is complete
    /// (idempotently so), or a pending [`Event::NumberEnd`] when the input
    /// ended inside a top-level bare number, which has no terminator of its
    /// own; a subsequent call then returns `Done`.
    ///
    /// # Errors
    ///
    /// Returns a sticky [`SyntaxError`] in any other state: containers and
    /// strings cannot legally end at end of input without their closing
    /// delimiter.
    pub fn end(&mut self) -> Result<Event, SyntaxError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        match self.state {
            State::Done => Ok(Event::Done),
            State::NumberZero | State::Number | State::NumberDotDigit | State::NumberExpDigit
                if self.depth == 1 =>
            {
                self.state = State::Done;
                self.account(Event::NumberEnd);
                Ok(Event::NumberEnd)
            }
            _ => {
                let error = SyntaxError {
                    kind: ErrorKind::UnexpectedEndOfInput,
                    offset: self.pos,
                };
                self.error = Some(error);
                Err(error)
            }
        }
    }

    /// The number of currently open values — composites, primitives and any
    /// in-flight object key — above the current parse position.
    ///
    /// Zero exactly when the parser is outside any value: before the
    /// top-level value's first `Start` and after its matching `End`.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Suppresses the events of upcoming values at the current nesting
    /// level.
    ///
    /// The window covers `drop + empty` of the currently open values: the
    /// first unit is spent when the value open at the call completes, and
    /// each further unit when the next enclosing value does, regardless of
    /// how many siblings and descendants are consumed along the way. `drop`
    /// units erase their span from the event stream entirely; `empty` units
    /// preserve only the closing `End` event, acknowledging the value
    /// without exposing its contents:
    ///
    /// ```text
    /// < [{"foo":"bar"},{"baz":[1,2,3]}]
    ///
    /// > ArrayStart
    /// > ObjectStart
    ///
    /// skip(0, 1)   stub out the rest of {"foo":"bar"}, keeping its end
    ///
    /// > ObjectEnd
    /// > ObjectStart
    /// > KeyStart
    ///
    /// skip(2, 0)   erase "baz":[1,2,3] and the rest of its object
    ///
    /// > ArrayEnd
    /// ```
    ///
    /// When invoked inside an object key's span, one unit of `empty` is
    /// converted to `drop`: there is no end-only sense for a key whose start
    /// the caller never saw.
    ///
    /// # Panics
    ///
    /// Panics if `drop + empty` exceeds [`depth`](Parser::depth). That is a
    /// caller bug — an impossible suppression window — not a document error.
    pub fn skip(&mut self, drop: usize, empty: usize) {
        assert!(
            drop + empty <= self.depth,
            "skip window of {} exceeds current depth {}",
            drop + empty,
            self.depth
        );

        let (mut drop, mut empty) = (drop, empty);
        if self.property && drop == 0 && empty > 0 {
            drop += 1;
            empty -= 1;
        }

        self.drop = drop;
        self.empty = empty;
        self.limit = self.depth.saturating_sub(1);
    }

    /// Restores the parser to its initial state, keeping the continuation
    /// stack's allocation. Equivalent to a fresh instance.
    pub fn reset(&mut self) {
        self.state = State::Value;
        self.stack.clear();
        self.depth = 0;
        self.property = false;
        self.drop = 0;
        self.empty = 0;
        self.limit = 0;
        self.pos = 0;
        self.error = None;
    }

    /// Returns a draining iterator over the events produced from `input`.
    ///
    /// The iterator re-presents unconsumed bytes automatically and yields at
    /// most one `Err` before fusing. It does not call [`end`](Parser::end);
    /// do that once the document has no further chunks.
    pub fn events<'src>(&mut self, input: &'src [u8]) -> Events<'_, 'src> {
        Events {
            parser: self,
            input,
        }
    }

    /// Pops the continuation to resume now that a value has completed. An
    /// empty stack means the top-level value just finished.
    fn resume(&mut self) -> State {
        self.stack.pop().unwrap_or(State::Done)
    }

    /// Generic depth bookkeeping over the event's category markers. A key
    /// transiently counts as part of its value's depth so that skip windows
    /// measured at the container level span both key and value.
    fn account(&mut self, event: Event) {
        match (event.category(), event.phase()) {
            (Some(Category::Key), Some(Phase::Start)) => {
                self.depth += 1;
                self.property = true;
            }
            (Some(Category::Key), Some(Phase::End)) => {}
            (Some(_), Some(Phase::Start)) => {
                if self.property {
                    // the key already paid for this value's depth slot
                    self.property = false;
                } else {
                    self.depth += 1;
                }
            }
            (Some(_), Some(Phase::End)) => self.depth -= 1,
            _ => {}
        }
    }

    /// Applies the active skip window, if any. `None` means the event is
    /// withheld from the caller.
    fn suppress(&mut self, event: Event) -> Option<Event> {
        if self.drop == 0 && self.empty == 0 {
            return Some(event);
        }

        // silence everything below the suppression threshold
        if self.depth > self.limit {
            return None;
        }

        // the boundary was crossed upward: one unit of budget is spent
        self.limit = self.limit.saturating_sub(1);

        if self.drop > 0 {
            self.drop -= 1;
            None
        } else {
            self.empty -= 1;
            if event.is_end() { Some(event) } else { None }
        }
    }

    fn fail(&mut self, kind: ErrorKind, i: usize) -> SyntaxError {
        self.pos += i;
        let error = SyntaxError {
            kind,
            offset: self.pos,
        };
        self.error = Some(error);
        error
    }

    fn fail_literal(&mut self, literal: &'static str, expected: char, i: usize) -> SyntaxError {
        self.fail(ErrorKind::InvalidLiteral { literal, expected }, i)
    }
}

/// Draining iterator over the events produced from one input buffer, created
/// by [`Parser::events`].
#[derive(Debug)]
pub struct Events<'p, 'src> {
    parser: &'p mut Parser,
    input: &'src [u8],
}

impl Iterator for Events<'_, '_> {
    type Item = Result<Event, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.input.is_empty() {
                return None;
            }
            match self.parser.parse(self.input) {
                Ok((consumed, event)) => {
                    self.input = &self.input[consumed..];
                    if let Some(event) = event {
                        return Some(Ok(event));
                    }
                    // no event: the whole buffer was consumed
                }
                Err(error) => {
                    self.input = &[];
                    return Some(Err(error));
                }
            }
        }
    }
}
