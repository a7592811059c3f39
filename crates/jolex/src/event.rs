//! Structural events reported by the [`Parser`](crate::Parser).

/// A discrete lexical or structural milestone in the input document.
///
/// At most one event is produced per consumed byte. `NumberEnd` is the one
/// event detected a byte late: a number only ends once a byte that cannot
/// belong to it is seen, so the terminating byte is left unconsumed and
/// re-presented on the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// `{` opened an object.
    ObjectStart,
    /// `}` closed an object.
    ObjectEnd,
    /// `[` opened an array.
    ArrayStart,
    /// `]` closed an array.
    ArrayEnd,
    /// `"` opened an object key.
    KeyStart,
    /// `"` closed an object key.
    KeyEnd,
    /// `"` opened a string value.
    StringStart,
    /// `"` closed a string value.
    StringEnd,
    /// The first byte of a number.
    NumberStart,
    /// A number was terminated by a byte that is not part of it.
    NumberEnd,
    /// The first byte of `true` or `false`.
    BoolStart,
    /// The last byte of `true` or `false`.
    BoolEnd,
    /// The first byte of `null`.
    NullStart,
    /// The last byte of `null`.
    NullEnd,
    /// The single top-level value has been fully parsed. Only ever returned
    /// by [`Parser::end`](crate::Parser::end).
    Done,
}

/// Whether an [`Event`] opens or closes its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The token's first byte was just consumed.
    Start,
    /// The token is complete.
    End,
}

/// The grammatical class of the token an [`Event`] delimits.
///
/// Depth bookkeeping and the skip controller operate on these markers
/// generically rather than on individual event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Objects and arrays.
    Composite,
    /// Strings, numbers, booleans and null.
    Primitive,
    /// Object keys. Lexically strings, but tracked separately: a key and the
    /// value it introduces share a single depth slot.
    Key,
}

impl Event {
    /// The start/end phase of this event, or `None` for [`Event::Done`].
    #[must_use]
    pub fn phase(self) -> Option<Phase> {
        match self {
            Event::ObjectStart
            | Event::ArrayStart
            | Event::KeyStart
            | Event::StringStart
            | Event::NumberStart
            | Event::BoolStart
            | Event::NullStart => Some(Phase::Start),
            Event::ObjectEnd
            | Event::ArrayEnd
            | Event::KeyEnd
            | Event::StringEnd
            | Event::NumberEnd
            | Event::BoolEnd
            | Event::NullEnd => Some(Phase::End),
            Event::Done => None,
        }
    }

    /// The token class this event delimits, or `None` for [`Event::Done`].
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Event::ObjectStart | Event::ObjectEnd | Event::ArrayStart | Event::ArrayEnd => {
                Some(Category::Composite)
            }
            Event::KeyStart | Event::KeyEnd => Some(Category::Key),
            Event::StringStart
            | Event::StringEnd
            | Event::NumberStart
            | Event::NumberEnd
            | Event::BoolStart
            | Event::BoolEnd
            | Event::NullStart
            | Event::NullEnd => Some(Category::Primitive),
            Event::Done => None,
        }
    }

    /// Whether this event opens a token.
    #[must_use]
    pub fn is_start(self) -> bool {
        self.phase() == Some(Phase::Start)
    }

    /// Whether this event closes a token.
    #[must_use]
    pub fn is_end(self) -> bool {
        self.phase() == Some(Phase::End)
    }

    /// Whether this event delimits an object or array.
    #[must_use]
    pub fn is_composite(self) -> bool {
        self.category() == Some(Category::Composite)
    }

    /// Whether this event delimits a string, number, boolean or null.
    #[must_use]
    pub fn is_primitive(self) -> bool {
        self.category() == Some(Category::Primitive)
    }
}
