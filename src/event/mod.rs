/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes methods for directly interacting
//! with YAML event streams.
//!
//! ## Understanding Events
//!
//! Each event produced represents an important semantic
//! change in the underlying YAML token stream. Broadly,
//! these can be categorized into three spaces:
//!
//! 1. Virtual / Marker
//!     - [`StreamStart`]
//!     - [`StreamEnd`]
//!     - [`DocumentStart`]
//!     - [`DocumentEnd`]
//!
//! 2. Nesting change (+-)
//!     - [`MappingStart`]
//!     - [`MappingEnd`]
//!     - [`SequenceStart`]
//!     - [`SequenceEnd`]
//!
//! 3. Data / Alias
//!     - [`Scalar`]
//!     - [`Alias`]
//!
//! Together, these are used to produce the following
//! productions:
//!
//! ```text
//! stream          := StreamStart document* StreamEnd
//! document        := DocumentStart node DocumentEnd
//! node            := Alias | Scalar | collection
//! collection      := sequence | mapping
//! sequence        := SequenceStart node* SequenceEnd
//! mapping         := MappingStart (node node)* MappingEnd
//!
//! *               => 0 or more of prefix
//! ()              => production grouping
//! |               => production logical OR
//! ```
//!
//! In addition to the various [`Event`] types, every
//! [`Node`] also provides a hint as to its placement in the
//! stream via its [`NodeKind`]. Together, these should
//! allow users to maintain relatively little external state
//! regarding the [`Event`] stream.
//!
//! ## Examples
//!
//! ```rust
//! use yamlet::{
//!     event::{types::EventData, Events},
//!     token::{Mark, ScalarStyle, StreamEncoding, Token, TokenEntry},
//! };
//!
//! let mark = Mark::default();
//! let entry = |token| TokenEntry::new(token, mark, mark);
//!
//! let events = Events::from_tokens(vec![
//!     entry(Token::StreamStart(StreamEncoding::UTF8)),
//!     entry(Token::Scalar("a scalar".into(), ScalarStyle::Plain)),
//!     entry(Token::StreamEnd),
//! ]);
//!
//! let events: Vec<_> = events
//!     .into_iter()
//!     .collect::<Result<_, _>>()
//!     .expect("a well formed stream");
//!
//! // Start of stream housekeeping, the scalar itself, end
//! // of stream housekeeping
//! assert_eq!(events.len(), 5);
//! assert!(matches!(events[2].data(), EventData::Scalar(_)));
//! ```
//!
//! [`StreamStart`]:    type@types::EventData::StreamStart
//! [`StreamEnd`]:      type@types::EventData::StreamEnd
//! [`DocumentStart`]:  type@types::EventData::DocumentStart
//! [`DocumentEnd`]:    type@types::EventData::DocumentEnd
//! [`MappingStart`]:   type@types::EventData::MappingStart
//! [`MappingEnd`]:     type@types::EventData::MappingEnd
//! [`SequenceStart`]:  type@types::EventData::SequenceStart
//! [`SequenceEnd`]:    type@types::EventData::SequenceEnd
//! [`Scalar`]:         type@types::EventData::Scalar
//! [`Alias`]:          type@types::EventData::Alias
//! [`Node`]:           struct@types::Node
//! [`NodeKind`]:       enum@types::NodeKind

use crate::{
    event::{error::ParseResult, types::Event},
    source::{Exhausted, Scan, TokenStream},
    token::TokenEntry,
};

mod parser;
mod state;

pub mod error;
pub mod types;

pub use self::parser::Parser;

/// Control structure for [`Event`] production, providing an
/// iterator based API for consuming events.
///
/// The returned events have a lifetime associated with the
/// `'de` lifetime of the backing tokens, independent from
/// this structure.
///
/// Its primary usage is as an iterator, either by
/// reference, via [`iter`](#method.iter), or by value with
/// [`into_iter`](#method.into_iter). Both iterators fuse
/// once an error has been returned.
#[derive(Debug)]
pub struct Events<'de, S>
{
    stream: TokenStream<'de, S>,
    parser: Parser,
}

impl<'de, S> Events<'de, S>
where
    S: Scan<'de>,
{
    /// Instantiate a new [`Events`] over the tokens
    /// produced by the given source
    pub fn new(source: S) -> Self
    {
        Self {
            stream: TokenStream::new(source),
            parser: Parser::new(),
        }
    }

    /// Return an iterator which borrows from the underlying
    /// [`Events`] structure.
    pub fn iter<'a>(&'a mut self) -> EventIterRef<'a, 'de, S>
    {
        EventIterRef::new(self)
    }

    /// Process the next event
    pub(crate) fn next_event(&mut self) -> Option<ParseResult<Event<'de>>>
    {
        self.parser.next_event(&mut self.stream)
    }
}

impl<'de> Events<'de, Exhausted>
{
    /// Instantiate a new [`Events`] over a pre-tokenized
    /// stream
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = TokenEntry<'de>>,
    {
        Self {
            stream: TokenStream::from_tokens(tokens),
            parser: Parser::new(),
        }
    }
}

impl<'de, S> IntoIterator for Events<'de, S>
where
    S: Scan<'de>,
{
    type Item = ParseResult<Event<'de>>;

    type IntoIter = EventIter<'de, S>;

    fn into_iter(self) -> Self::IntoIter
    {
        EventIter::new(self)
    }
}

/// Owning iterator over an underlying [`Events`].
///
/// It is unlikely you want to construct this type by hand.
/// Consider using the [`IntoIterator`] implementation on
/// [`Events`] instead.
#[derive(Debug)]
pub struct EventIter<'de, S>
{
    inner:  Events<'de, S>,
    failed: bool,
}

impl<'de, S> EventIter<'de, S>
where
    S: Scan<'de>,
{
    /// Instantiate an owning [`Events`] iterator
    pub fn new(inner: Events<'de, S>) -> Self
    {
        Self {
            inner,
            failed: false,
        }
    }

    /// Retrieve the underlying [`Events`], discarding this
    /// iterator
    pub fn into_inner(self) -> Events<'de, S>
    {
        self.inner
    }
}

impl<'de, S> Iterator for EventIter<'de, S>
where
    S: Scan<'de>,
{
    type Item = ParseResult<Event<'de>>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.failed
        {
            return None;
        }

        let next = self.inner.next_event();

        if matches!(next, Some(Err(_)))
        {
            self.failed = true;
        }

        next
    }
}

/// Borrowing iterator over an underlying [`Events`].
///
/// It is unlikely you want to construct this type by hand.
/// Consider using [`Events::iter()`] instead.
#[derive(Debug)]
pub struct EventIterRef<'a, 'de, S>
{
    inner:  &'a mut Events<'de, S>,
    failed: bool,
}

impl<'a, 'de, S> EventIterRef<'a, 'de, S>
where
    S: Scan<'de>,
{
    /// Instantiate a borrowing [`Events`] iterator
    pub fn new(parent: &'a mut Events<'de, S>) -> Self
    {
        Self {
            inner:  parent,
            failed: false,
        }
    }
}

impl<'a, 'de, S> Iterator for EventIterRef<'a, 'de, S>
where
    S: Scan<'de>,
{
    type Item = ParseResult<Event<'de>>;

    fn next(&mut self) -> Option<Self::Item>
    {
        if self.failed
        {
            return None;
        }

        let next = self.inner.next_event();

        if matches!(next, Some(Err(_)))
        {
            self.failed = true;
        }

        next
    }
}
