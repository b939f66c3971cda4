/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module defines the seam between an external
//! tokenizer and the parser: the [`Scan`] trait, through
//! which the parser requests more tokens on demand, and the
//! [`TokenStream`] adapter which buffers them and exposes
//! the one token lookahead the parser operates on.
//!
//! Pre-tokenized input can be wrapped directly via
//! [`TokenStream::from_tokens`], without implementing
//! [`Scan`].

use std::fmt;

use crate::{
    queue::Queue,
    token::{Mark, Marker, Slice, TokenEntry},
};

/// Result type returned by [`Scan`] sources
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Interface over the functionality that produces
/// [`Token`]s for the parser.
///
/// The parser invokes [`tokens`](Scan::tokens) whenever its
/// lookahead buffer runs dry. An implementation appends any
/// number of entries to the given queue; appending nothing
/// signals that the source is exhausted and no further
/// calls will be made.
///
/// [`Token`]: enum@crate::token::Token
pub trait Scan<'de>: fmt::Debug
{
    /// Fetch the next run of tokens into .queue
    fn tokens(&mut self, queue: &mut Queue<TokenEntry<'de>>) -> SourceResult<()>;
}

/// Failures surfaced by a [`Scan`] source, split by the
/// layer they originated in
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError
{
    /// The scanner could not lex the byte stream into a
    /// token
    Scanner
    {
        problem: Slice<'static>, mark: Mark
    },

    /// The byte stream could not be read or decoded
    Reader
    {
        problem: Slice<'static>, mark: Mark
    },
}

impl SourceError
{
    pub fn problem(&self) -> &str
    {
        match self
        {
            SourceError::Scanner { problem, .. } => problem,
            SourceError::Reader { problem, .. } => problem,
        }
    }

    pub fn mark(&self) -> Mark
    {
        match self
        {
            SourceError::Scanner { mark, .. } => *mark,
            SourceError::Reader { mark, .. } => *mark,
        }
    }
}

impl fmt::Display for SourceError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let mark = self.mark();

        write!(
            f,
            "{}, at line {} column {}",
            self.problem(),
            mark.line,
            mark.column
        )
    }
}

impl std::error::Error for SourceError {}

/// A [`Scan`] source that never produces another token,
/// used for streams that were tokenized up front
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhausted;

impl<'de> Scan<'de> for Exhausted
{
    fn tokens(&mut self, _: &mut Queue<TokenEntry<'de>>) -> SourceResult<()>
    {
        Ok(())
    }
}

/// Buffered lookahead over a [`Scan`] source.
///
/// [`peek`](#method.peek) returns the head token without
/// consuming it, refilling the buffer from the source when
/// empty; [`pop`](#method.pop) removes it. The stream also
/// tracks how many tokens have been consumed, and whether
/// the stream end token is among them.
#[derive(Debug, Clone)]
pub struct TokenStream<'de, S>
{
    source: S,
    queue:  Queue<TokenEntry<'de>>,

    exhausted:           bool,
    tokens_parsed:       usize,
    stream_end_produced: bool,
}

impl<'de, S> TokenStream<'de, S>
where
    S: Scan<'de>,
{
    pub fn new(source: S) -> Self
    {
        Self {
            source,
            queue: Queue::new(),
            exhausted: false,
            tokens_parsed: 0,
            stream_end_produced: false,
        }
    }

    /// Peek the head of the stream, requesting more tokens
    /// from the source if none are buffered. Returns None
    /// once the source is exhausted.
    pub fn peek(&mut self) -> SourceResult<Option<&TokenEntry<'de>>>
    {
        while self.queue.is_empty() && !self.exhausted
        {
            self.source.tokens(&mut self.queue)?;

            // A fetch that adds nothing means the source is
            // finished
            if self.queue.is_empty()
            {
                self.exhausted = true;
            }
        }

        Ok(self.queue.head())
    }

    /// Remove and return the head of the stream
    pub fn pop(&mut self) -> SourceResult<Option<TokenEntry<'de>>>
    {
        self.peek()?;

        let entry = self.queue.pop();

        if let Some(ref entry) = entry
        {
            self.tokens_parsed += 1;

            if matches!(entry.marker(), Marker::StreamEnd)
            {
                self.stream_end_produced = true;
            }
        }

        Ok(entry)
    }

    /// Count of tokens consumed so far
    pub fn tokens_parsed(&self) -> usize
    {
        self.tokens_parsed
    }

    /// Has the stream end token been consumed?
    pub fn stream_end_produced(&self) -> bool
    {
        self.stream_end_produced
    }
}

impl<'de> TokenStream<'de, Exhausted>
{
    /// Wrap a pre-tokenized stream, bypassing the [`Scan`]
    /// machinery entirely
    pub fn from_tokens<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = TokenEntry<'de>>,
    {
        Self {
            source: Exhausted,
            queue: tokens.into_iter().collect(),
            exhausted: true,
            tokens_parsed: 0,
            stream_end_produced: false,
        }
    }
}
