/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the errors that may surface while
//! parsing a YAML token stream.
//!
//! Every error reports a short problem description paired
//! with the [`Mark`] of the offending token; errors raised
//! inside a nested construct additionally carry a "while
//! parsing a ..." context anchored at the construct's
//! opening mark.

use std::fmt;

use crate::{source::SourceError, token::Mark};

/// Result type returned by [`yamlet::event`](super)
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// The pipeline layer an error originated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind
{
    /// The byte stream could not be read or decoded
    Reader,
    /// The byte stream could not be lexed into tokens
    Scanner,
    /// The token stream violated the YAML grammar
    Parser,
}

/// Possible errors that can be encountered while parsing
/// YAML events.
///
/// The first error is latched by the [`Parser`]; every
/// subsequent call returns the same error. These errors are
/// therefore `Clone`.
///
/// [`Parser`]: struct@crate::event::Parser
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError
{
    /// The stream did not begin with a stream start token.
    ///
    /// Typically, this only happens if a token source is
    /// given to two separate parsers.
    CorruptStream
    {
        mark: Mark
    },

    /// More than one `%YAML` directive was found inside a
    /// single document's context.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// %YAML 1.1
    /// %YAML 1.1
    /// #^^^^^^^^ DuplicateVersion
    /// ---
    /// ```
    DuplicateVersion
    {
        mark: Mark
    },

    /// A `%YAML` directive requested a version other than
    /// 1.1, the only version this parser understands.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// %YAML 1.2
    /// #^^^^^^^^ IncompatibleVersion
    /// ---
    /// ```
    IncompatibleVersion
    {
        mark: Mark
    },

    /// More than one `%TAG` directive was found _for the
    /// same handle_ inside a single document's context.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// %TAG !handle! my:custom:tag/
    /// %TAG !handle! my:other:tag/
    /// #    ^^^^^^^^ DuplicateTagDirective
    /// ---
    /// ```
    DuplicateTagDirective
    {
        mark: Mark
    },

    /// A tag referenced a handle that has not been defined.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// ---
    /// key: !handle! value
    /// #    ^^^^^^^^ UndefinedTag
    /// ```
    UndefinedTag
    {
        context_mark: Mark, mark: Mark
    },

    /// Documents after the first must either be introduced
    /// by a DocumentStart '---' symbol, or the previous
    /// document must be closed out with a DocumentEnd
    /// ('...').
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// document: 1
    /// # <-- either a '...' or '---' is required here
    /// # ^^^^^ MissingDocumentStart
    /// document: 2
    /// ```
    MissingDocumentStart
    {
        mark: Mark
    },

    /// A YAML node was required but not found.
    ///
    /// YAML tends to be very forgiving with missing nodes,
    /// but it is possible to construct a YAML stream with a
    /// required Node, most commonly if using tags or
    /// anchors.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// sequence: [ &anchor !!str, ]
    /// #                        ^ MissingNode
    /// ```
    MissingNode
    {
        /// Was the node expected in the flow context?
        flow:         bool,
        context_mark: Mark,
        mark:         Mark,
    },

    /// An entry in a block sequence was required but not
    /// found in the stream
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// - 1
    /// - 2
    /// foo: bar # should be: '- foo: bar'
    /// #^^ MissingBlockEntry
    /// ```
    MissingBlockEntry
    {
        context_mark: Mark, mark: Mark
    },

    /// A YAML mapping key was required but not found.
    ///
    /// Frequently caused by poor indentation in YAML
    /// documents.
    ///
    /// ```yaml
    /// nested:
    ///     key: value
    ///     bad: # YAML requires that a value exist on the same line as its key
    /// #   ^^^^ MissingKey
    ///          value with a different line to key
    /// ```
    MissingKey
    {
        context_mark: Mark, mark: Mark
    },

    /// A YAML flow sequence was missing a terminus (']') or
    /// continuation (',') symbol.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// missing continuation: [ {key1: value} {key2: value} ]
    /// #                                    ^ MissingFlowSequenceEntryOrEnd
    /// ```
    MissingFlowSequenceEntryOrEnd
    {
        context_mark: Mark, mark: Mark
    },

    /// A YAML flow mapping was missing a terminus ('}') or
    /// continuation (',') symbol.
    ///
    /// ## Examples
    ///
    /// ```yaml
    /// missing continuation: {first: value second: value}
    /// #                                  ^ MissingFlowMappingEntryOrEnd
    /// ```
    MissingFlowMappingEntryOrEnd
    {
        context_mark: Mark, mark: Mark
    },

    /// The parser was expecting more tokens, but the token
    /// stream finished unexpectedly
    UnexpectedEOF,

    /// An issue occurred while producing tokens, before the
    /// grammar could be checked
    Source(SourceError),
}

impl ParseError
{
    /// The pipeline layer this error originated in
    pub fn kind(&self) -> ErrorKind
    {
        match self
        {
            ParseError::Source(SourceError::Reader { .. }) => ErrorKind::Reader,
            ParseError::Source(SourceError::Scanner { .. }) => ErrorKind::Scanner,
            _ => ErrorKind::Parser,
        }
    }

    /// Short description of what went wrong
    pub fn problem(&self) -> &str
    {
        use ParseError::*;

        match self
        {
            CorruptStream { .. } => "did not find expected <stream-start>",
            DuplicateVersion { .. } => "found duplicate %YAML directive",
            IncompatibleVersion { .. } => "found incompatible YAML document",
            DuplicateTagDirective { .. } => "found duplicate %TAG directive",
            UndefinedTag { .. } => "found undefined tag handle",
            MissingDocumentStart { .. } => "did not find expected <document start>",
            MissingNode { .. } => "did not find expected node content",
            MissingBlockEntry { .. } => "did not find expected '-' indicator",
            MissingKey { .. } => "did not find expected key",
            MissingFlowSequenceEntryOrEnd { .. } => "did not find expected ',' or ']'",
            MissingFlowMappingEntryOrEnd { .. } => "did not find expected ',' or '}'",
            UnexpectedEOF => "unexpected end of token stream",
            Source(error) => error.problem(),
        }
    }

    /// Position of the offending token, if the error is
    /// positional
    pub fn problem_mark(&self) -> Option<Mark>
    {
        use ParseError::*;

        match *self
        {
            CorruptStream { mark }
            | DuplicateVersion { mark }
            | IncompatibleVersion { mark }
            | DuplicateTagDirective { mark }
            | UndefinedTag { mark, .. }
            | MissingDocumentStart { mark }
            | MissingNode { mark, .. }
            | MissingBlockEntry { mark, .. }
            | MissingKey { mark, .. }
            | MissingFlowSequenceEntryOrEnd { mark, .. }
            | MissingFlowMappingEntryOrEnd { mark, .. } => Some(mark),
            UnexpectedEOF => None,
            Source(ref error) => Some(error.mark()),
        }
    }

    /// Description of the construct enclosing the problem,
    /// for errors raised inside one
    pub fn context(&self) -> Option<&'static str>
    {
        use ParseError::*;

        match self
        {
            UndefinedTag { .. } => Some("while parsing a node"),
            MissingNode { flow: false, .. } => Some("while parsing a block node"),
            MissingNode { flow: true, .. } => Some("while parsing a flow node"),
            MissingBlockEntry { .. } => Some("while parsing a block collection"),
            MissingKey { .. } => Some("while parsing a block mapping"),
            MissingFlowSequenceEntryOrEnd { .. } => Some("while parsing a flow sequence"),
            MissingFlowMappingEntryOrEnd { .. } => Some("while parsing a flow mapping"),
            _ => None,
        }
    }

    /// Position at which the enclosing construct started
    pub fn context_mark(&self) -> Option<Mark>
    {
        use ParseError::*;

        match *self
        {
            UndefinedTag { context_mark, .. }
            | MissingNode { context_mark, .. }
            | MissingBlockEntry { context_mark, .. }
            | MissingKey { context_mark, .. }
            | MissingFlowSequenceEntryOrEnd { context_mark, .. }
            | MissingFlowMappingEntryOrEnd { context_mark, .. } => Some(context_mark),
            _ => None,
        }
    }
}

impl From<SourceError> for ParseError
{
    fn from(e: SourceError) -> Self
    {
        Self::Source(e)
    }
}

impl fmt::Display for ParseError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.problem())?;

        if let Some(mark) = self.problem_mark()
        {
            write!(f, ", at line {} column {}", mark.line, mark.column)?;
        }

        if let (Some(context), Some(mark)) = (self.context(), self.context_mark())
        {
            write!(f, " ({}, at line {} column {})", context, mark.line, mark.column)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)>
    {
        match self
        {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn contextualized_display()
    {
        let error = ParseError::MissingBlockEntry {
            context_mark: Mark::new(0, 0, 0),
            mark:         Mark::new(12, 3, 0),
        };

        assert_eq!(error.kind(), ErrorKind::Parser);
        assert_eq!(
            error.to_string(),
            "did not find expected '-' indicator, at line 3 column 0 \
             (while parsing a block collection, at line 0 column 0)"
        );
    }

    #[test]
    fn source_error_kinds()
    {
        let scanner = ParseError::Source(SourceError::Scanner {
            problem: "found unknown escape character".into(),
            mark:    Mark::new(2, 0, 2),
        });
        let reader = ParseError::Source(SourceError::Reader {
            problem: "invalid UTF-8 byte sequence".into(),
            mark:    Mark::default(),
        });

        assert_eq!(scanner.kind(), ErrorKind::Scanner);
        assert_eq!(reader.kind(), ErrorKind::Reader);
        assert_eq!(scanner.problem(), "found unknown escape character");
        assert_eq!(scanner.problem_mark(), Some(Mark::new(2, 0, 2)));
        assert_eq!(scanner.context(), None);
    }
}
