/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

pub type Slice<'a> = std::borrow::Cow<'a, str>;

/// A position in the underlying byte stream, copied by
/// value from tokens into events and errors
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Mark
{
    /// Offset into the byte stream
    pub offset: usize,
    /// Line of the stream, starting at 0
    pub line:   usize,
    /// Column of the line, starting at 0
    pub column: usize,
}

impl Mark
{
    pub fn new(offset: usize, line: usize, column: usize) -> Self
    {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// Tokens that may be emitted by a YAML scanner
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a>
{
    /// The stream's start, with the byte (encoding)
    /// [virtual]
    StreamStart(StreamEncoding),
    /// The stream's end [virtual]
    StreamEnd,
    /// The %YAML directive, (major,minor)
    VersionDirective(u8, u8),
    /// The %TAG directive, (handle,prefix)
    TagDirective(Slice<'a>, Slice<'a>),
    /// A ---
    DocumentStart,
    /// A ...
    DocumentEnd,
    /// Indentation increase for a block (sequence)
    BlockSequenceStart,
    /// Indentation increase for a block (map)
    BlockMappingStart,
    /// Indentation decrease for a block
    BlockEnd,
    /// A '['
    FlowSequenceStart,
    /// A ']'
    FlowSequenceEnd,
    /// A '{'
    FlowMappingStart,
    /// A '}'
    FlowMappingEnd,
    /// A '-'
    BlockEntry,
    /// A ','
    FlowEntry,
    /// Either a '?' or nothing
    Key,
    /// A ':'
    Value,
    /// An alias (*anchor)
    Alias(Slice<'a>),
    /// An anchor (&anchor)
    Anchor(Slice<'a>),
    /// A tag (!handle, !suffix)
    Tag(Slice<'a>, Slice<'a>),
    /// A scalar (value, style)
    Scalar(Slice<'a>, ScalarStyle),
}

impl<'a> Token<'a>
{
    /// The fieldless discriminant of this token, used for
    /// lookahead matching without touching any payload
    pub fn marker(&self) -> Marker
    {
        match self
        {
            Token::StreamStart(_) => Marker::StreamStart,
            Token::StreamEnd => Marker::StreamEnd,
            Token::VersionDirective(..) => Marker::VersionDirective,
            Token::TagDirective(..) => Marker::TagDirective,
            Token::DocumentStart => Marker::DocumentStart,
            Token::DocumentEnd => Marker::DocumentEnd,
            Token::BlockSequenceStart => Marker::BlockSequenceStart,
            Token::BlockMappingStart => Marker::BlockMappingStart,
            Token::BlockEnd => Marker::BlockEnd,
            Token::FlowSequenceStart => Marker::FlowSequenceStart,
            Token::FlowSequenceEnd => Marker::FlowSequenceEnd,
            Token::FlowMappingStart => Marker::FlowMappingStart,
            Token::FlowMappingEnd => Marker::FlowMappingEnd,
            Token::BlockEntry => Marker::BlockEntry,
            Token::FlowEntry => Marker::FlowEntry,
            Token::Key => Marker::Key,
            Token::Value => Marker::Value,
            Token::Alias(_) => Marker::Alias,
            Token::Anchor(_) => Marker::Anchor,
            Token::Tag(..) => Marker::Tag,
            Token::Scalar(..) => Marker::Scalar,
        }
    }
}

/// Mirror of [`Token`] without any payloads, one variant
/// per token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker
{
    StreamStart,
    StreamEnd,
    VersionDirective,
    TagDirective,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Alias,
    Anchor,
    Tag,
    Scalar,
}

/// A [`Token`] paired with the marks delimiting its
/// position in the byte stream
#[derive(Debug, Clone, PartialEq)]
pub struct TokenEntry<'de>
{
    pub token: Token<'de>,
    start:     Mark,
    end:       Mark,
}

impl<'de> TokenEntry<'de>
{
    pub fn new(token: Token<'de>, start: Mark, end: Mark) -> Self
    {
        Self { token, start, end }
    }

    pub fn start(&self) -> Mark
    {
        self.start
    }

    pub fn end(&self) -> Mark
    {
        self.end
    }

    pub fn marker(&self) -> Marker
    {
        self.token.marker()
    }

    pub fn into_token(self) -> Token<'de>
    {
        self.token
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamEncoding
{
    UTF8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarStyle
{
    Plain,
    SingleQuote,
    DoubleQuote,
    Literal,
    Folded,
}
