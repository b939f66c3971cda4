/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! Contains the various types used by [Event]s to represent
//! YAML.

use std::{borrow::Cow, collections::HashMap};

use crate::token::{Mark, ScalarStyle, Slice, StreamEncoding};

/// Tag handle to prefix associations installed for every
/// document, after any user supplied %TAG directives
pub const DEFAULT_TAGS: [(Slice<'static>, Slice<'static>); 2] = [
    (Cow::Borrowed("!"), Cow::Borrowed("!")),
    (Cow::Borrowed("!!"), Cow::Borrowed("tag:yaml.org,2002:")),
];

/// The only %YAML version this parser accepts
pub const SUPPORTED_VERSION: VersionDirective = VersionDirective { major: 1, minor: 1 };

pub const EMPTY_SCALAR: Scalar<'static> = Scalar::empty();

/// Specific YAML productions found in the YAML stream. Each
/// Event has a start and end mark indicating the range
/// represented by the given Event. See [EventData] for all
/// of the possible Event variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'de>
{
    start_mark: Mark,
    end_mark:   Mark,
    inner:      EventData<'de>,
}

impl<'de> Event<'de>
{
    pub fn new(start_mark: Mark, end_mark: Mark, event: EventData<'de>) -> Self
    {
        Self {
            start_mark,
            end_mark,
            inner: event,
        }
    }

    pub fn start(&self) -> Mark
    {
        self.start_mark
    }

    pub fn end(&self) -> Mark
    {
        self.end_mark
    }

    pub fn data(&self) -> &EventData<'de>
    {
        &self.inner
    }

    pub fn data_mut(&mut self) -> &mut EventData<'de>
    {
        &mut self.inner
    }

    pub fn into_data(self) -> EventData<'de>
    {
        self.inner
    }
}

/// The possible variants of an [Event]. See the
/// documentation on each variant for an explanation of what
/// each variant represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData<'de>
{
    /// Beginning of the event stream, always the first
    /// event produced, and only produced once per stream
    StreamStart(StreamStart),
    /// End of events, always the last event produced, and
    /// no more events will be produced after seeing this
    /// event
    StreamEnd,

    /// Start of document content. Any tag resolution or
    /// version specific behavior for the events that follow
    /// should use the attached directives
    DocumentStart(DocumentStart<'de>),
    /// End of document content, followed either by another
    /// DocumentStart, or a StreamEnd event
    DocumentEnd(DocumentEnd),

    /// An alias referring back to a previously seen
    /// `Scalar`, `MappingStart`, or `SequenceStart`
    /// [Node].anchor, the caller must keep track of this
    /// information
    Alias(Alias<'de>),
    /// A scalar leaf node
    Scalar(Node<'de, Scalar<'de>>),

    /// Start of a YAML key value production, followed by
    /// zero or more node or alias events until the matching
    /// `MappingEnd` is reached
    MappingStart(Node<'de, Mapping>),
    /// End of a YAML key value production
    MappingEnd,
    /// Start of a YAML array production, followed by zero
    /// or more node or alias events until the matching
    /// `SequenceEnd` is reached
    SequenceStart(Node<'de, Sequence>),
    /// End of a YAML array production
    SequenceEnd,
}

/// Wrapper around [Event] variants that correspond to a
/// YAML node production -- that is, those that may carry
/// node properties.
///
/// One of:
///
///   `[Scalar, MappingStart, SequenceStart]`
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'de, T: 'de>
{
    /// The anchor applied to this node (if any)
    pub anchor:  Option<Slice<'de>>,
    /// The resolved tag URI of this node (if any); either
    /// the verbatim suffix of a `!<...>` tag, or the
    /// directive prefix joined with the tag's suffix
    pub tag:     Option<Slice<'de>>,
    /// The node's content if simple, or a hint about the
    /// complex structure type
    pub content: T,
    /// Contextual information about this Node
    pub kind:    NodeKind,
}

/// Representation of a YAML scalar node
#[derive(Debug, Clone, PartialEq)]
pub struct Scalar<'de>
{
    pub data:  Slice<'de>,
    pub style: ScalarStyle,

    /// May the scalar be resolved by its content alone?
    /// True only for plain style scalars without a tag, or
    /// any scalar tagged with the non specific tag '!'
    pub plain_implicit:  bool,
    /// True only for non plain scalars without a tag
    pub quoted_implicit: bool,
}

impl Scalar<'static>
{
    pub const fn empty() -> Self
    {
        Self {
            data:            Slice::Borrowed(""),
            style:           ScalarStyle::Plain,
            plain_implicit:  true,
            quoted_implicit: false,
        }
    }
}

/// MappingStart [Event] contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping
{
    pub style:    CollectionStyle,
    /// Was the node written without a tag?
    pub implicit: bool,
}

/// SequenceStart [Event] contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence
{
    pub style:    CollectionStyle,
    /// Was the node written without a tag?
    pub implicit: bool,
}

/// Notation style of a YAML collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionStyle
{
    /// Indentation based, with '-' / 'key:' markers
    Block,
    /// Bracketed, '[ ]' or '{ }'
    Flow,
}

/// Contextual information about a [Node]'s position in the
/// YAML byte stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind
{
    /// Top level [Node] of a YAML document, will only (and
    /// always) be found on the first Node of each document
    Root,

    /// Entry in a YAML sequence
    Entry,

    /// A key in a YAML mapping
    Key,
    /// A value in a YAML mapping
    Value,
}

/// StreamStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct StreamStart
{
    /// Encoding used in the YAML byte stream
    pub encoding: StreamEncoding,
}

/// DocumentStart [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStart<'de>
{
    /// The directives explicitly written in this document's
    /// header
    pub directives: Directives<'de>,
    /// Was this event inferred, rather than present in the
    /// stream as a '---'?
    pub implicit:   bool,
}

/// DocumentEnd [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentEnd
{
    /// Was this event inferred, rather than present in the
    /// stream as a '...'?
    pub implicit: bool,
}

/// Alias [Event] contents
#[derive(Debug, Clone, PartialEq)]
pub struct Alias<'de>
{
    /// Name of the anchor this alias refers to
    pub name: Slice<'de>,
}

/// YAML directives written in a document's header. Only
/// user supplied directives appear here; the defaults the
/// parser resolves against are an implementation detail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Directives<'de>
{
    /// %YAML directive, if one was present
    pub version: Option<VersionDirective>,
    /// %TAG directives, in declaration order
    pub tags:    Vec<(Slice<'de>, Slice<'de>)>,
}

impl<'de> Directives<'de>
{
    pub fn empty() -> Self
    {
        Self::default()
    }
}

/// %YAML directive representation, containing the .major
/// and .minor version of the current document in the YAML
/// stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionDirective
{
    pub major: u8,
    pub minor: u8,
}

/// Map of tag handle to prefix associations active while
/// parsing a document
pub type TagDirectives = HashMap<Slice<'static>, Slice<'static>>;
