/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

/// Peek the head of the token .stream, returning its start
/// and end marks and a marker representing the underlying
/// Token, in a three item tuple (.start, .end, .marker)
///
/// Modifiers
///     ~  .stream := return .marker
///     @~ .stream := return Option<.marker> (no EOF error)
///
/// Variants
///     /1 .stream
macro_rules! peek {
    ($stream:expr) => {
        $stream
            .peek()
            .map_err($crate::event::error::ParseError::from)
            .and_then(|maybe| maybe.ok_or($crate::event::error::ParseError::UnexpectedEOF))
            .map(|entry| (entry.start(), entry.end(), entry.marker()))
    };
    (~ $stream:expr) => {
        $stream
            .peek()
            .map_err($crate::event::error::ParseError::from)
            .and_then(|maybe| maybe.ok_or($crate::event::error::ParseError::UnexpectedEOF))
            .map(|entry| entry.marker())
    };
    (@ ~ $stream:expr) => {
        $stream
            .peek()
            .map_err($crate::event::error::ParseError::from)
            .map(|maybe| maybe.map(|entry| entry.marker()))
    };
}

/// Pop the head of the token .stream, returning the entry,
/// or an error if the stream was empty. Typically used in
/// combination with peek!
///
/// Variants
///     /1 .stream
macro_rules! pop {
    ($stream:expr) => {
        $stream
            .pop()
            .map_err($crate::event::error::ParseError::from)
            .and_then(|maybe| maybe.ok_or($crate::event::error::ParseError::UnexpectedEOF))
    };
}

/// ```text
/// Drive the .parser's state machine. Exactly three
/// transitions exist, mirroring how YAML productions nest:
///
///     state!(~parser, -> .state)  activate .state in place of the
///                                 current production
///     state!(~parser, >> .state)  defer .state until the child
///                                 production about to start completes
///     state!(~parser, <<)         finish the current production,
///                                 resuming the last deferred state
///
/// The -> and >> forms may be chained in one invocation,
/// e.g opening a document defers DocumentEnd and activates
/// the content state in a single call.
/// ```
macro_rules! state {
    (~$parser:expr, <<) => {
        $parser.state.resume()
    };
    (~$parser:expr, $( $op:tt $state:expr ),+) => {
        $( state!(@one $parser.state, $op $state); )+
    };

    (@one $machine:expr, -> $state:expr) => {
        $machine.transition($state)
    };
    (@one $machine:expr, >> $state:expr) => {
        $machine.defer($state)
    };
}

/// ```text
/// Consume an entry of $kind from the token .stream,
/// returning its (start, end, payload), or an error. Note
/// that the exact nature of the payload varies by kind.
///
/// Variants
///     /1 .stream, $kind
///
///     $kind :=
///         | StreamStart
///         | StreamEnd
///         | VersionDirective
///         | TagDirective
///         | Alias
///         | Anchor
///         | Tag
///         | Scalar
/// ```
macro_rules! consume {
    ($stream:expr, $kind:tt) => {{
        #[allow(unused_imports)]
        use $crate::{event::types::VersionDirective, token::Token::*};

        pop!($stream).map(|entry| {
            let start = entry.start();
            let end = entry.end();

            consume!(@entry $kind => start, end, entry.into_token())
        })
    }};

    (@entry StreamStart => $start:expr, $end:expr, $token:expr) => {
        match $token {
            StreamStart(encoding) => ($start, $end, encoding),
            _ => unreachable!(),
        }
    };
    (@entry StreamEnd => $start:expr, $end:expr, $token:expr) => {
        match $token {
            StreamEnd => ($start, $end, ()),
            _ => unreachable!(),
        }
    };
    (@entry VersionDirective => $start:expr, $end:expr, $token:expr) => {
        match $token {
            VersionDirective(major, minor) => ($start, $end, VersionDirective { major, minor }),
            _ => unreachable!(),
        }
    };
    (@entry TagDirective => $start:expr, $end:expr, $token:expr) => {
        match $token {
            TagDirective(handle, prefix) => ($start, $end, (handle, prefix)),
            _ => unreachable!(),
        }
    };
    (@entry Alias => $start:expr, $end:expr, $token:expr) => {
        match $token {
            Alias(name) => ($start, $end, name),
            _ => unreachable!(),
        }
    };
    (@entry Anchor => $start:expr, $end:expr, $token:expr) => {
        match $token {
            Anchor(name) => ($start, $end, name),
            _ => unreachable!(),
        }
    };
    (@entry Tag => $start:expr, $end:expr, $token:expr) => {
        match $token {
            Tag(handle, suffix) => ($start, $end, (handle, suffix)),
            _ => unreachable!(),
        }
    };
    (@entry Scalar => $start:expr, $end:expr, $token:expr) => {
        match $token {
            Scalar(data, style) => ($start, $end, (data, style)),
            _ => unreachable!(),
        }
    };
}

/// ```text
/// Generate a new event of $kind from the given .context,
/// or consume it from the provided token .stream.
///
/// Variants
///     /1 @event $kind => .context
///     /2 @consume $kind => .stream
///
///     $kind :=
///         | StreamStart
///         | StreamEnd
///         | DocumentStart
///         | DocumentEnd
///         | Alias
///         | Scalar
///         | BlockSequenceStart
///         | BlockMappingStart
///         | FlowSequenceStart
///         | FlowMappingStart
///         | SequenceEnd
///         | MappingEnd
/// ```
macro_rules! initEvent {
    (@consume $kind:tt => $stream:expr) => {{
        consume!($stream, $kind).map(|context| initEvent!(@event $kind => context))
    }};

    (@event StreamStart => $context:expr) => {{
        let (start, end, encoding) = $context;

        Event::new(start, end, EventData::StreamStart(types::StreamStart { encoding }))
    }};
    (@event StreamEnd => $context:expr) => {{
        let (start, end, ()) = $context;

        Event::new(start, end, EventData::StreamEnd)
    }};
    (@event DocumentStart => $context:expr) => {{
        let (start, end, (directives, implicit)) = $context;

        Event::new(
            start,
            end,
            EventData::DocumentStart(types::DocumentStart { directives, implicit }),
        )
    }};
    (@event DocumentEnd => $context:expr) => {{
        let (start, end, implicit) = $context;

        Event::new(start, end, EventData::DocumentEnd(types::DocumentEnd { implicit }))
    }};
    (@event SequenceEnd => $context:expr) => {{
        let (start, end, _) = $context;

        Event::new(start, end, EventData::SequenceEnd)
    }};
    (@event MappingEnd => $context:expr) => {{
        let (start, end, _) = $context;

        Event::new(start, end, EventData::MappingEnd)
    }};
    (@event Alias => $context:expr) => {{
        let (start, end, name) = $context;

        Event::new(start, end, EventData::Alias(types::Alias { name }))
    }};
    (@event BlockSequenceStart => $context:expr) => {
        initEvent!(@collection SequenceStart, Sequence, Block => $context)
    };
    (@event FlowSequenceStart => $context:expr) => {
        initEvent!(@collection SequenceStart, Sequence, Flow => $context)
    };
    (@event BlockMappingStart => $context:expr) => {
        initEvent!(@collection MappingStart, Mapping, Block => $context)
    };
    (@event FlowMappingStart => $context:expr) => {
        initEvent!(@collection MappingStart, Mapping, Flow => $context)
    };
    (@event Scalar => $context:expr) => {{
        let (start, end, (anchor, tag, kind, content)) = $context;

        Event::new(start, end, EventData::Scalar(types::Node { anchor, tag, content, kind }))
    }};

    (@collection $variant:tt, $content:tt, $style:tt => $context:expr) => {{
        let (start, end, (anchor, tag, implicit, kind)) = $context;
        let content = types::$content {
            style: types::CollectionStyle::$style,
            implicit,
        };

        Event::new(
            start,
            end,
            EventData::$variant(types::Node { anchor, tag, content, kind }),
        )
    }};
}
