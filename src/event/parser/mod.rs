/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module exposes the [`Parser`] struct and related
//! types. The Parser takes a sequence of [`Token`]s
//! produced by a [`Scan`] source, and converts them into a
//! series of [`Event`]s. These events are the core of
//! higher level functionality exposed by this library.
//!
//! ## Invoking the Parser
//!
//! Each [`Parser`] must be passed a [`TokenStream`]. Once
//! passed to a [`Parser`], _it is a logic error to pass
//! that TokenStream to a different [`Parser`]_. The outcome
//! is not specified, but will likely either be garbage or
//! an error.
//!
//! [`next_event`](Parser#method.next_event) returns the
//! next [`Event`], or None once the stream end has been
//! produced. Errors are sticky: the first failure is
//! latched and every subsequent call returns it again.
//!
//! [`Token`]: enum@crate::token::Token
//! [`Scan`]: trait@crate::source::Scan

use crate::{
    event::{
        error::{ParseError as Error, ParseResult as Result},
        state::{Flags, State, StateMachine, O_EMPTY, O_FIRST, O_IMPLICIT, O_NIL},
        types::{
            self, Directives, Event, EventData, NodeKind, Scalar, TagDirectives, DEFAULT_TAGS,
            EMPTY_SCALAR, SUPPORTED_VERSION,
        },
    },
    source::{Scan, TokenStream},
    token::{Mark, Marker, ScalarStyle, Slice},
};

#[macro_use]
mod macros;

type Tokens<'de, S> = TokenStream<'de, S>;

/// The [`Parser`] provides an API for translating any
/// [`Token`] stream into higher level [`Event`]s.
///
/// A Parser iteratively consumes an entire [`Token`]
/// stream, ending when `Token::StreamEnd` is found, after
/// which the Parser considers the stream finished and
/// always returns None.
///
/// [`Token`]: enum@crate::token::Token
#[derive(Debug, Clone)]
pub struct Parser
{
    state: StateMachine,

    /// Start marks of the currently open collections,
    /// pushed and popped in step with the state stack
    marks:          Vec<Mark>,
    /// Tag handle resolution table for the current
    /// document, reset at every document boundary
    tag_directives: TagDirectives,

    done:  bool,
    error: Option<Error>,
}

impl Parser
{
    /// Instantiate a new [`Parser`], ready for a new token
    /// stream.
    pub fn new() -> Self
    {
        Self {
            state:          StateMachine::default(),
            marks:          Vec::new(),
            tag_directives: TagDirectives::default(),
            done:           false,
            error:          None,
        }
    }

    /// Fetch the next [`Event`] from the provided .tokens
    /// stream.
    ///
    /// Note that once you call this method, the associated
    /// .tokens is "bound" to this [`Parser`], and should
    /// not be provided to anything else which modifies the
    /// stream, including a different [`Parser`].
    pub fn next_event<'de, S>(&mut self, tokens: &mut Tokens<'de, S>) -> Option<Result<Event<'de>>>
    where
        S: Scan<'de>,
    {
        self.get_next_event(tokens).transpose()
    }

    /// Has the stream end event been produced?
    pub fn is_done(&self) -> bool
    {
        self.done
    }

    /// The latched error, if any call has failed
    pub fn error(&self) -> Option<&Error>
    {
        self.error.as_ref()
    }

    /// Runs the state machine until it either provides the
    /// next [`Event`], an error, or the state machine is
    /// finished
    fn get_next_event<'de, S>(&mut self, tokens: &mut Tokens<'de, S>) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        // The first error wins, and is sticky
        if let Some(error) = &self.error
        {
            return Err(error.clone());
        }

        let mut event = None;

        // Main loop, continue until an event is produced, an error
        // is returned or we're marked as finished.
        while !self.done && event.is_none()
        {
            match self.state_transition(tokens)
            {
                Ok(produced) => event = produced,
                Err(error) =>
                {
                    self.error = Some(error.clone());

                    return Err(error);
                },
            }
        }

        Ok(event)
    }

    /// Process the next event in the state machine, running
    /// the associated routine
    fn state_transition<'de, S>(&mut self, tokens: &mut Tokens<'de, S>)
        -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        match *self.state.current()
        {
            State::StreamStart => self.stream_start(tokens),
            State::DocumentStart(opts) => self.document_start(tokens, opts),
            State::DocumentContent => self.document_content(tokens),
            State::DocumentEnd => self.document_end(tokens),

            State::BlockNode => self.node(tokens, BLOCK_CONTEXT, !INDENTLESS, NodeKind::Root),
            State::BlockNodeOrIndentlessSequence =>
            {
                self.node(tokens, BLOCK_CONTEXT, INDENTLESS, NodeKind::Root)
            },
            State::FlowNode => self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, NodeKind::Root),

            State::BlockSequenceEntry(opts) => self.block_sequence_entry(tokens, opts),
            State::IndentlessSequenceEntry => self.indentless_sequence_entry(tokens),
            State::BlockMappingKey(opts) => self.block_mapping_key(tokens, opts),
            State::BlockMappingValue => self.block_mapping_value(tokens),

            State::FlowSequenceEntry(opts) => self.flow_sequence_entry(tokens, opts),
            State::FlowSequenceMappingKey => self.flow_sequence_entry_mapping_key(tokens),
            State::FlowSequenceMappingValue => self.flow_sequence_entry_mapping_value(tokens),
            State::FlowSequenceMappingEnd => self.flow_sequence_entry_mapping_end(tokens),
            State::FlowMappingKey(opts) => self.flow_mapping_key(tokens, opts),
            State::FlowMappingValue(opts) => self.flow_mapping_value(tokens, opts),

            // State machine terminus, no more events will be produced by this parser
            State::StreamEnd => self.stream_end(tokens),
        }
    }

    /// Start of token stream, ensure the underlying token
    /// stream hasn't been tampered with, and return the
    /// associated Event
    fn stream_start<'de, S>(&mut self, tokens: &mut Tokens<'de, S>) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let (mark, _, token) = peek!(tokens)?;

        let event = match token
        {
            Marker::StreamStart => initEvent!(@consume StreamStart => tokens),
            _ => Err(Error::CorruptStream { mark }),
        }?;

        state!(~self, -> State::DocumentStart(O_IMPLICIT));

        Ok(Some(event))
    }

    /// End of token stream, set ourself to done and produce
    /// the associated Event, if we haven't already
    fn stream_end<'de, S>(&mut self, tokens: &mut Tokens<'de, S>) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        if self.done
        {
            return Ok(None);
        }

        let event = initEvent!(@consume StreamEnd => tokens)?;

        self.done = true;
        debug_assert!(self.state.is_done());

        Ok(Some(event))
    }

    /// Start of a new document, process any directives,
    /// determine if it's explicit and prime the state
    /// machine accordingly, returning the associated
    /// Event if appropriate
    fn document_start<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let implicit = opts.contains(O_IMPLICIT);

        // If the document cannot be implicit we need to skip any
        // extra DocumentEnd tokens ('...')
        if !implicit
        {
            while peek!(~tokens)? == Marker::DocumentEnd
            {
                pop!(tokens)?;
            }
        }

        let (start, end, token) = peek!(tokens)?;
        let header = matches!(
            token,
            Marker::VersionDirective
                | Marker::TagDirective
                | Marker::DocumentStart
                | Marker::StreamEnd
        );

        let event;

        // Header-less document, install the default directives and
        // head straight into the root node
        if implicit && !header
        {
            self.process_directives(tokens)?;

            // Defer the document close, activate the root node
            state!(~self, >> State::DocumentEnd, -> State::BlockNode);

            event = initEvent!(@event DocumentStart => (start, end, (Directives::empty(), true)));
        }
        // Explicit document, maybe with directives
        else if !matches!(token, Marker::StreamEnd)
        {
            let directives = self.process_directives(tokens)?;

            // The header must be closed out by an explicit
            // DocumentStart indicator
            let end = match peek!(tokens)?
            {
                (_, end, Marker::DocumentStart) =>
                {
                    pop!(tokens)?;

                    end
                },
                (mark, _, _) => return Err(Error::MissingDocumentStart { mark }),
            };

            // Defer the document close, activate the document's
            // content state
            state!(~self, >> State::DocumentEnd, -> State::DocumentContent);

            event = initEvent!(@event DocumentStart => (start, end, (directives, false)));
        }
        // Nothing left in the stream, transition the state machine
        // to its final state
        else
        {
            state!(~self, -> State::StreamEnd);

            return self.stream_end(tokens);
        }

        Ok(Some(event))
    }

    /// End of document, determine if its explicit, and
    /// return the associated Event
    fn document_end<'de, S>(&mut self, tokens: &mut Tokens<'de, S>) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let (start, mut end, token) = peek!(tokens)?;
        let mut implicit = true;

        if matches!(token, Marker::DocumentEnd)
        {
            pop!(tokens)?;

            implicit = false;
        }
        else
        {
            // If the token isn't a DocumentEnd, then this Event is
            // "virtual" and has no real length
            end = start;
        }

        // Tag directives do not cross document boundaries
        self.tag_directives.clear();

        state!(~self, -> State::DocumentStart(O_NIL));

        Ok(Some(initEvent!(@event DocumentEnd => (start, end, implicit))))
    }

    /// Handle an explicit, maybe empty document, returning
    /// the root node [`Event`], or an empty scalar if the
    /// document has no content
    fn document_content<'de, S>(&mut self, tokens: &mut Tokens<'de, S>)
        -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let (start, _, token) = peek!(tokens)?;

        // Check if the next token indicates an empty document
        let empty = matches!(
            token,
            Marker::VersionDirective
                | Marker::TagDirective
                | Marker::DocumentStart
                | Marker::DocumentEnd
                | Marker::StreamEnd
        );

        // An empty document still has a node, namely the empty
        // scalar; the token stays with the enclosing production
        if empty
        {
            state!(~self, <<);

            self.empty_scalar(start, NodeKind::Root).map(Some)
        }
        // Otherwise, process the document's node graph
        else
        {
            self.node(tokens, BLOCK_CONTEXT, !INDENTLESS, NodeKind::Root)
        }
    }

    /// Block context sequence entry, return the associated
    /// node or sequence end [`Event`]
    fn block_sequence_entry<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Entry;

        // Handle the sequence start if this is the first entry,
        // saving the opening mark for error context
        if opts.contains(O_FIRST)
        {
            let entry = pop!(tokens)?;

            debug_assert!(matches!(entry.marker(), Marker::BlockSequenceStart));

            self.marks.push(entry.start());
        }

        let (start, end, token) = peek!(tokens)?;

        match token
        {
            // Sequence entry
            Marker::BlockEntry =>
            {
                pop!(tokens)?;

                match peek!(~tokens)?
                {
                    /*
                     * Handles productions with empty implicit nodes, e.g
                     *
                     *  sequence:
                     *    -
                     *  # ^------- Entry (-) implies content exists
                     *    - 1
                     *    - N...
                     */
                    Marker::BlockEntry | Marker::BlockEnd =>
                    {
                        state!(~self, -> State::BlockSequenceEntry(O_NIL));

                        self.empty_scalar(end, kind).map(Some)
                    },
                    // Otherwise send it on to the YAML Node handler, saving our state to the stack
                    _ =>
                    {
                        state!(~self, >> State::BlockSequenceEntry(O_NIL));

                        self.node(tokens, BLOCK_CONTEXT, !INDENTLESS, kind)
                    },
                }
            },
            // End of sequence, produce the SequenceEnd event
            Marker::BlockEnd =>
            {
                pop!(tokens)?;
                state!(~self, <<);
                self.marks.pop();

                Ok(Some(initEvent!(@event SequenceEnd => (start, end, ()))))
            },
            // Otherwise the YAML stream is invalid
            _ =>
            {
                let context_mark = self.marks.pop().unwrap_or(start);

                Err(Error::MissingBlockEntry { context_mark, mark: start })
            },
        }
    }

    /// Entries of a block sequence written at the
    /// indentation of its parent mapping; terminated by the
    /// first token that isn't part of the sequence, which
    /// is left for the enclosing production
    fn indentless_sequence_entry<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Entry;
        let (start, end, token) = peek!(tokens)?;

        match token
        {
            Marker::BlockEntry =>
            {
                pop!(tokens)?;

                match peek!(~tokens)?
                {
                    Marker::BlockEntry | Marker::Key | Marker::Value | Marker::BlockEnd =>
                    {
                        state!(~self, -> State::IndentlessSequenceEntry);

                        self.empty_scalar(end, kind).map(Some)
                    },
                    _ =>
                    {
                        state!(~self, >> State::IndentlessSequenceEntry);

                        self.node(tokens, BLOCK_CONTEXT, !INDENTLESS, kind)
                    },
                }
            },
            // The sequence is over, but the token belongs to the
            // enclosing production
            _ =>
            {
                state!(~self, <<);

                Ok(Some(initEvent!(@event SequenceEnd => (start, start, ()))))
            },
        }
    }

    /// Block context mapping key, return the appropriate
    /// node or mapping end [`Event`], pushing a mapping
    /// value state to the stack in the former case
    fn block_mapping_key<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Key;

        // If we're starting a new mapping we need to skip the
        // opening token, saving its mark for error context
        if opts.contains(O_FIRST)
        {
            let entry = pop!(tokens)?;

            debug_assert!(matches!(entry.marker(), Marker::BlockMappingStart));

            self.marks.push(entry.start());
        }

        let (start, end, token) = peek!(tokens)?;

        match token
        {
            // Found the start of a mapping KV set
            Marker::Key =>
            {
                pop!(tokens)?;

                match peek!(~tokens)?
                {
                    // An implied empty key
                    Marker::Key | Marker::Value | Marker::BlockEnd =>
                    {
                        state!(~self, -> State::BlockMappingValue);

                        self.empty_scalar(end, kind).map(Some)
                    },
                    // Any other token is either a possible Node sequence, or
                    // an error which node() will catch
                    _ =>
                    {
                        state!(~self, >> State::BlockMappingValue);

                        self.node(tokens, BLOCK_CONTEXT, INDENTLESS, kind)
                    },
                }
            },
            // End of this mapping, pop the state stack
            Marker::BlockEnd =>
            {
                pop!(tokens)?;
                state!(~self, <<);
                self.marks.pop();

                Ok(Some(initEvent!(@event MappingEnd => (start, end, ()))))
            },
            // Otherwise its an error
            _ =>
            {
                let context_mark = self.marks.pop().unwrap_or(start);

                Err(Error::MissingKey { context_mark, mark: start })
            },
        }
    }

    /// Block context mapping value, return the appropriate
    /// node or an empty scalar, pushing a mapping key state
    /// to the stack in the former case
    fn block_mapping_value<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Value;
        let (start, end, token) = peek!(tokens)?;

        match token
        {
            // Found a value in a KV mapping set
            Marker::Value =>
            {
                pop!(tokens)?;

                match peek!(~tokens)?
                {
                    // An implied empty value
                    Marker::Key | Marker::Value | Marker::BlockEnd =>
                    {
                        state!(~self, -> State::BlockMappingKey(O_NIL));

                        self.empty_scalar(end, kind).map(Some)
                    },
                    // Note a mapping value may be an indentless sequence
                    _ =>
                    {
                        state!(~self, >> State::BlockMappingKey(O_NIL));

                        self.node(tokens, BLOCK_CONTEXT, INDENTLESS, kind)
                    },
                }
            },
            // Because we are processing a KV value here, we have already processed a KV key, and
            // therefore a value is automatically implied, regardless of what token follows.
            _ =>
            {
                state!(~self, -> State::BlockMappingKey(O_NIL));

                self.empty_scalar(start, kind).map(Some)
            },
        }
    }

    /// Flow context sequence entry, return the associated
    /// node or sequence end [`Event`]
    fn flow_sequence_entry<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Entry;
        let first = opts.contains(O_FIRST);

        // If this is the first entry, we need to skip the
        // SequenceStart token, saving its mark for error context
        if first
        {
            let entry = pop!(tokens)?;

            debug_assert!(matches!(entry.marker(), Marker::FlowSequenceStart));

            self.marks.push(entry.start());
        }

        let (start, end, token) = peek!(tokens)?;

        if matches!(token, Marker::FlowSequenceEnd)
        {
            return self.flow_sequence_end(tokens, start, end).map(Some);
        }

        /*
         * If its not the first entry, there *must* be a
         * FlowEntry indicator (',') e.g:
         *
         * [ one, two, three]
         *  ^   ^    ^
         *  |   But the rest must have an entry
         *  Okay to skip the first ','
         */
        if !first
        {
            match token
            {
                Marker::FlowEntry => pop!(tokens).map(drop)?,
                _ =>
                {
                    let context_mark = self.marks.pop().unwrap_or(start);

                    return Err(Error::MissingFlowSequenceEntryOrEnd { context_mark, mark: start });
                },
            }
        }

        // Refresh our token view
        let (start, end, token) = peek!(tokens)?;

        match token
        {
            /*
             * Start of a "compact" flow context mapping
             *
             * Note here, we *haven't* seen a FlowMappingStart, we've seen a Key...
             * That is, we're looking at a production that looks like this:
             *
             *  [  key: value ,  entryN... ]
             *    ^----------^ Note the lack of '{' '}'s
             *
             *  This is, in YAML's opinion, completely fine and *only* supports this
             *  exact scenario, e.g inside a flow sequence with exactly 1 KV pair.
             */
            Marker::Key =>
            {
                pop!(tokens)?;

                state!(~self, -> State::FlowSequenceMappingKey);

                let event = initEvent!(
                    @event FlowMappingStart => (start, end, (NO_ANCHOR, NO_TAG, true, kind))
                );

                Ok(Some(event))
            },
            // End of the sequence after a trailing ','
            Marker::FlowSequenceEnd => self.flow_sequence_end(tokens, start, end).map(Some),
            // If its not a mapping, or a sequence end, then it must be a node
            _ =>
            {
                // Save our sequence state to the stack
                state!(~self, >> State::FlowSequenceEntry(O_NIL));

                self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind)
            },
        }
    }

    /// Flow mapping key with parent flow sequence, return
    /// the associated node [`Event`] and prep the tight
    /// state loop for flow_sequence->flow_mapping token
    /// sequences
    fn flow_sequence_entry_mapping_key<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Key;
        let (_, end, token) = peek!(tokens)?;

        match token
        {
            /*
             * If the token is one of these, then we must add an
             * empty key as one is implied by the stream,
             * e.g:
             *
             * [  : a value, ]
             *   ^ key is implied here
             */
            Marker::Value | Marker::FlowEntry | Marker::FlowSequenceEnd =>
            {
                pop!(tokens)?;

                state!(~self, -> State::FlowSequenceMappingValue);

                self.empty_scalar(end, kind).map(Some)
            },
            // Not empty, save our state to the stack, and forward to
            // node()
            _ =>
            {
                state!(~self, >> State::FlowSequenceMappingValue);

                self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind)
            },
        }
    }

    /// Flow mapping value with parent flow sequence, return
    /// the associated node [`Event`] and prep the
    /// FlowSequenceMappingEnd state.
    ///
    /// Note it is an invariant of this function that it
    /// must *always* activate the above state -- excluding
    /// in error cases.
    fn flow_sequence_entry_mapping_value<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Value;
        let (start, _, token) = peek!(tokens)?;

        // If we find a value token, and *do not* find evidence of
        // an implied token, save our state to the stack and forward
        // to node()
        if matches!(token, Marker::Value)
        {
            pop!(tokens)?;

            let (start, _, token) = peek!(tokens)?;

            if !matches!(token, Marker::FlowEntry | Marker::FlowSequenceEnd)
            {
                state!(~self, >> State::FlowSequenceMappingEnd);

                return self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind);
            }

            state!(~self, -> State::FlowSequenceMappingEnd);

            return self.empty_scalar(start, kind).map(Some);
        }

        // Otherwise it must be an empty, implied value
        state!(~self, -> State::FlowSequenceMappingEnd);

        self.empty_scalar(start, kind).map(Some)
    }

    /// Clean up after a flow_sequence->flow_mapping state
    /// loop, returning the appropriate mapping end
    /// [`Event`]
    fn flow_sequence_entry_mapping_end<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let (start, _, _) = peek!(tokens)?;

        // Revert to parsing the next entry in the parent sequence
        state!(~self, -> State::FlowSequenceEntry(O_NIL));

        Ok(Some(initEvent!(@event MappingEnd => (start, start, ()))))
    }

    /// Flow context mapping key, return the appropriate
    /// node or mapping end [`Event`], pushing a mapping
    /// value state to the stack in the former case
    fn flow_mapping_key<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Key;
        let first = opts.contains(O_FIRST);

        // If this is the first entry, we need to skip the
        // MappingStart token, saving its mark for error context
        if first
        {
            let entry = pop!(tokens)?;

            debug_assert!(matches!(entry.marker(), Marker::FlowMappingStart));

            self.marks.push(entry.start());
        }

        let (start, end, token) = peek!(tokens)?;

        if matches!(token, Marker::FlowMappingEnd)
        {
            return self.flow_mapping_end(tokens, start, end).map(Some);
        }

        /*
         * If its not the first entry, there *must* be a
         * FlowEntry indicator (',') e.g:
         *
         * { key: value, another: key }
         *  ^          ^
         *  |          But the rest must have an entry
         *  Okay to skip the first ','
         */
        if !first
        {
            match token
            {
                Marker::FlowEntry => pop!(tokens).map(drop)?,
                _ =>
                {
                    let context_mark = self.marks.pop().unwrap_or(start);

                    return Err(Error::MissingFlowMappingEntryOrEnd { context_mark, mark: start });
                },
            }
        }

        let (start, end, token) = peek!(tokens)?;

        match token
        {
            // Definitely have a key, determine what kind
            Marker::Key =>
            {
                pop!(tokens)?;

                let (start, _, token) = peek!(tokens)?;

                match token
                {
                    /*
                     * If the token is one of these, then we must add an
                     * empty key as one is implied by the stream,
                     * e.g:
                     *
                     * { : a value, another: value }
                     *  ^ key is implied here
                     */
                    Marker::Value | Marker::FlowEntry | Marker::FlowMappingEnd =>
                    {
                        state!(~self, -> State::FlowMappingValue(O_NIL));

                        self.empty_scalar(start, kind).map(Some)
                    },
                    // Not empty, push state to stack and forward to node()
                    _ =>
                    {
                        state!(~self, >> State::FlowMappingValue(O_NIL));

                        self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind)
                    },
                }
            },
            // Mapping end after a trailing ','
            Marker::FlowMappingEnd => self.flow_mapping_end(tokens, start, end).map(Some),
            /*
             * Here we catch a strange edge case in (flow context) YAML:
             *
             * { hello }
             *        ^ Note the complete lack of *both* entry and value
             *          indicators.
             *
             *  YAML allows this, translated to:
             *
             *  { hello: "" }
             *
             *  as the value is "implied" by the lack of an entry (',')
             *  delimiter and the closing brace.
             */
            _ =>
            {
                // Set the value state handler to return an empty scalar and
                // return control to this handler
                state!(~self, >> State::FlowMappingValue(O_EMPTY));

                self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind)
            },
        }
    }

    /// Flow context mapping value, return the appropriate
    /// node or an empty scalar [`Event`]
    fn flow_mapping_value<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        opts: Flags,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let kind = NodeKind::Value;
        let (start, _, token) = peek!(tokens)?;

        // If we're handling the edge case empty value, just return
        // it
        if opts.contains(O_EMPTY)
        {
            state!(~self, -> State::FlowMappingKey(O_NIL));

            return self.empty_scalar(start, kind).map(Some);
        }

        // Got an actual value
        if matches!(token, Marker::Value)
        {
            pop!(tokens)?;

            let (start, _, token) = peek!(tokens)?;

            /*
             * Check that the value is real not implied, e.g:
             *
             * { key: } or {key: , another: key }
             *       ^          ^
             *       Implied values
             */
            if !matches!(token, Marker::FlowEntry | Marker::FlowMappingEnd)
            {
                state!(~self, >> State::FlowMappingKey(O_NIL));

                return self.node(tokens, !BLOCK_CONTEXT, !INDENTLESS, kind);
            }

            state!(~self, -> State::FlowMappingKey(O_NIL));

            return self.empty_scalar(start, kind).map(Some);
        }

        state!(~self, -> State::FlowMappingKey(O_NIL));

        self.empty_scalar(start, kind).map(Some)
    }

    /// Produce a node or alias [`Event`], reading any
    /// node properties (anchor and/or tag, in either
    /// order) and resolving the tag against the active
    /// directive table
    fn node<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        block: bool,
        indentless: bool,
        kind: NodeKind,
    ) -> Result<Option<Event<'de>>>
    where
        S: Scan<'de>,
    {
        let (start, mut end, token) = peek!(tokens)?;

        // If the node is an alias, return it
        if matches!(token, Marker::Alias)
        {
            state!(~self, <<);

            let event = initEvent!(@consume Alias => tokens)?;

            return Ok(Some(event));
        }

        let mut anchor = None;
        let mut tag_token = None;
        let mut tag_mark = start;

        // Look for any anchor or tag in the token stream
        //
        // Note that the fetch_* functions used below will not error
        // out if we've hit the end of token stream, unlike most
        // Parser functions
        match token
        {
            Marker::Anchor =>
            {
                anchor = fetch_anchor(tokens, &mut end)?;
                tag_token = fetch_tag(tokens, &mut tag_mark, &mut end)?;
            },
            Marker::Tag =>
            {
                tag_token = fetch_tag(tokens, &mut tag_mark, &mut end)?;
                anchor = fetch_anchor(tokens, &mut end)?;
            },
            _ =>
            {},
        }

        let tag = self.resolve_tag(tag_token, start, tag_mark)?;
        // Collections are implicit when the resolved tag is empty,
        // which an empty verbatim tag (!<>) also satisfies
        let implicit = tag.as_deref().map_or(true, str::is_empty);

        // Refresh our current token view
        let (token_start, token_end, token) = peek!(tokens)?;

        // Handle possible node variants
        let event = match token
        {
            // An indentless sequence starts at its first '-', which
            // stays with the sequence entry handler
            Marker::BlockEntry if indentless =>
            {
                state!(~self, -> State::IndentlessSequenceEntry);

                initEvent!(@event BlockSequenceStart => (start, token_end, (anchor, tag, implicit, kind)))
            },
            // Non empty scalar
            Marker::Scalar =>
            {
                let (_, scalar_end, (data, style)) = consume!(tokens, Scalar)?;

                let plain_implicit = (style == ScalarStyle::Plain && tag.is_none())
                    || tag.as_deref() == Some("!");
                let quoted_implicit = style != ScalarStyle::Plain && tag.is_none();

                let content = Scalar {
                    data,
                    style,
                    plain_implicit,
                    quoted_implicit,
                };

                state!(~self, <<);

                initEvent!(@event Scalar => (start, scalar_end, (anchor, tag, kind, content)))
            },
            // Start of sequence (flow)
            Marker::FlowSequenceStart =>
            {
                state!(~self, -> State::FlowSequenceEntry(O_FIRST));

                initEvent!(@event FlowSequenceStart => (start, token_end, (anchor, tag, implicit, kind)))
            },
            // Start of mapping (flow)
            Marker::FlowMappingStart =>
            {
                state!(~self, -> State::FlowMappingKey(O_FIRST));

                initEvent!(@event FlowMappingStart => (start, token_end, (anchor, tag, implicit, kind)))
            },
            // Start of sequence (block)
            Marker::BlockSequenceStart if block =>
            {
                state!(~self, -> State::BlockSequenceEntry(O_FIRST));

                initEvent!(@event BlockSequenceStart => (start, token_end, (anchor, tag, implicit, kind)))
            },
            // Start of mapping (block)
            Marker::BlockMappingStart if block =>
            {
                state!(~self, -> State::BlockMappingKey(O_FIRST));

                initEvent!(@event BlockMappingStart => (start, token_end, (anchor, tag, implicit, kind)))
            },
            // Implicit, empty scalar; a node with properties but no
            // content
            _ if anchor.is_some() || tag.is_some() =>
            {
                // Note we do not consume the unknown token here

                let content = Scalar {
                    data:            Slice::from(""),
                    style:           ScalarStyle::Plain,
                    plain_implicit:  implicit,
                    quoted_implicit: false,
                };

                state!(~self, <<);

                initEvent!(@event Scalar => (start, end, (anchor, tag, kind, content)))
            },
            // Otherwise its an error
            _ =>
            {
                return Err(Error::MissingNode {
                    flow:         !block,
                    context_mark: start,
                    mark:         token_start,
                })
            },
        };

        Ok(Some(event))
    }

    /// Resolve a tag token against the active directive
    /// table, producing the node's tag URI
    fn resolve_tag<'de>(
        &self,
        tag: Option<(Slice<'de>, Slice<'de>)>,
        node_mark: Mark,
        tag_mark: Mark,
    ) -> Result<Option<Slice<'de>>>
    {
        let (handle, suffix) = match tag
        {
            Some(tag) => tag,
            None => return Ok(None),
        };

        // A verbatim tag (!<...>) has no handle to resolve
        if handle.is_empty()
        {
            return Ok(Some(suffix));
        }

        match self.tag_directives.get(&*handle)
        {
            Some(prefix) => Ok(Some(Slice::from(format!("{}{}", prefix, suffix)))),
            None => Err(Error::UndefinedTag {
                context_mark: node_mark,
                mark:         tag_mark,
            }),
        }
    }

    /// Fetch all adjacent YAML directives from the stream,
    /// installing them (and the defaults) into the active
    /// directive table, returning the user supplied set for
    /// the document start event
    fn process_directives<'de, S>(&mut self, tokens: &mut Tokens<'de, S>)
        -> Result<Directives<'de>>
    where
        S: Scan<'de>,
    {
        let mut directives = Directives::empty();

        loop
        {
            let (mark, _, token) = peek!(tokens)?;

            match token
            {
                Marker::VersionDirective =>
                {
                    // At most one %YAML directive per document
                    if directives.version.is_some()
                    {
                        return Err(Error::DuplicateVersion { mark });
                    }

                    let (_, _, version) = consume!(tokens, VersionDirective)?;

                    // This is a YAML 1.1 parser, nothing else is
                    // supported
                    if version != SUPPORTED_VERSION
                    {
                        return Err(Error::IncompatibleVersion { mark });
                    }

                    directives.version = Some(version);
                },
                Marker::TagDirective =>
                {
                    let (_, _, (handle, prefix)) = consume!(tokens, TagDirective)?;

                    /*
                     * %TAG directives with the same handle are an error
                     *
                     * See:
                     *  yaml.org/spec/1.1/#id896876
                     */
                    if self.tag_directives.contains_key(&*handle)
                    {
                        return Err(Error::DuplicateTagDirective { mark });
                    }

                    self.tag_directives.insert(
                        Slice::from(handle.to_string()),
                        Slice::from(prefix.to_string()),
                    );
                    directives.tags.push((handle, prefix));
                },

                _ => break,
            }
        }

        // Insert any missing default directives, but do not
        // overwrite existing associations
        for (handle, prefix) in DEFAULT_TAGS
        {
            self.tag_directives.entry(handle).or_insert(prefix);
        }

        Ok(directives)
    }

    /// Close out a flow sequence, popping the state and
    /// mark stacks
    fn flow_sequence_end<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        start: Mark,
        end: Mark,
    ) -> Result<Event<'de>>
    where
        S: Scan<'de>,
    {
        pop!(tokens)?;
        state!(~self, <<);
        self.marks.pop();

        Ok(initEvent!(@event SequenceEnd => (start, end, ())))
    }

    /// Close out a flow mapping, popping the state and mark
    /// stacks
    fn flow_mapping_end<'de, S>(
        &mut self,
        tokens: &mut Tokens<'de, S>,
        start: Mark,
        end: Mark,
    ) -> Result<Event<'de>>
    where
        S: Scan<'de>,
    {
        pop!(tokens)?;
        state!(~self, <<);
        self.marks.pop();

        Ok(initEvent!(@event MappingEnd => (start, end, ())))
    }

    /// Produce an empty scalar node [`Event`]; the event
    /// has no width and consumes no tokens
    fn empty_scalar(&mut self, mark: Mark, kind: NodeKind) -> Result<Event<'static>>
    {
        let event = initEvent!(@event Scalar => (mark, mark, (NO_ANCHOR, NO_TAG, kind, EMPTY_SCALAR)));

        Ok(event)
    }
}

impl Default for Parser
{
    fn default() -> Self
    {
        Self::new()
    }
}

/// Attempt to retrieve an Anchor token's name if one exists
/// at the head of the token stream
fn fetch_anchor<'de, S>(tokens: &mut Tokens<'de, S>, end: &mut Mark)
    -> Result<Option<Slice<'de>>>
where
    S: Scan<'de>,
{
    let token = peek!(@~tokens)?;
    let mut anchor = None;

    if let Some(Marker::Anchor) = token
    {
        let (_, e, name) = consume!(tokens, Anchor)?;

        *end = e;
        anchor = Some(name);
    }

    Ok(anchor)
}

/// Attempt to retrieve a Tag token's handle and suffix if
/// one exists at the head of the token stream
fn fetch_tag<'de, S>(
    tokens: &mut Tokens<'de, S>,
    tag_mark: &mut Mark,
    end: &mut Mark,
) -> Result<Option<(Slice<'de>, Slice<'de>)>>
where
    S: Scan<'de>,
{
    let token = peek!(@~tokens)?;
    let mut tag = None;

    if let Some(Marker::Tag) = token
    {
        let (s, e, (handle, suffix)) = consume!(tokens, Tag)?;

        *tag_mark = s;
        *end = e;
        tag = Some((handle, suffix));
    }

    Ok(tag)
}

const BLOCK_CONTEXT: bool = true;
const INDENTLESS: bool = true;
const NO_ANCHOR: Option<Slice<'static>> = None;
const NO_TAG: Option<Slice<'static>> = None;

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        event::error::ErrorKind,
        source::Exhausted,
        token::{ScalarStyle::*, StreamEncoding, Token::*, TokenEntry},
    };

    #[macro_use]
    mod macros;

    fn marked(
        token: crate::token::Token<'static>,
        start: (usize, usize, usize),
        end: (usize, usize, usize),
    ) -> TokenEntry<'static>
    {
        TokenEntry::new(
            token,
            Mark::new(start.0, start.1, start.2),
            Mark::new(end.0, end.1, end.2),
        )
    }

    fn collect_events<'de>(mut stream: TokenStream<'de, Exhausted>) -> Vec<Event<'de>>
    {
        let mut parser = Parser::new();
        let mut events = Vec::new();

        while let Some(event) = parser.next_event(&mut stream)
        {
            events.push(event.expect("token stream should parse cleanly"));
        }

        events
    }

    #[test]
    fn empty_stream()
    {
        let tokens = tokens![StreamStart(StreamEncoding::UTF8), StreamEnd];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ StreamEnd }),
            @ None
        )
    }

    #[test]
    fn no_events_after_stream_end()
    {
        let mut stream = tokens![StreamStart(StreamEncoding::UTF8), StreamEnd];
        let mut parser = Parser::new();

        assert!(!parser.is_done());

        while parser.next_event(&mut stream).is_some()
        {}

        assert!(parser.is_done());
        assert!(parser.error().is_none());
        assert!(parser.next_event(&mut stream).is_none());
        assert!(parser.next_event(&mut stream).is_none());
    }

    #[test]
    fn empty_document()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            DocumentStart,
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        )
    }

    #[test]
    fn simple_scalar()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Scalar(cow!("foo"), Plain),
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!("foo", Plain), @Root) }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn quoted_scalar()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Scalar(cow!("Scalar only YAML document"), SingleQuote),
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!("Scalar only YAML document", SingleQuote), @Root) }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn explicit_document_directives()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            VersionDirective(1, 1),
            TagDirective(cow!("!e!"), cow!("tag:example.com,2024:")),
            DocumentStart,
            Scalar(cow!("x"), Plain),
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit 1,1 [{"!e!", "tag:example.com,2024:"}] }),
            | event!({ Scalar node!(scalar!("x", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn tag_resolution_default_handles()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Tag(cow!("!!"), cow!("map")),
            BlockMappingStart,
            Key,
            Tag(cow!("!!"), cow!("str")),
            Scalar(cow!("a key"), Plain),
            Value,
            Tag(cow!("!e!"), cow!("")),
            Scalar(cow!("a value"), Plain),
            BlockEnd,
            StreamEnd
        ];

        // The !e! handle is undefined in this stream
        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root = "tag:yaml.org,2002:map" }),
            | event!({ Scalar node!(scalar!(@tagged "a key", Plain), @Key = "tag:yaml.org,2002:str") }),
            > Error::UndefinedTag { context_mark: Mark::default(), mark: Mark::default() }
        );
    }

    #[test]
    fn tag_resolution_user_directive()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            TagDirective(cow!("!e!"), cow!("tag:example.com,2024:")),
            DocumentStart,
            Tag(cow!("!e!"), cow!("widget")),
            Scalar(cow!("x"), DoubleQuote),
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit [{"!e!", "tag:example.com,2024:"}] }),
            | event!({ Scalar node!(scalar!(@tagged "x", DoubleQuote), @Root = "tag:example.com,2024:widget") }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn tag_verbatim()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Tag(cow!(""), cow!("tag:example.com,2024:verbatim")),
            Scalar(cow!("x"), Plain),
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!(@tagged "x", Plain), @Root = "tag:example.com,2024:verbatim") }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn tag_non_specific()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Tag(cow!("!"), cow!("")),
            Scalar(cow!("x"), DoubleQuote),
            StreamEnd
        ];

        // The non specific tag '!' leaves even a quoted scalar
        // plain implicit
        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar types::Node {
                anchor:  None,
                tag:     Some(cow!("!")),
                content: types::Scalar {
                    data:            cow!("x"),
                    style:           DoubleQuote,
                    plain_implicit:  true,
                    quoted_implicit: false,
                },
                kind:    NodeKind::Root,
            } }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn error_undefined_tag_marks()
    {
        let entries = vec![
            marked(StreamStart(StreamEncoding::UTF8), (0, 0, 0), (0, 0, 0)),
            marked(Anchor(cow!("a")), (0, 0, 0), (2, 0, 2)),
            marked(Tag(cow!("!missing!"), cow!("foo")), (3, 0, 3), (16, 0, 16)),
            marked(Scalar(cow!("x"), Plain), (17, 0, 17), (18, 0, 18)),
            marked(StreamEnd, (18, 0, 18), (18, 0, 18)),
        ];
        let mut stream = TokenStream::from_tokens(entries);
        let mut parser = Parser::new();

        // Stream start + implicit document start
        assert!(matches!(parser.next_event(&mut stream), Some(Ok(_))));
        assert!(matches!(parser.next_event(&mut stream), Some(Ok(_))));

        let error = parser
            .next_event(&mut stream)
            .expect("an error should be produced")
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Parser);
        assert_eq!(error.problem(), "found undefined tag handle");
        assert_eq!(error.problem_mark(), Some(Mark::new(3, 0, 3)));
        assert_eq!(error.context(), Some("while parsing a node"));
        assert_eq!(error.context_mark(), Some(Mark::new(0, 0, 0)));
    }

    #[test]
    fn block_sequence()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockSequenceStart,
            BlockEntry,
            Scalar(cow!("Entry #1"), DoubleQuote),
            BlockEntry,
            Scalar(cow!("Entry #2"), DoubleQuote),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Block @Root }),
            | event!({ Scalar node!(scalar!("Entry #1", DoubleQuote), @Entry) }),
            | event!({ Scalar node!(scalar!("Entry #2", DoubleQuote), @Entry) }),
            | event!({ SequenceEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn block_sequence_entry_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockSequenceStart,
            BlockEntry,
            /* Scalar, */
            BlockEntry,
            Scalar(cow!("Entry #2"), SingleQuote),
            BlockEntry,
            /* Scalar, */
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Block @Root }),
            | event!({ Scalar node!(scalar!("", Plain), @Entry) }),
            | event!({ Scalar node!(scalar!("Entry #2", SingleQuote), @Entry) }),
            | event!({ Scalar node!(scalar!("", Plain), @Entry) }),
            | event!({ SequenceEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn block_mapping()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("a key"), Plain),
            Value,
            Scalar(cow!("a value"), Plain),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("a key", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("a value", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn block_mapping_key_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            /* Scalar, */
            Value,
            Scalar(cow!("value 1"), Plain),
            Key,
            Scalar(cow!("key 2"), Plain),
            Value,
            Scalar(cow!("value 2"), Plain),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("value 1", Plain), @Value) }),
            | event!({ Scalar node!(scalar!("key 2", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("value 2", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn block_mapping_value_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("key 1"), Plain),
            Value,
            /* Scalar, */
            Key,
            Scalar(cow!("key 2"), Plain),
            /* Value, */
            /* Scalar, */
            Key,
            Scalar(cow!("key 3"), Plain),
            Value,
            /* Scalar, */
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("key 1", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ Scalar node!(scalar!("key 2", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ Scalar node!(scalar!("key 3", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn block_mapping_indentless_sequence()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("a"), Plain),
            Value,
            BlockEntry,
            Scalar(cow!("1"), Plain),
            BlockEntry,
            Scalar(cow!("2"), Plain),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("a", Plain), @Key) }),
            | event!({ SequenceStart Block @Value }),
            | event!({ Scalar node!(scalar!("1", Plain), @Entry) }),
            | event!({ Scalar node!(scalar!("2", Plain), @Entry) }),
            | event!({ SequenceEnd }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn indentless_sequence_entry_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("a"), Plain),
            Value,
            BlockEntry,
            /* Scalar, */
            BlockEntry,
            Scalar(cow!("2"), Plain),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("a", Plain), @Key) }),
            | event!({ SequenceStart Block @Value }),
            | event!({ Scalar node!(scalar!("", Plain), @Entry) }),
            | event!({ Scalar node!(scalar!("2", Plain), @Entry) }),
            | event!({ SequenceEnd }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_sequence()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowSequenceStart,
            Scalar(cow!("one"), Plain),
            FlowEntry,
            Scalar(cow!("two"), Plain),
            FlowSequenceEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Flow @Root }),
            | event!({ Scalar node!(scalar!("one", Plain), @Entry) }),
            | event!({ Scalar node!(scalar!("two", Plain), @Entry) }),
            | event!({ SequenceEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_sequence_single_pair_mapping()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowSequenceStart,
            /* FlowMappingStart */
            Key,
            Scalar(cow!("k"), Plain),
            Value,
            Scalar(cow!("v"), Plain),
            /* FlowMappingEnd */
            FlowSequenceEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Flow @Root }),
            | event!({ MappingStart Flow @Entry }),
            | event!({ Scalar node!(scalar!("k", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("v", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ SequenceEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_sequence_single_pair_value_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowSequenceStart,
            /* FlowMappingStart */
            Key,
            Scalar(cow!("compact mapping key"), DoubleQuote),
            Value,
            /* Scalar */
            /* FlowMappingEnd */
            FlowSequenceEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Flow @Root }),
            | event!({ MappingStart Flow @Entry }),
            | event!({ Scalar node!(scalar!("compact mapping key", DoubleQuote), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ SequenceEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_mapping()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            Key,
            Scalar(cow!("a key"), Plain),
            Value,
            Scalar(cow!("a value"), Plain),
            FlowEntry,
            Key,
            Scalar(cow!("another key"), Plain),
            Value,
            Scalar(cow!("another value"), Plain),
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("a key", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("a value", Plain), @Value) }),
            | event!({ Scalar node!(scalar!("another key", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("another value", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_mapping_key_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            Key,
            /* Scalar */
            Value,
            Scalar(cow!("value 1"), SingleQuote),
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("value 1", SingleQuote), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_mapping_value_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            Key,
            Scalar(cow!("key 1"), SingleQuote),
            Value,
            /* Scalar */
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("key 1", SingleQuote), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_mapping_key_singleton()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            /* Key */
            Scalar(cow!("singleton key"), SingleQuote),
            /* Value */
            /* Scalar */
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("singleton key", SingleQuote), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn flow_mapping_empty_pair()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            Key,
            Value,
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("", Plain), @Value) }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn empty_scalars_have_zero_width()
    {
        let entries = vec![
            marked(StreamStart(StreamEncoding::UTF8), (0, 0, 0), (0, 0, 0)),
            marked(FlowMappingStart, (0, 0, 0), (1, 0, 1)),
            marked(Key, (1, 0, 1), (1, 0, 1)),
            marked(Value, (1, 0, 1), (2, 0, 2)),
            marked(FlowMappingEnd, (2, 0, 2), (3, 0, 3)),
            marked(StreamEnd, (3, 0, 3), (3, 0, 3)),
        ];
        let events = collect_events(TokenStream::from_tokens(entries));

        let scalars: Vec<_> = events
            .iter()
            .filter(|event| matches!(event.data(), EventData::Scalar(_)))
            .collect();

        assert_eq!(scalars.len(), 2);
        // The implied key sits at the Value token, the implied
        // value at the closing brace
        assert_eq!((scalars[0].start(), scalars[0].end()), (Mark::new(1, 0, 1), Mark::new(1, 0, 1)));
        assert_eq!((scalars[1].start(), scalars[1].end()), (Mark::new(2, 0, 2), Mark::new(2, 0, 2)));
    }

    #[test]
    fn anchors_and_aliases()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("base"), Plain),
            Value,
            Anchor(cow!("a")),
            Scalar(cow!("shared"), Plain),
            Key,
            Scalar(cow!("other"), Plain),
            Value,
            Alias(cow!("a")),
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("base", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("shared", Plain), @Value & "a") }),
            | event!({ Scalar node!(scalar!("other", Plain), @Key) }),
            | event!({ Alias "a" }),
            | event!({ MappingEnd }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn node_anchor_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Anchor(cow!("empty")),
            /* Scalar */
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!("", Plain), @Root & "empty") }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn node_tag_implied()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Tag(cow!("!!"), cow!("str")),
            /* Scalar */
            StreamEnd
        ];

        // A tagged node is no longer implicit, even without
        // content
        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!(@tagged "", Plain), @Root = "tag:yaml.org,2002:str") }),
            | event!({ DocumentEnd }),
            | event!({ StreamEnd }),
            @ None
        );
    }

    #[test]
    fn multi_document()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            DocumentStart,
            Scalar(cow!("Document 1"), SingleQuote),
            DocumentEnd,
            DocumentStart,
            Scalar(cow!("Document 2"), SingleQuote),
            /* DocumentEnd */
            DocumentStart,
            Scalar(cow!("Document 3"), SingleQuote),
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("Document 1", SingleQuote), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("Document 2", SingleQuote), @Root) }),
            | event!({ DocumentEnd }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("Document 3", SingleQuote), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        )
    }

    #[test]
    fn multi_document_stray_end_tokens()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            DocumentStart,
            Scalar(cow!("Document 1"), Plain),
            DocumentEnd,
            DocumentEnd,
            DocumentEnd,
            DocumentStart,
            Scalar(cow!("Document 2"), Plain),
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("Document 1", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ DocumentStart @explicit }),
            | event!({ Scalar node!(scalar!("Document 2", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        )
    }

    #[test]
    fn multi_document_directives_scoped()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            TagDirective(cow!("!e!"), cow!("one:")),
            DocumentStart,
            Tag(cow!("!e!"), cow!("thing")),
            Scalar(cow!("first"), Plain),
            DocumentEnd,
            TagDirective(cow!("!e!"), cow!("two:")),
            DocumentStart,
            Tag(cow!("!e!"), cow!("thing")),
            Scalar(cow!("second"), Plain),
            DocumentEnd,
            StreamEnd
        ];

        // The same handle resolves differently in each document
        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit [{"!e!", "one:"}] }),
            | event!({ Scalar node!(scalar!(@tagged "first", Plain), @Root = "one:thing") }),
            | event!({ DocumentEnd @explicit }),
            | event!({ DocumentStart @explicit [{"!e!", "two:"}] }),
            | event!({ Scalar node!(scalar!(@tagged "second", Plain), @Root = "two:thing") }),
            | event!({ DocumentEnd @explicit }),
            | event!({ StreamEnd }),
            @ None
        )
    }

    #[test]
    fn error_directive_not_scoped_to_later_documents()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            TagDirective(cow!("!e!"), cow!("one:")),
            DocumentStart,
            Scalar(cow!("first"), Plain),
            DocumentEnd,
            DocumentStart,
            Tag(cow!("!e!"), cow!("thing")),
            Scalar(cow!("second"), Plain),
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart @explicit [{"!e!", "one:"}] }),
            | event!({ Scalar node!(scalar!("first", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            | event!({ DocumentStart @explicit }),
            > Error::UndefinedTag { context_mark: Mark::default(), mark: Mark::default() }
        )
    }

    #[test]
    fn error_missing_document_start()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            Scalar(cow!("Document 1"), Plain),
            DocumentEnd,
            Scalar(cow!("Document 2"), Plain),
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ Scalar node!(scalar!("Document 1", Plain), @Root) }),
            | event!({ DocumentEnd @explicit }),
            > Error::MissingDocumentStart { mark: Mark::default() }
        )
    }

    #[test]
    fn error_duplicate_version_directive()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            VersionDirective(1, 1),
            VersionDirective(1, 1),
            DocumentStart,
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            > Error::DuplicateVersion { mark: Mark::default() }
        )
    }

    #[test]
    fn error_incompatible_version_directive()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            VersionDirective(1, 2),
            DocumentStart,
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            > Error::IncompatibleVersion { mark: Mark::default() }
        )
    }

    #[test]
    fn error_duplicate_tag_directive()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            TagDirective(cow!("!e!"), cow!("one:")),
            TagDirective(cow!("!e!"), cow!("two:")),
            DocumentStart,
            DocumentEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            > Error::DuplicateTagDirective { mark: Mark::default() }
        )
    }

    #[test]
    fn error_missing_block_entry()
    {
        let entries = vec![
            marked(StreamStart(StreamEncoding::UTF8), (0, 0, 0), (0, 0, 0)),
            marked(BlockSequenceStart, (0, 0, 0), (0, 0, 0)),
            marked(BlockEntry, (0, 0, 0), (1, 0, 1)),
            marked(Scalar(cow!("1"), Plain), (2, 0, 2), (3, 0, 3)),
            marked(Scalar(cow!("stray"), Plain), (4, 1, 0), (9, 1, 5)),
            marked(BlockEnd, (9, 1, 5), (9, 1, 5)),
            marked(StreamEnd, (9, 1, 5), (9, 1, 5)),
        ];
        let mut stream = TokenStream::from_tokens(entries);
        let mut parser = Parser::new();

        // Stream start, document start, sequence start, scalar
        for _ in 0..4
        {
            assert!(matches!(parser.next_event(&mut stream), Some(Ok(_))));
        }

        let error = parser
            .next_event(&mut stream)
            .expect("an error should be produced")
            .unwrap_err();

        assert_eq!(error.problem(), "did not find expected '-' indicator");
        assert_eq!(error.problem_mark(), Some(Mark::new(4, 1, 0)));
        assert_eq!(error.context(), Some("while parsing a block collection"));
        assert_eq!(error.context_mark(), Some(Mark::new(0, 0, 0)));
    }

    #[test]
    fn error_missing_key()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("a key"), Plain),
            Value,
            Scalar(cow!("a value"), Plain),
            BlockEntry,
            BlockEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            | event!({ Scalar node!(scalar!("a key", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("a value", Plain), @Value) }),
            > Error::MissingKey { context_mark: Mark::default(), mark: Mark::default() }
        )
    }

    #[test]
    fn error_missing_flow_sequence_delimiter()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowSequenceStart,
            Scalar(cow!("one"), Plain),
            Scalar(cow!("two"), Plain),
            FlowSequenceEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Flow @Root }),
            | event!({ Scalar node!(scalar!("one", Plain), @Entry) }),
            > Error::MissingFlowSequenceEntryOrEnd {
                context_mark: Mark::default(),
                mark: Mark::default()
            }
        )
    }

    #[test]
    fn error_missing_flow_mapping_delimiter()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowMappingStart,
            Key,
            Scalar(cow!("a key"), Plain),
            Value,
            Scalar(cow!("a value"), Plain),
            Scalar(cow!("stray"), Plain),
            FlowMappingEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Flow @Root }),
            | event!({ Scalar node!(scalar!("a key", Plain), @Key) }),
            | event!({ Scalar node!(scalar!("a value", Plain), @Value) }),
            > Error::MissingFlowMappingEntryOrEnd {
                context_mark: Mark::default(),
                mark: Mark::default()
            }
        )
    }

    #[test]
    fn error_missing_node()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            FlowSequenceStart,
            FlowEntry,
            FlowSequenceEnd,
            StreamEnd
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ SequenceStart Flow @Root }),
            > Error::MissingNode {
                flow: true,
                context_mark: Mark::default(),
                mark: Mark::default()
            }
        )
    }

    #[test]
    fn error_corrupt_stream()
    {
        let tokens = tokens![Scalar(cow!("not a stream start"), Plain), StreamEnd];

        events!(tokens =>
            > Error::CorruptStream { mark: Mark::default() }
        )
    }

    #[test]
    fn error_unexpected_eof()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key
        ];

        events!(tokens =>
            | event!({ StreamStart }),
            | event!({ DocumentStart }),
            | event!({ MappingStart Block @Root }),
            > Error::UnexpectedEOF
        )
    }

    #[test]
    fn error_is_latched()
    {
        let mut stream = tokens![
            StreamStart(StreamEncoding::UTF8),
            Scalar(cow!("a"), Plain),
            Scalar(cow!("b"), Plain),
            StreamEnd
        ];
        let mut parser = Parser::new();

        // Stream start, document start, scalar, document end
        for _ in 0..4
        {
            assert!(matches!(parser.next_event(&mut stream), Some(Ok(_))));
        }

        let first = parser
            .next_event(&mut stream)
            .expect("an error should be produced")
            .unwrap_err();
        let second = parser
            .next_event(&mut stream)
            .expect("the error should repeat")
            .unwrap_err();

        assert_eq!(first, second);
        assert_eq!(parser.error(), Some(&first));
        assert!(!parser.is_done());
    }

    #[test]
    fn deterministic_event_stream()
    {
        let tokens = || {
            tokens![
                StreamStart(StreamEncoding::UTF8),
                BlockMappingStart,
                Key,
                Scalar(cow!("key"), Plain),
                Value,
                FlowSequenceStart,
                Scalar(cow!("one"), Plain),
                FlowEntry,
                Scalar(cow!("two"), Plain),
                FlowSequenceEnd,
                BlockEnd,
                StreamEnd
            ]
        };

        let first = collect_events(tokens());
        let second = collect_events(tokens());

        assert_eq!(first, second);
    }

    #[test]
    fn event_stream_is_balanced()
    {
        let tokens = tokens![
            StreamStart(StreamEncoding::UTF8),
            BlockMappingStart,
            Key,
            Scalar(cow!("key"), Plain),
            Value,
            BlockEntry,
            Scalar(cow!("entry"), Plain),
            BlockEntry,
            FlowSequenceStart,
            Scalar(cow!("one"), Plain),
            FlowEntry,
            FlowMappingStart,
            Key,
            Scalar(cow!("x"), Plain),
            Value,
            Scalar(cow!("y"), Plain),
            FlowMappingEnd,
            FlowSequenceEnd,
            BlockEnd,
            StreamEnd
        ];
        let events = collect_events(tokens);

        let mut depth = 0i32;

        for event in &events
        {
            match event.data()
            {
                EventData::StreamStart(_)
                | EventData::DocumentStart(_)
                | EventData::SequenceStart(_)
                | EventData::MappingStart(_) => depth += 1,
                EventData::StreamEnd
                | EventData::DocumentEnd(_)
                | EventData::SequenceEnd
                | EventData::MappingEnd => depth -= 1,
                _ =>
                {},
            }

            assert!(depth >= 0, "negative nesting depth after {:?}", event);
        }

        assert_eq!(depth, 0);
    }

    #[test]
    fn mark_monotonicity()
    {
        let entries = vec![
            marked(StreamStart(StreamEncoding::UTF8), (0, 0, 0), (0, 0, 0)),
            marked(BlockMappingStart, (0, 0, 0), (0, 0, 0)),
            marked(Key, (0, 0, 0), (0, 0, 0)),
            marked(Scalar(cow!("foo"), Plain), (0, 0, 0), (3, 0, 3)),
            marked(Value, (3, 0, 3), (4, 0, 4)),
            marked(Scalar(cow!("bar"), Plain), (5, 0, 5), (8, 0, 8)),
            marked(BlockEnd, (9, 1, 0), (9, 1, 0)),
            marked(StreamEnd, (9, 1, 0), (9, 1, 0)),
        ];
        let events = collect_events(TokenStream::from_tokens(entries));

        for pair in events.windows(2)
        {
            assert!(
                pair[0].end().offset <= pair[1].start().offset,
                "event {:?} overlaps the next event {:?}",
                pair[0],
                pair[1]
            );
        }
    }
}
