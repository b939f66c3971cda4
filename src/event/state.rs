/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

pub(in crate::event) use self::flags::*;

/// The pushdown core of the parser: the active production,
/// plus the continuation states of every document and
/// collection currently open.
///
/// A handler that recurses into a child node defers its own
/// continuation; the handler that finishes that node
/// resumes it. The continuation depth therefore always
/// equals the nesting depth of open productions.
#[derive(Debug, Clone)]
pub(in crate::event) struct StateMachine
{
    current: State,
    returns: Vec<State>,
}

impl StateMachine
{
    /// Replace the active production
    pub fn transition(&mut self, next: State)
    {
        self.current = next;
    }

    /// Remember .continuation, to be resumed once the child
    /// production underway completes
    pub fn defer(&mut self, continuation: State)
    {
        self.returns.push(continuation);
    }

    /// Finish the active production, resuming the most
    /// recently deferred continuation. Leaves the active
    /// production untouched if nothing is pending.
    pub fn resume(&mut self)
    {
        if let Some(next) = self.returns.pop()
        {
            self.current = next;
        }
    }

    /// The active production
    pub fn current(&self) -> &State
    {
        &self.current
    }

    /// Has the machine reached its terminal state, with no
    /// continuations pending?
    pub fn is_done(&self) -> bool
    {
        self.returns.is_empty() && matches!(self.current, State::StreamEnd)
    }
}

impl Default for StateMachine
{
    fn default() -> Self
    {
        Self {
            current: State::StreamStart,
            returns: Vec::new(),
        }
    }
}

/// Possible states in the processing of a YAML
/// [Token][crate::token::Token] sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub(in crate::event) enum State
{
    /// Expecting start of stream
    StreamStart,
    /// Expecting nothing (end of state)
    StreamEnd,

    /// Expecting start of document
    /// :: O_IMPLICIT?
    DocumentStart(Flags),
    /// Expecting the content of an explicit document
    DocumentContent,
    /// Expecting end of document
    DocumentEnd,

    /// Expecting a Node in the block context
    BlockNode,
    /// Expecting a Node in the block context, allowing an
    /// indentless sequence
    BlockNodeOrIndentlessSequence,
    /// Expecting a Node in the flow context
    FlowNode,

    /// Expecting sequence entries in the block context
    /// :: O_FIRST?
    BlockSequenceEntry(Flags),
    /// Expecting entries of a block sequence written at the
    /// indentation of its parent mapping
    IndentlessSequenceEntry,
    /// Expecting mapping key in the block context
    /// :: O_FIRST?
    BlockMappingKey(Flags),
    /// Expecting a mapping value in the block context
    BlockMappingValue,

    /// Expecting sequence entries in the flow context
    /// :: O_FIRST?
    FlowSequenceEntry(Flags),
    /// Expecting a key in a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingKey,
    /// Expecting a value in a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingValue,
    /// Expecting the end of a flow sequence->mapping nested
    /// structure
    FlowSequenceMappingEnd,

    /// Expecting mapping key in the flow context
    /// :: O_FIRST?
    FlowMappingKey(Flags),
    /// Expecting a mapping value in the flow context
    /// :: O_EMPTY?
    FlowMappingValue(Flags),
}

mod flags
{
    use bitflags::bitflags;

    /// Nil / empty flag set
    pub const O_NIL: Flags = Flags::empty();
    /// May the document be header-less?
    pub const O_IMPLICIT: Flags = Flags::IMPLICIT;
    /// Is this the first entry of the sequence/mapping?
    pub const O_FIRST: Flags = Flags::FIRST;
    /// Is the current mapping value expected to be empty?
    pub const O_EMPTY: Flags = Flags::EMPTY;

    bitflags! {
        #[derive(Default)]
        /// Options used by the state machine, not all options are relevant to all states.
        pub struct Flags: u8 {
            const IMPLICIT      = 0b00000001;
            const FIRST         = 0b00000010;
            const EMPTY         = 0b00000100;
        }
    }
}
