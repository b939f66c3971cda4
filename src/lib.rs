/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library translates streams of YAML 1.1 lexical
//! tokens into streams of parse events describing the
//! structure of the document(s): stream and document
//! boundaries, scalars, aliases, and the start/end of
//! sequences and mappings in both block and flow styles.
//!
//! Tokens are produced externally, either up front (see
//! [`TokenStream::from_tokens`]) or on demand through the
//! [`Scan`] trait. The [`Parser`] consumes them with one
//! token of lookahead, producing exactly one [`Event`] per
//! call until the stream ends; the [`Events`] interface
//! wraps the same machinery in an [`Iterator`].
//!
//! [`TokenStream::from_tokens`]: source::TokenStream::from_tokens
//! [`Scan`]: trait@source::Scan
//! [`Parser`]: struct@event::Parser
//! [`Events`]: struct@event::Events
//! [`Event`]: struct@event::types::Event

pub mod event;
pub mod queue;
pub mod source;
pub mod token;
