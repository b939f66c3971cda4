/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The Queue is a thin first-in first-out buffer sitting
//! between a token source and the parser's one token
//! lookahead. Sources append at the tail, the parser only
//! ever inspects or removes the head.

use std::collections::VecDeque;

/// A FIFO buffer of items, preserving the order in which
/// they were added
#[derive(Debug, Clone)]
pub struct Queue<T>
{
    inner: VecDeque<T>,
}

impl<T> Queue<T>
{
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Append an item at the tail of the queue
    pub fn push(&mut self, item: T)
    {
        self.inner.push_back(item)
    }

    /// Remove and return the head of the queue
    pub fn pop(&mut self) -> Option<T>
    {
        self.inner.pop_front()
    }

    /// Peek the head of the queue without removing it
    pub fn head(&self) -> Option<&T>
    {
        self.inner.front()
    }

    pub fn len(&self) -> usize
    {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.inner.is_empty()
    }
}

impl<T> Default for Queue<T>
{
    fn default() -> Self
    {
        Self {
            inner: VecDeque::new(),
        }
    }
}

impl<T> Extend<T> for Queue<T>
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I)
    {
        self.inner.extend(iter)
    }
}

impl<T> FromIterator<T> for Queue<T>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self
    {
        Self {
            inner: VecDeque::from_iter(iter),
        }
    }
}
