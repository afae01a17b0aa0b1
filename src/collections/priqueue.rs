/*
 * Copyright (c) 2018, 2026 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

mod binheap;
pub use self::binheap::BinHeap;

/// A priority queue with handles for its elements.
///
/// Each element consists of a `key` identifying the element and a `value`
/// giving its priority. Elements with smaller values are popped first, the
/// order of elements with equal values is unspecified.
pub trait ItemPriQueue<K, V> {
    /// Handle for an item in the queue.
    type Item;

    /// Return `true` iff the queue contains no element.
    fn is_empty(&self) -> bool;

    /// Return the number of elements in the queue.
    fn len(&self) -> usize;

    /// Remove all elements from the queue.
    fn clear(&mut self);

    /// Push the element with given `key` and `value` onto the queue.
    ///
    /// Return a handle referencing the element. That handle can be used in a
    /// subsequent call to `decrease_key`. The handle becomes invalid once the
    /// element has been popped.
    fn push(&mut self, key: K, value: V) -> Self::Item;

    /// Decrease the value of some item in the queue.
    ///
    /// Returns `true` if the new value is smaller than the old one, otherwise
    /// nothing is changed.
    fn decrease_key(&mut self, item: &Self::Item, value: V) -> bool;

    /// Remove and return the element with the smallest value from the queue or `None` if
    /// the queue is empty.
    fn pop_min(&mut self) -> Option<(K, V)>;

    /// Return the key of some item in the queue.
    fn key(&self, item: &Self::Item) -> &K;

    /// Return the current value associated with some item in the queue.
    fn value(&self, item: &Self::Item) -> &V;
}
