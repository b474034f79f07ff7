//! Cycle-safe traversal of index-linked record chains.
//!
//! Every chain in the model (a polygon's points, an object's polygons,
//! an object's children, the parent path) is walked by [`ChainWalker`].
//! The walker is parameterised by the table and a link accessor, so the
//! termination rules live in exactly one place.
//!
//! # Termination
//!
//! A walk stops at the first of:
//!
//! - a link equal to `-1` ([`ChainEnd::Terminated`]),
//! - a handle outside the table's high-water mark ([`ChainEnd::OutOfBounds`]),
//! - a record whose validity flag is clear ([`ChainEnd::Dead`]),
//! - a handle already visited ([`ChainEnd::Cycle`]),
//! - the step cap ([`ChainEnd::StepCap`]).
//!
//! # Limitation
//!
//! Cycle detection remembers only the first [`ChainWalker::VISITED_WINDOW`]
//! handles. Once the window is full the walk keeps going but no longer
//! checks for revisits, so a loop closing after that point is stopped by
//! the step cap rather than reported as [`ChainEnd::Cycle`]. Legacy files
//! are read with this exact behaviour, so the window is not widened.

use std::iter::FusedIterator;

use iwacad_core::{Record, TableId, INVALID_INDEX};
use smallvec::SmallVec;

use crate::table::Table;

const VISITED_CAPACITY: usize = 64;

/// Step cap used by the arena's convenience walkers.
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Why a [`ChainWalker`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainEnd {
    /// Reached a `-1` link.
    Terminated,
    /// A link pointed outside the table.
    OutOfBounds,
    /// A link pointed at a slot whose validity flag is clear.
    Dead,
    /// A link revisited a handle inside the visited window.
    Cycle,
    /// The step cap was reached before the chain ended.
    StepCap,
}

impl ChainEnd {
    /// Whether the chain ended the way a well-formed chain does.
    pub fn is_clean(self) -> bool {
        self == Self::Terminated
    }
}

/// A finite, non-restartable walk along one link field of a table.
///
/// Yields `(handle, record)` pairs for live records. After the walk ends,
/// [`ChainWalker::end`] reports why.
pub struct ChainWalker<'a, I: TableId, R: Record> {
    table: &'a Table<I, R>,
    next: I,
    link: fn(&R) -> I,
    max_steps: usize,
    steps: usize,
    visited: SmallVec<[i16; VISITED_CAPACITY]>,
    end: Option<ChainEnd>,
}

impl<'a, I: TableId, R: Record> ChainWalker<'a, I, R> {
    /// Number of handles remembered for cycle detection.
    pub const VISITED_WINDOW: usize = VISITED_CAPACITY;

    /// Start a walk at `start`, following `link`, yielding at most
    /// `max_steps` records.
    pub fn new(table: &'a Table<I, R>, start: I, link: fn(&R) -> I, max_steps: usize) -> Self {
        Self {
            table,
            next: start,
            link,
            max_steps,
            steps: 0,
            visited: SmallVec::new(),
            end: None,
        }
    }

    /// Why the walk stopped, or `None` while it is still running.
    pub fn end(&self) -> Option<ChainEnd> {
        self.end
    }

    /// Number of records yielded so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Drain the walk, returning the visited handles and the end reason.
    pub fn collect_ids(mut self) -> (Vec<I>, ChainEnd) {
        let ids: Vec<I> = self.by_ref().map(|(id, _)| id).collect();
        // A drained walker always has an end reason.
        (ids, self.end.unwrap_or(ChainEnd::Terminated))
    }

    fn stop(&mut self, reason: ChainEnd) -> Option<(I, &'a R)> {
        self.end = Some(reason);
        None
    }
}

impl<'a, I: TableId, R: Record> Iterator for ChainWalker<'a, I, R> {
    type Item = (I, &'a R);

    fn next(&mut self) -> Option<Self::Item> {
        if self.end.is_some() {
            return None;
        }
        let current = self.next;
        if current.raw() == INVALID_INDEX {
            return self.stop(ChainEnd::Terminated);
        }
        if self.steps >= self.max_steps {
            return self.stop(ChainEnd::StepCap);
        }
        let table = self.table;
        let Some(record) = table.get(current) else {
            return self.stop(ChainEnd::OutOfBounds);
        };
        if self.visited.len() < Self::VISITED_WINDOW {
            if self.visited.contains(&current.raw()) {
                return self.stop(ChainEnd::Cycle);
            }
            self.visited.push(current.raw());
        }
        if !record.is_live() {
            return self.stop(ChainEnd::Dead);
        }
        self.steps += 1;
        self.next = (self.link)(record);
        Some((current, record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.end.is_some() {
            (0, Some(0))
        } else {
            (0, Some(self.max_steps - self.steps))
        }
    }
}

impl<I: TableId, R: Record> FusedIterator for ChainWalker<'_, I, R> {}
