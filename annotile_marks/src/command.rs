// Copyright 2025 the Annotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutations as values, for frontends that queue them.

use alloc::vec::Vec;

use crate::types::GroupId;

/// One mutation of a [`MarkGenerator`](crate::MarkGenerator).
///
/// Applied with [`MarkGenerator::apply`](crate::MarkGenerator::apply). A
/// frontend that receives annotation updates on a channel drains it into the
/// generator from the one context that owns it.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationCommand<M, L> {
    /// Forget a group entirely.
    Clear(GroupId),
    /// Replace a group's marks.
    SetMarks(GroupId, Vec<M>),
    /// Replace a group's lines.
    SetLines(GroupId, Vec<L>),
    /// Show or hide a group.
    SetVisibility(GroupId, bool),
}

impl<M, L> AnnotationCommand<M, L> {
    /// The group this command targets.
    pub fn group(&self) -> GroupId {
        match self {
            Self::Clear(g)
            | Self::SetMarks(g, _)
            | Self::SetLines(g, _)
            | Self::SetVisibility(g, _) => *g,
        }
    }
}
