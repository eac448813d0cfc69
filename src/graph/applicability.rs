//! Variant applicability evaluation.
//!
//! Each variant carries paired inclusion/exclusion constraint sets per
//! category. A variant applies to a runtime context iff, for every category,
//! either the inclusion set is empty or the context's value is a member of
//! it, and the context's value is not a member of the exclusion set.

use crate::core::types::{ProcessConnection, ProcessDirection, ProcessOrigin};
use crate::graph::edge::{ActionEdge, Variant};

/// The runtime situation an action fires in.
///
/// Every field is optional: a missing value satisfies a category only when
/// that category's inclusion set is empty, and never trips the exclusion set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionContext {
    /// Connection protocol of the partner.
    pub connection: Option<ProcessConnection>,
    /// Whether the process is internally or externally driven.
    pub origin: Option<ProcessOrigin>,
    /// Direction of the document flow.
    pub direction: Option<ProcessDirection>,
    /// Label of the prior stage, if tracked.
    pub state: Option<String>,
}

impl ActionContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connection protocol.
    pub fn with_connection(mut self, connection: ProcessConnection) -> Self {
        self.connection = Some(connection);
        self
    }

    /// Set the origin.
    pub fn with_origin(mut self, origin: ProcessOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the direction.
    pub fn with_direction(mut self, direction: ProcessDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the prior stage label.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// One constraint category: value passes iff it is in `included` (or
/// `included` is empty) and not in `excluded`.
fn category_matches<T: PartialEq>(value: Option<&T>, included: &[T], excluded: &[T]) -> bool {
    let in_ok = included.is_empty() || value.map_or(false, |v| included.contains(v));
    let not_in_ok = value.map_or(true, |v| !excluded.contains(v));
    in_ok && not_in_ok
}

impl Variant {
    /// Whether this variant is eligible in the given context.
    pub fn applies_to(&self, ctx: &ActionContext) -> bool {
        category_matches(
            ctx.connection.as_ref(),
            &self.constraints_connections_in,
            &self.constraints_connections_not_in,
        ) && category_matches(
            ctx.origin.as_ref(),
            &self.constraints_origins_in,
            &self.constraints_origins_not_in,
        ) && category_matches(
            ctx.direction.as_ref(),
            &self.constraints_directions_in,
            &self.constraints_directions_not_in,
        ) && category_matches(
            ctx.state.as_ref(),
            &self.constraints_states_in,
            &self.constraints_states_not_in,
        )
    }
}

impl ActionEdge {
    /// The first variant, in display order, eligible in the given context.
    pub fn select_variant(&self, ctx: &ActionContext) -> Option<&Variant> {
        self.variants.iter().find(|v| v.applies_to(ctx))
    }

    /// All variants eligible in the given context, in display order.
    pub fn applicable_variants<'a>(
        &'a self,
        ctx: &'a ActionContext,
    ) -> impl Iterator<Item = &'a Variant> {
        self.variants.iter().filter(move |v| v.applies_to(ctx))
    }
}
