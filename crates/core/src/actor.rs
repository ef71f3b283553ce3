//! Actor identity for mutation attribution.

/// Identity of the actor performing an operation.
///
/// Passed explicitly into every mutating call; there is no ambient
/// current-user state. The id populates `deleted_by` and ownership fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorContext {
    pub actor_id: i64,
}

impl ActorContext {
    pub fn new(actor_id: i64) -> Self {
        Self { actor_id }
    }
}
