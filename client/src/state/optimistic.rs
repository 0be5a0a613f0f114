//! Optimistic list mutations with an explicit rollback token.
//!
//! DESIGN
//! ======
//! A command mutates local state before the backend confirms. `apply`
//! records what the command itself changed and hands back a [`Rollback`];
//! the caller either `commit`s it once the backend agrees or `restore`s it
//! on failure. Restoring inverts only that one change, so other commands
//! applied in the meantime (and already confirmed) survive it. The token is
//! `#[must_use]` and consumed by value, so a failure path cannot forget it or
//! restore it twice.

#[cfg(test)]
#[path = "optimistic_test.rs"]
mod optimistic_test;

/// A local mutation that may have to be undone.
pub trait OptimisticCommand: Sized {
    type Target;
    /// Whatever `revert` needs to invert this command's own change.
    type Undo;

    /// The mutation itself.
    fn mutate(&self, target: &mut Self::Target) -> Self::Undo;

    /// Invert a previous `mutate`, leaving unrelated entries alone.
    fn revert(undo: Self::Undo, target: &mut Self::Target);

    /// Mutate and return the token that can undo it.
    fn apply(&self, target: &mut Self::Target) -> Rollback<Self> {
        Rollback { undo: self.mutate(target) }
    }
}

/// The inverse of an applied command.
#[must_use = "a rollback token must be committed or restored"]
pub struct Rollback<C: OptimisticCommand> {
    undo: C::Undo,
}

impl<C: OptimisticCommand> Rollback<C> {
    /// Undo the command's change on the current target.
    pub fn restore(self, target: &mut C::Target) {
        C::revert(self.undo, target);
    }

    /// The backend confirmed; the undo record is no longer needed.
    pub fn commit(self) {}
}
