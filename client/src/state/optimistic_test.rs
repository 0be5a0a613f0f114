use super::*;

/// Appends a value; undo removes that one value wherever it ended up.
struct Push(i32);

impl OptimisticCommand for Push {
    type Target = Vec<i32>;
    type Undo = i32;

    fn mutate(&self, target: &mut Vec<i32>) -> i32 {
        target.push(self.0);
        self.0
    }

    fn revert(undo: i32, target: &mut Vec<i32>) {
        if let Some(index) = target.iter().position(|v| *v == undo) {
            target.remove(index);
        }
    }
}

#[test]
fn apply_mutates_and_commit_keeps_it() {
    let mut list = vec![1, 2];
    let rollback = Push(3).apply(&mut list);
    assert_eq!(list, vec![1, 2, 3]);
    rollback.commit();
    assert_eq!(list, vec![1, 2, 3]);
}

#[test]
fn restore_returns_exact_prior_state() {
    let mut list = vec![1, 2];
    let rollback = Push(3).apply(&mut list);
    rollback.restore(&mut list);
    assert_eq!(list, vec![1, 2]);
}

#[test]
fn restore_keeps_later_commands() {
    let mut list = vec![1];
    let first = Push(2).apply(&mut list);
    let second = Push(3).apply(&mut list);
    second.commit();
    first.restore(&mut list);
    assert_eq!(list, vec![1, 3]);
}
