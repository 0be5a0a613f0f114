use uuid::Uuid;

use super::*;

#[test]
fn checking_appends_once() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ids = Vec::new();
    toggle_id(&mut ids, b, true);
    toggle_id(&mut ids, a, true);
    toggle_id(&mut ids, b, true);
    assert_eq!(ids, vec![b, a]);
}

#[test]
fn unchecking_removes() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let mut ids = vec![a, b];
    toggle_id(&mut ids, a, false);
    assert_eq!(ids, vec![b]);
    toggle_id(&mut ids, a, false);
    assert_eq!(ids, vec![b]);
}
