use super::*;

// =============================================================
// Hero
// =============================================================

#[test]
fn hero_counts_the_whole_collection() {
    assert_eq!(hero_subtitle(0), "0 topics in your collection");
    assert_eq!(hero_subtitle(1), "1 topic in your collection");
    assert_eq!(hero_subtitle(7), "7 topics in your collection");
}

// =============================================================
// Empty state
// =============================================================

#[test]
fn empty_collection_invites_a_first_topic() {
    let (title, message) = empty_state(false);
    assert_eq!(title, "Start Your Journey");
    assert!(message.starts_with("Create your first topic"));
}

#[test]
fn empty_search_suggests_another_term() {
    let (title, message) = empty_state(true);
    assert_eq!(title, "No matches found");
    assert!(message.contains("different search term"));
}
