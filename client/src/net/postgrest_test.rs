use uuid::Uuid;

use super::*;

#[test]
fn table_query_builds_path_and_ordered_params() {
    let q = Query::table("topics_with_counts").select("*").order("created_at", Direction::Desc);
    assert_eq!(q.path(), "/rest/v1/topics_with_counts");
    assert_eq!(
        q.params(),
        &[("select".to_owned(), "*".to_owned()), ("order".to_owned(), "created_at.desc".to_owned())]
    );
}

#[test]
fn eq_and_in_filters_use_operator_prefixes() {
    let id = Uuid::nil();
    let q = Query::table("learning_nodes").eq("topic_id", id).in_list("id", &[1, 2, 3]);
    assert_eq!(q.param_value("topic_id"), Some("eq.00000000-0000-0000-0000-000000000000"));
    assert_eq!(q.param_value("id"), Some("in.(1,2,3)"));
}

#[test]
fn or_groups_filters() {
    let q = Query::table("node_connections").or(&[eq_filter("from_node_id", "a"), eq_filter("to_node_id", "a")]);
    assert_eq!(q.param_value("or"), Some("(from_node_id.eq.a,to_node_id.eq.a)"));
}

#[test]
fn in_filter_lists_values() {
    assert_eq!(in_filter("from_node_id", &["x", "y"]), "from_node_id.in.(x,y)");
}

#[test]
fn range_is_inclusive() {
    let q = Query::table("t").range(12, 24);
    assert_eq!(q.param_value("offset"), Some("12"));
    assert_eq!(q.param_value("limit"), Some("13"));
}

#[test]
fn ilike_quotes_user_input() {
    assert_eq!(ilike_filter("title", "rust"), "title.ilike.\"*rust*\"");
    assert_eq!(ilike_filter("title", "a,(b)"), "title.ilike.\"*a,(b)*\"");
    assert_eq!(ilike_filter("title", "say \"hi\""), "title.ilike.\"*say \\\"hi\\\"*\"");
}

#[test]
fn ilike_matches_wildcards_literally() {
    assert_eq!(ilike_filter("title", "a*b"), "title.ilike.\"*ab*\"");
    assert_eq!(ilike_filter("title", "50%"), "title.ilike.\"*50\\\\%*\"");
    assert_eq!(ilike_filter("title", "snake_case"), "title.ilike.\"*snake\\\\_case*\"");
}
