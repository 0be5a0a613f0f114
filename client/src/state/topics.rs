//! Topic-list state for the home page.
//!
//! DESIGN
//! ======
//! The fetched list is kept as-is; search and sort are applied on read by
//! [`visible_topics`] so clearing a search never needs a refetch. List edits
//! that should show before the backend answers go through
//! [`OptimisticCommand`]s.

#[cfg(test)]
#[path = "topics_test.rs"]
mod topics_test;

use std::cmp::Ordering;

use canvas::doc::TopicId;

use super::optimistic::OptimisticCommand;
use crate::net::types::Topic;

/// Sort orders offered on the home page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HomeSort {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
    NodesDesc,
    NodesAsc,
}

impl HomeSort {
    pub const ALL: [Self; 6] =
        [Self::DateDesc, Self::DateAsc, Self::TitleAsc, Self::TitleDesc, Self::NodesDesc, Self::NodesAsc];

    /// `<select>` option value.
    pub fn value(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::NodesDesc => "nodes-desc",
            Self::NodesAsc => "nodes-asc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DateDesc => "Newest First",
            Self::DateAsc => "Oldest First",
            Self::TitleAsc => "Title (A-Z)",
            Self::TitleDesc => "Title (Z-A)",
            Self::NodesDesc => "Most Nodes",
            Self::NodesAsc => "Least Nodes",
        }
    }

    /// Unknown values fall back to the default order.
    pub fn from_value(value: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.value() == value).unwrap_or_default()
    }

    fn compare(self, a: &Topic, b: &Topic) -> Ordering {
        match self {
            Self::DateDesc => b.created_at.cmp(&a.created_at),
            Self::DateAsc => a.created_at.cmp(&b.created_at),
            Self::TitleAsc => title_order(a, b),
            Self::TitleDesc => title_order(b, a),
            Self::NodesDesc => b.node_count.cmp(&a.node_count),
            Self::NodesAsc => a.node_count.cmp(&b.node_count),
        }
    }
}

fn title_order(a: &Topic, b: &Topic) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase()).then_with(|| a.title.cmp(&b.title))
}

/// Home-page topic list with its search and sort controls.
#[derive(Clone, Debug, Default)]
pub struct TopicsState {
    pub items: Vec<Topic>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: String,
    pub sort: HomeSort,
}

impl TopicsState {
    pub fn visible(&self) -> Vec<Topic> {
        visible_topics(&self.items, &self.search, self.sort)
    }

    pub fn find(&self, id: TopicId) -> Option<&Topic> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }
}

/// Case-insensitive title/description filter, then a stable sort.
pub fn visible_topics(items: &[Topic], search: &str, sort: HomeSort) -> Vec<Topic> {
    let needle = search.to_lowercase();
    let mut out: Vec<Topic> = items
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| sort.compare(a, b));
    out
}

/// `"1 topic"` / `"N topics"`.
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}

/// `3 results for "rust"`.
pub fn results_label(count: usize, search: &str) -> String {
    format!("{} for \"{search}\"", count_label(count, "result", "results"))
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Drop a topic from the list ahead of the backend delete.
#[derive(Clone, Copy, Debug)]
pub struct RemoveTopic(pub TopicId);

impl OptimisticCommand for RemoveTopic {
    type Target = Vec<Topic>;
    /// The removed topic and where it sat.
    type Undo = Option<(usize, Topic)>;

    fn mutate(&self, target: &mut Vec<Topic>) -> Self::Undo {
        let index = target.iter().position(|t| t.id == self.0)?;
        Some((index, target.remove(index)))
    }

    fn revert(undo: Self::Undo, target: &mut Vec<Topic>) {
        reinsert(undo, target);
    }
}

/// Put a topic back at its old index, unless it has reappeared meanwhile.
fn reinsert(entry: Option<(usize, Topic)>, target: &mut Vec<Topic>) {
    let Some((index, topic)) = entry else {
        return;
    };
    if target.iter().any(|t| t.id == topic.id) {
        return;
    }
    target.insert(index.min(target.len()), topic);
}

/// Put a newly created topic at the top of the list.
#[derive(Clone, Debug)]
pub struct PrependTopic(pub Topic);

impl OptimisticCommand for PrependTopic {
    type Target = Vec<Topic>;
    /// The prepended id, and the entry it replaced if it was already listed.
    type Undo = (TopicId, Option<(usize, Topic)>);

    fn mutate(&self, target: &mut Vec<Topic>) -> Self::Undo {
        let replaced = target
            .iter()
            .position(|t| t.id == self.0.id)
            .map(|index| (index, target.remove(index)));
        target.insert(0, self.0.clone());
        (self.0.id, replaced)
    }

    fn revert((id, replaced): Self::Undo, target: &mut Vec<Topic>) {
        target.retain(|t| t.id != id);
        reinsert(replaced, target);
    }
}

/// Flip a topic's public flag ahead of the backend update.
#[derive(Clone, Copy, Debug)]
pub struct SetVisibility {
    pub id: TopicId,
    pub is_public: bool,
}

impl OptimisticCommand for SetVisibility {
    type Target = Vec<Topic>;
    /// The topic and its previous flag, if it was listed.
    type Undo = Option<(TopicId, bool)>;

    fn mutate(&self, target: &mut Vec<Topic>) -> Self::Undo {
        let topic = target.iter_mut().find(|t| t.id == self.id)?;
        let previous = std::mem::replace(&mut topic.is_public, self.is_public);
        Some((self.id, previous))
    }

    fn revert(undo: Self::Undo, target: &mut Vec<Topic>) {
        let Some((id, previous)) = undo else {
            return;
        };
        if let Some(topic) = target.iter_mut().find(|t| t.id == id) {
            topic.is_public = previous;
        }
    }
}
