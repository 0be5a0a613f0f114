//! Paged public-topic feed shared by the explore and user pages.
//!
//! DESIGN
//! ======
//! Each new search or sort starts a new generation. Responses carry the
//! generation they were requested under, and anything older than the current
//! one is dropped, so a slow first page can never overwrite a newer search.

#[cfg(test)]
#[path = "explore_test.rs"]
mod explore_test;

use crate::net::types::{ExploreQuery, ExploreSort, PublicTopic, TopicPage};

/// Search debounce for the explore filters, in milliseconds.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

#[derive(Clone, Debug, Default)]
pub struct ExploreFeed {
    /// Text in the search box.
    pub search_input: String,
    /// The query the listed pages belong to.
    pub query: ExploreQuery,
    pub topics: Vec<PublicTopic>,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    generation: u64,
}

impl ExploreFeed {
    /// Drop loaded pages and request page 0 of `search`/`sort`.
    pub fn restart(&mut self, search: &str, sort: ExploreSort) -> (u64, ExploreQuery) {
        self.generation += 1;
        self.query = ExploreQuery { search: search.trim().to_owned(), sort, page: 0 };
        self.topics.clear();
        self.has_more = false;
        self.loading = true;
        self.loading_more = false;
        self.error = None;
        (self.generation, self.query.clone())
    }

    /// Next page of the current query, unless one is in flight or none is left.
    pub fn next_page(&mut self) -> Option<(u64, ExploreQuery)> {
        if self.loading || self.loading_more || !self.has_more {
            return None;
        }
        self.loading_more = true;
        let query = ExploreQuery { page: self.query.page + 1, ..self.query.clone() };
        Some((self.generation, query))
    }

    /// Apply a page response. Returns false when it was stale.
    pub fn accept(&mut self, generation: u64, query: &ExploreQuery, result: Result<TopicPage, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        self.loading_more = false;
        match result {
            Ok(page) => {
                self.query.page = query.page;
                self.has_more = page.has_more;
                self.topics.extend(page.topics);
            }
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Whether the listed results were filtered by a search term.
    pub fn is_searching(&self) -> bool {
        !self.query.search.is_empty()
    }

    /// Every page has been loaded and there was at least one topic.
    pub fn reached_end(&self) -> bool {
        !self.loading && !self.has_more && !self.topics.is_empty()
    }
}

/// Heading and message for an empty feed.
pub fn empty_feed_text(searching: bool) -> (&'static str, &'static str) {
    if searching {
        ("No results found", "Try adjusting your search terms")
    } else {
        ("No public topics yet", "Be the first to share your learning journey!")
    }
}
