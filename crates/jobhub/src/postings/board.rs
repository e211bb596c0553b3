use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{JobPosting, PostingQuery};
use super::views::JobCardView;

pub const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory catalogue of postings backing the list and detail pages.
#[derive(Debug)]
pub struct PostingBoard {
    postings: RwLock<Vec<JobPosting>>,
    page_size: usize,
}

impl Default for PostingBoard {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// One page of matching postings, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingPage {
    pub items: Vec<JobPosting>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostingPageView {
    pub items: Vec<JobCardView>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl PostingPage {
    pub fn cards(&self, now: DateTime<Utc>) -> PostingPageView {
        PostingPageView {
            items: self
                .items
                .iter()
                .map(|posting| JobCardView::from_posting(posting, now))
                .collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

impl PostingBoard {
    pub fn new(page_size: usize) -> Self {
        Self {
            postings: RwLock::new(Vec::new()),
            page_size: page_size.max(1),
        }
    }

    pub fn with_postings(page_size: usize, postings: Vec<JobPosting>) -> Self {
        let board = Self::new(page_size);
        board.replace_all(postings);
        board
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Adds a posting, replacing any existing posting with the same id.
    pub fn upsert(&self, posting: JobPosting) {
        let mut guard = self.postings.write().unwrap_or_else(PoisonError::into_inner);
        match guard.iter_mut().find(|existing| existing.id == posting.id) {
            Some(existing) => *existing = posting,
            None => guard.push(posting),
        }
    }

    pub fn replace_all(&self, postings: Vec<JobPosting>) {
        let mut guard = self.postings.write().unwrap_or_else(PoisonError::into_inner);
        *guard = postings;
    }

    pub fn len(&self) -> usize {
        self.postings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<JobPosting> {
        let guard = self.postings.read().unwrap_or_else(PoisonError::into_inner);
        guard.iter().find(|posting| posting.slug == slug).cloned()
    }

    /// Active postings matching the query, ordered by creation time descending.
    pub fn search(&self, query: &PostingQuery) -> PostingPage {
        let guard = self.postings.read().unwrap_or_else(PoisonError::into_inner);
        let mut matching: Vec<&JobPosting> =
            guard.iter().filter(|posting| query.matches(posting)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total_count = matching.len();
        let page = query.page_number();
        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .cloned()
            .collect();

        PostingPage {
            items,
            page,
            page_size: self.page_size,
            total_count,
            total_pages: total_count.div_ceil(self.page_size),
        }
    }
}
