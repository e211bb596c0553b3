mod board;
mod domain;
mod import;
mod router;
mod views;

pub use board::{PostingBoard, PostingPage, PostingPageView, DEFAULT_PAGE_SIZE};
pub use domain::{JobPosting, PostingQuery};
pub use import::{PostingCsvImporter, PostingImportError};
pub use router::posting_router;
pub use views::{JobCardView, JobDetailView};
