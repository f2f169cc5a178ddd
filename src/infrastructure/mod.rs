pub mod document_analysis;
pub mod observability;
pub mod search;
pub mod speech;
pub mod storage;
