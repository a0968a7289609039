pub mod cache;
pub mod document;
pub mod extractor;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod storage;
