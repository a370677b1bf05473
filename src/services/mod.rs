//! Core services: inspection, archive writing, retry, reporting, and progress

pub mod archive;
pub mod format;
pub mod inspect;
pub mod progress;
pub mod report;
pub mod retry;
