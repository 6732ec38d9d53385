pub mod article;

pub use article::{dedup_by_url, extend_unique, Article};
