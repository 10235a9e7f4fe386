pub mod checker;
pub mod extractor;
pub mod resolver;

pub use checker::{BrokenLink, FileSummary, LinkChecker, LinkReport};
pub use extractor::{classify, extract_links};
pub use resolver::PathResolver;
