use serde::Serialize;
use tracing::debug;

use super::extractor::extract_from;
use super::resolver::PathResolver;
use crate::constants::exit::MAX_BROKEN_EXIT;
use crate::scanner::{SkippedFile, TreeWalker};
use crate::types::{BrokenReason, Link, LinkKind, ProjectRoot, Resolution, SourceFile};

/// Broken internal link with its resolution
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    pub source: String,
    pub line: usize,
    pub text: String,
    pub target: String,
    /// Resolved absolute path, when one could be formed
    pub resolved: Option<String>,
    pub reason: BrokenReason,
}

/// Per-file link counts
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub links: usize,
    pub broken: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkReport {
    pub files_scanned: usize,
    pub total_links: usize,
    pub external: usize,
    pub anchor_only: usize,
    pub internal: usize,
    pub valid: usize,
    pub broken: Vec<BrokenLink>,
    pub skipped: Vec<SkippedFile>,
    pub files: Vec<FileSummary>,
}

impl LinkReport {
    pub fn has_broken(&self) -> bool {
        !self.broken.is_empty()
    }

    /// Broken-link count as a process exit status
    pub fn exit_code(&self) -> u8 {
        self.broken.len().min(MAX_BROKEN_EXIT) as u8
    }

    pub fn count_reason(&self, reason: BrokenReason) -> usize {
        self.broken.iter().filter(|b| b.reason == reason).count()
    }

    fn record(&mut self, link: &Link, resolution: Option<Resolution>) {
        self.total_links += 1;
        match link.kind {
            LinkKind::External => self.external += 1,
            LinkKind::AnchorOnly => self.anchor_only += 1,
            LinkKind::Internal => self.internal += 1,
        }

        match resolution {
            Some(Resolution::Broken { resolved, reason }) => self.broken.push(BrokenLink {
                source: link.source.clone(),
                line: link.line,
                text: link.text.clone(),
                target: link.target.clone(),
                resolved: resolved.map(|p| p.display().to_string()),
                reason,
            }),
            Some(Resolution::Found(_)) => self.valid += 1,
            None => {}
        }
    }
}

/// Runs extraction and resolution over every Markdown source
pub struct LinkChecker {
    root: ProjectRoot,
}

impl LinkChecker {
    pub fn new(root: &ProjectRoot) -> Self {
        Self { root: root.clone() }
    }

    pub fn check(&self, walker: &TreeWalker) -> LinkReport {
        let loaded = walker.load_markdown();
        let mut report = self.check_sources(&loaded.sources);
        report.skipped = loaded.skipped;
        report
    }

    pub fn check_sources(&self, sources: &[SourceFile]) -> LinkReport {
        let resolver = PathResolver::new(&self.root);
        let mut report = LinkReport::default();

        for source in sources {
            let links = extract_from(source);
            let broken_before = report.broken.len();
            debug!("{}: {} links", source.rel_path, links.len());

            for link in &links {
                let resolution = link
                    .is_internal()
                    .then(|| resolver.resolve(source.dir(), &link.file_part));
                report.record(link, resolution);
            }

            report.files_scanned += 1;
            report.files.push(FileSummary {
                path: source.rel_path.clone(),
                links: links.len(),
                broken: report.broken.len() - broken_before,
            });
        }

        report
    }
}
