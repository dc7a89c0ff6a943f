use crate::github::types::RepositorySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadmeFilter {
    #[default]
    All,
    WithReadme,
    WithoutReadme,
}

impl ReadmeFilter {
    pub fn next(self) -> Self {
        match self {
            ReadmeFilter::All => ReadmeFilter::WithReadme,
            ReadmeFilter::WithReadme => ReadmeFilter::WithoutReadme,
            ReadmeFilter::WithoutReadme => ReadmeFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReadmeFilter::All => "All repos",
            ReadmeFilter::WithReadme => "With README",
            ReadmeFilter::WithoutReadme => "Without README",
        }
    }

    fn accepts(self, repo: &RepositorySummary) -> bool {
        match self {
            ReadmeFilter::All => true,
            ReadmeFilter::WithReadme => repo.has_readme,
            ReadmeFilter::WithoutReadme => !repo.has_readme,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoFilter {
    pub term: String,
    pub readme: ReadmeFilter,
}

impl RepoFilter {
    pub fn is_active(&self) -> bool {
        !self.term.is_empty() || self.readme != ReadmeFilter::All
    }

    pub fn matches(&self, repo: &RepositorySummary) -> bool {
        let term = self.term.to_lowercase();
        let text_match = term.is_empty()
            || repo.name.to_lowercase().contains(&term)
            || repo.description.to_lowercase().contains(&term);
        text_match && self.readme.accepts(repo)
    }

    pub fn apply<'a>(&self, repos: &'a [RepositorySummary]) -> Vec<&'a RepositorySummary> {
        repos.iter().filter(|r| self.matches(r)).collect()
    }
}

pub fn format_updated(time: &chrono::DateTime<chrono::Utc>) -> String {
    time.format("%b %-d, %Y").to_string()
}
