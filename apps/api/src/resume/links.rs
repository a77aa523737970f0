//! Profile-link extraction (LinkedIn, GitHub, LeetCode, personal site).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::ProfileLinks;

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?linkedin\.com/in/[a-z0-9_-]+").expect("valid linkedin regex")
});

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?github\.com/[a-z0-9_-]+").expect("valid github regex")
});

static LEETCODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?leetcode\.com/[a-z0-9_-]+").expect("valid leetcode regex")
});

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)https?://(?:www\.)?[a-z0-9.-]+\.[a-z]{2,}").expect("valid url regex")
});

const PROFILE_HOSTS: [&str; 3] = ["linkedin.com", "github.com", "leetcode.com"];

pub fn extract_profile_links(text: &str) -> ProfileLinks {
    let portfolio = URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|url| !PROFILE_HOSTS.iter().any(|host| url.contains(host)))
        .map(String::from);

    ProfileLinks {
        linkedin: LINKEDIN_RE.find(text).map(|m| m.as_str().to_string()),
        github: GITHUB_RE.find(text).map(|m| m.as_str().to_string()),
        leetcode: LEETCODE_RE.find(text).map(|m| m.as_str().to_string()),
        portfolio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Jane Doe | https://www.linkedin.com/in/jane-doe | \
        https://github.com/janedoe/dotfiles | https://leetcode.com/jdoe | https://janedoe.dev/blog";

    #[test]
    fn test_all_profile_links_found() {
        let links = extract_profile_links(HEADER);
        assert_eq!(
            links.linkedin.as_deref(),
            Some("https://www.linkedin.com/in/jane-doe")
        );
        assert_eq!(links.github.as_deref(), Some("https://github.com/janedoe"));
        assert_eq!(links.leetcode.as_deref(), Some("https://leetcode.com/jdoe"));
        assert_eq!(links.portfolio.as_deref(), Some("https://janedoe.dev"));
    }

    #[test]
    fn test_case_insensitive_hosts() {
        let links = extract_profile_links("HTTPS://GitHub.com/JaneDoe");
        assert_eq!(links.github.as_deref(), Some("HTTPS://GitHub.com/JaneDoe"));
    }

    #[test]
    fn test_portfolio_host_filter_is_case_sensitive() {
        // Only lowercase profile hosts are excluded from the portfolio slot.
        let links = extract_profile_links("HTTPS://GitHub.com/JaneDoe https://github.com/jd");
        assert_eq!(links.portfolio.as_deref(), Some("HTTPS://GitHub.com"));
    }

    #[test]
    fn test_portfolio_skips_profile_hosts() {
        let links = extract_profile_links("https://github.com/x and http://example.org");
        assert_eq!(links.portfolio.as_deref(), Some("http://example.org"));
    }

    #[test]
    fn test_no_links() {
        assert_eq!(extract_profile_links("plain text only"), ProfileLinks::default());
    }
}
