use tracing::{debug, trace};

/// One exclusion rule read from an ignore-pattern file such as `.gitignore`.
///
/// Only a subset of gitignore is understood: bare names, slash-containing
/// nested paths and a single leading `*` wildcard. Negation (`!pattern`) and
/// `**` globs are kept verbatim and will simply never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    pub pattern: String,
    pub is_directory: bool,
}

impl IgnoreRule {
    pub fn new(pattern: impl Into<String>, is_directory: bool) -> Self {
        IgnoreRule {
            pattern: pattern.into(),
            is_directory,
        }
    }
}

/// Parses ignore-pattern file text into rules, preserving file order.
pub fn parse_ignore_rules(text: &str) -> Vec<IgnoreRule> {
    let rules: Vec<IgnoreRule> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let is_directory = line.ends_with('/');
            let pattern = line.strip_suffix('/').unwrap_or(line);
            trace!("Parsed ignore rule '{}' (directory: {})", pattern, is_directory);
            IgnoreRule::new(pattern, is_directory)
        })
        .collect();

    debug!("Parsed {} ignore rules", rules.len());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comments_blank_lines_and_directories() {
        let rules = parse_ignore_rules("# comment\n\nnode_modules/\n*.log\n");
        assert_eq!(
            rules,
            vec![
                IgnoreRule::new("node_modules", true),
                IgnoreRule::new("*.log", false),
            ]
        );
    }

    #[test]
    fn trims_whitespace_and_crlf() {
        let rules = parse_ignore_rules("  dist/  \r\n\t# indented comment\r\n.env\r\n");
        assert_eq!(
            rules,
            vec![IgnoreRule::new("dist", true), IgnoreRule::new(".env", false)]
        );
    }

    #[test]
    fn strips_only_one_trailing_slash() {
        let rules = parse_ignore_rules("cache//\n");
        assert_eq!(rules, vec![IgnoreRule::new("cache/", true)]);
    }

    #[test]
    fn empty_text_has_no_rules() {
        assert!(parse_ignore_rules("").is_empty());
        assert!(parse_ignore_rules("\n\n# only comments\n").is_empty());
    }
}
