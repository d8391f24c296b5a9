//! Property-based tests for path filtering.

use proptest::prelude::*;
use treepack_format::filter::PathFilter;
use treepack_format::ignore::parse_ignore_rules;

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}",
        Just("node_modules".to_string()),
        Just("target".to_string()),
        Just(".git".to_string()),
    ]
}

fn path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(segment_strategy(), 0..4),
        "[a-z]{1,6}\\.(rs|log|png|txt|lock)",
    )
        .prop_map(|(mut segments, file)| {
            segments.push(file);
            segments.join("/")
        })
}

proptest! {
    #[test]
    fn adding_a_denied_directory_never_unexcludes(
        paths in prop::collection::vec(path_strategy(), 1..16),
        dir in "[a-z][a-z0-9_]{0,6}",
        rules in "(\\*\\.log\n|docs/\n|\\.env\n){0,3}",
    ) {
        let mut filter = PathFilter::default().with_rules(parse_ignore_rules(&rules));
        let before: Vec<bool> = paths.iter().map(|p| filter.should_ignore(p)).collect();

        filter.add_ignored_dir(dir.clone());
        for (path, was_ignored) in paths.iter().zip(before) {
            let now_ignored = filter.should_ignore(path);
            prop_assert!(!was_ignored || now_ignored, "{} was un-excluded", path);
            if path.split('/').rev().skip(1).any(|segment| segment == dir) {
                prop_assert!(now_ignored, "{} should be excluded by {}", path, dir);
            }
        }
    }

    #[test]
    fn adding_a_denied_suffix_never_unexcludes(
        paths in prop::collection::vec(path_strategy(), 1..16),
        suffix in "\\.(rs|txt|md|toml)",
    ) {
        let mut filter = PathFilter::default();
        let before: Vec<bool> = paths.iter().map(|p| filter.should_ignore(p)).collect();

        filter.add_ignored_suffix(&suffix);
        for (path, was_ignored) in paths.iter().zip(before) {
            let now_ignored = filter.should_ignore(path);
            prop_assert!(!was_ignored || now_ignored, "{} was un-excluded", path);
            if path.ends_with(suffix.as_str()) {
                prop_assert!(now_ignored);
            }
        }
    }
}
