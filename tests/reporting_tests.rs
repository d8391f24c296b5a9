use std::path::Path;
use treepack::reporting::{get_file_icon, stats_lines};
use treepack_format::trie::PathTrie;

#[tokio::test]
async fn test_stats_lines_sum_directories() {
    let mut trie = PathTrie::new();
    trie.insert_with_tokens("app/src/main.rs", 10);
    trie.insert_with_tokens("app/src/lib.rs", 5);
    trie.insert_with_tokens("app/README.md", 3);

    let lines = stats_lines(trie.root(), "");
    assert_eq!(
        lines,
        vec![
            "┗━━ 📂 app (~18 tokens)".to_string(),
            "     ┣━━ 📂 src (~15 tokens)".to_string(),
            "     ┃    ┣━━ 🦀 main.rs (~10 tokens)".to_string(),
            "     ┃    ┗━━ 🦀 lib.rs (~5 tokens)".to_string(),
            "     ┗━━ 📝 README.md (~3 tokens)".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_file_icons() {
    assert_eq!(get_file_icon(Path::new("x.py")), "🐍");
    assert_eq!(get_file_icon(Path::new("Makefile")), "📄");
}
