use std::path::Path;
use tracing::{debug, info};
use treepack_format::estimate_tokens;
use treepack_format::trie::{PathTrie, TrieNode};
use treepack_format::FileEntry;

/// Logs an approximate per-file token breakdown of the selected entries.
pub fn print_stats<'a, I>(entries: I)
where
    I: IntoIterator<Item = &'a FileEntry>,
{
    debug!("Printing statistics for token estimates");
    let mut trie = PathTrie::new();
    for entry in entries {
        trie.insert_with_tokens(&entry.path, estimate_tokens(&entry.content));
    }

    info!(
        "Overall (~{} tokens, approximate)",
        trie.root().calculate_total_tokens()
    );
    for line in stats_lines(trie.root(), "") {
        info!("{}", line);
    }
}

/// Renders the stats tree as lines, directories first showing subtree totals.
pub fn stats_lines(node: &TrieNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let count = node.children.len();

    for (i, child) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        if child.is_leaf() {
            lines.push(format!(
                "{}{} {} {} (~{} tokens)",
                prefix,
                connector,
                get_file_icon(Path::new(&child.name)),
                child.name,
                child.token_count.unwrap_or(0)
            ));
        } else {
            lines.push(format!(
                "{}{} 📂 {} (~{} tokens)",
                prefix,
                connector,
                child.name,
                child.calculate_total_tokens()
            ));
            let child_prefix = format!("{}{}    ", prefix, if is_last { " " } else { "┃" });
            lines.extend(stats_lines(child, &child_prefix));
        }
    }
    lines
}

pub fn get_file_icon(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => "🦀",
        Some("py" | "pyi") => "🐍",
        Some("js" | "mjs" | "cjs") => "🟨",
        Some("ts" | "tsx") => "🔷",
        Some("go") => "🐹",
        Some("rb") => "💎",
        Some("java" | "kt") => "☕",
        Some("html" | "htm") => "🌐",
        Some("css" | "scss") => "🎨",
        Some("json" | "yaml" | "yml" | "toml" | "ini") => "⚙️",
        Some("md" | "markdown") => "📝",
        Some("sh" | "bash" | "zsh") => "🐚",
        _ => "📄",
    }
}
