use crate::trie::{PathTrie, TrieNode};
use tracing::debug;

pub const ROOT_LABEL: &str = "Root/";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Renders paths as a box-drawing directory tree.
///
/// Children appear in the order their segment was first seen, so the output is
/// only reproducible for a stable input order. A `Root/` line is emitted when
/// more than one path is given.
pub fn render_tree<S: AsRef<str>>(paths: &[S]) -> String {
    if paths.is_empty() {
        return String::new();
    }

    let trie = PathTrie::from_paths(paths.iter().map(|p| p.as_ref()));
    let mut output = String::new();
    if paths.len() > 1 {
        output.push_str(ROOT_LABEL);
        output.push('\n');
    }
    render_children(trie.root(), "", &mut output);

    debug!("Rendered tree for {} paths", paths.len());
    output
}

fn render_children(node: &TrieNode, prefix: &str, output: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        output.push_str(prefix);
        output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        output.push_str(&child.name);
        output.push('\n');

        if !child.is_leaf() {
            let child_prefix = format!("{}{}", prefix, if is_last { SPACE } else { PIPE });
            render_children(child, &child_prefix, output);
        }
    }
}
