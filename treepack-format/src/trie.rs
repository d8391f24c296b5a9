use tracing::trace;

/// Represents a node in a path trie. Children keep first-seen order.
#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    pub name: String,
    pub children: Vec<TrieNode>,
    pub token_count: Option<usize>,
}

impl TrieNode {
    pub fn new(name: impl Into<String>) -> Self {
        TrieNode {
            name: name.into(),
            children: Vec::new(),
            token_count: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Calculates the total number of tokens in the subtree.
    pub fn calculate_total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .iter()
                .map(|child| child.calculate_total_tokens())
                .sum::<usize>()
    }

    fn child_mut(&mut self, name: &str) -> &mut TrieNode {
        match self.children.iter().position(|child| child.name == name) {
            Some(index) => &mut self.children[index],
            None => {
                self.children.push(TrieNode::new(name));
                let last = self.children.len() - 1;
                &mut self.children[last]
            }
        }
    }
}

/// A trie of `/`-separated relative paths.
#[derive(Debug, Default, Clone)]
pub struct PathTrie {
    root: TrieNode,
}

impl PathTrie {
    pub fn new() -> Self {
        PathTrie {
            root: TrieNode::new(""),
        }
    }

    /// Builds a trie from paths in the given order.
    pub fn from_paths<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut trie = PathTrie::new();
        for path in paths {
            trie.insert(path);
        }
        trie
    }

    /// Inserts a path, returning the node for its last segment.
    pub fn insert(&mut self, path: &str) -> &mut TrieNode {
        trace!("Inserting path into trie: {}", path);
        let mut current_node = &mut self.root;
        for segment in path.split(['/', '\\']).filter(|s| !s.is_empty()) {
            current_node = current_node.child_mut(segment);
        }
        current_node
    }

    /// Inserts a path with its token count.
    pub fn insert_with_tokens(&mut self, path: &str, token_count: usize) {
        let node = self.insert(path);
        if node.token_count.is_some() {
            trace!("Overwriting existing token count for path: {}", path);
        }
        node.token_count = Some(token_count);
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}
