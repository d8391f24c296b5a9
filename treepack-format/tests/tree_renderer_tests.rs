use treepack_format::tree::render_tree;

#[test]
fn test_two_files_in_one_directory() {
    let rendered = render_tree(&["src/x.js", "src/y.js"]);
    assert_eq!(rendered, "Root/\n└── src\n    ├── x.js\n    └── y.js\n");
}

#[test]
fn test_render_is_deterministic() {
    let paths = ["a/b.txt", "a/c.txt"];
    assert_eq!(render_tree(&paths), render_tree(&paths));
}

#[test]
fn test_empty_input() {
    let paths: [&str; 0] = [];
    assert_eq!(render_tree(&paths), "");
}

#[test]
fn test_single_path_has_no_root_line() {
    assert_eq!(render_tree(&["README.md"]), "└── README.md\n");
    assert_eq!(render_tree(&["docs/guide.md"]), "└── docs\n    └── guide.md\n");
}

#[test]
fn test_insertion_order_not_sorted() {
    let rendered = render_tree(&["zeta.rs", "alpha/b.rs", "zeta/inner.rs", "alpha/a.rs"]);
    let expected = "Root/\n\
                    ├── zeta.rs\n\
                    ├── alpha\n\
                    │   ├── b.rs\n\
                    │   └── a.rs\n\
                    └── zeta\n    \
                        └── inner.rs\n";
    assert_eq!(rendered, expected);
}

#[test]
fn test_continuation_prefixes_for_deep_trees() {
    let rendered = render_tree(&["a/b/c.txt", "a/d.txt", "e.txt"]);
    let expected = "Root/\n\
                    ├── a\n\
                    │   ├── b\n\
                    │   │   └── c.txt\n\
                    │   └── d.txt\n\
                    └── e.txt\n";
    assert_eq!(rendered, expected);
}

#[test]
fn test_backslash_separators_split_segments() {
    let rendered = render_tree(&["src\\lib.rs", "src\\main.rs"]);
    assert_eq!(rendered, "Root/\n└── src\n    ├── lib.rs\n    └── main.rs\n");
}
