use treepack_format::estimate_tokens;

#[test]
fn test_cjk_characters() {
    assert_eq!(estimate_tokens("你好"), 3);
}

#[test]
fn test_ascii_characters() {
    assert_eq!(estimate_tokens("ab"), 1);
    assert_eq!(estimate_tokens("abcd"), 1);
    assert_eq!(estimate_tokens("abcde"), 2);
}

#[test]
fn test_empty_text() {
    assert_eq!(estimate_tokens(""), 0);
}

#[test]
fn test_mixed_text_rounds_up() {
    // 1 CJK (1.5) + 3 other (0.75) = 2.25
    assert_eq!(estimate_tokens("中abc"), 3);
}

#[test]
fn test_range_boundaries() {
    assert_eq!(estimate_tokens("\u{4E00}"), 2);
    assert_eq!(estimate_tokens("\u{9FA5}"), 2);
    // Just outside the ideograph range counts as an ordinary character.
    assert_eq!(estimate_tokens("\u{9FA6}"), 1);
    assert_eq!(estimate_tokens("こんにちは"), 2);
}
