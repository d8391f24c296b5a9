//! Approximate token counting for display.
//!
//! This is a heuristic, not a tokenizer: CJK ideographs count as 1.5 tokens
//! and every other character as 0.25. Never rely on it for correctness.

const CJK_START: char = '\u{4E00}';
const CJK_END: char = '\u{9FA5}';

/// Estimates the token count of `text`, rounding up.
pub fn estimate_tokens(text: &str) -> usize {
    let (cjk, other) = text.chars().fold((0usize, 0usize), |(cjk, other), c| {
        if (CJK_START..=CJK_END).contains(&c) {
            (cjk + 1, other)
        } else {
            (cjk, other + 1)
        }
    });
    // ceil(cjk * 1.5 + other * 0.25) in quarters
    (cjk * 6 + other).div_ceil(4)
}
