const WORDS_PER_MINUTE: usize = 200;

/// Word-count estimate used when a post payload leaves reading_minutes at 0.
pub fn estimate_reading_minutes(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_reads_in_zero_minutes() {
        assert_eq!(estimate_reading_minutes(""), 0);
    }

    #[test]
    fn short_content_rounds_up_to_one() {
        assert_eq!(estimate_reading_minutes("a handful of words"), 1);
    }

    #[test]
    fn long_content_scales_with_word_count() {
        let content = vec!["word"; 450].join(" ");
        assert_eq!(estimate_reading_minutes(&content), 3);
    }
}
