/// First row to draw so the selected row stays visible.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || max_visible_rows == 0 {
        return 0;
    }

    if selected_index >= max_visible_rows {
        let offset = selected_index + 1 - max_visible_rows;
        let last_page = total_rows - max_visible_rows;
        if offset > last_page {
            return last_page;
        }
        return offset;
    }

    0
}

/// Number of rows that fit inside a bordered block of this height.
pub const fn visible_rows(block_height: u16) -> usize {
    block_height.saturating_sub(2) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_below_the_fold_scrolls_just_enough() {
        assert_eq!(scroll_offset(50, 10, 3), 0);
        assert_eq!(scroll_offset(50, 10, 10), 1);
        assert_eq!(scroll_offset(50, 10, 49), 40);
    }

    #[test]
    fn offset_never_passes_the_last_page() {
        assert_eq!(scroll_offset(50, 10, 200), 40);
    }

    #[test]
    fn zero_height_is_safe() {
        assert_eq!(scroll_offset(50, 0, 7), 0);
        assert_eq!(visible_rows(1), 0);
        assert_eq!(visible_rows(12), 10);
    }
}
