pub const fn step_up(index: usize, step: usize) -> usize {
    index.saturating_sub(step)
}

pub const fn step_down(index: usize, step: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    let next = index.saturating_add(step);
    if next >= len {
        len - 1
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_up_stops_at_the_top() {
        assert_eq!(step_up(5, 2), 3);
        assert_eq!(step_up(1, 10), 0);
    }

    #[test]
    fn step_down_stops_at_the_last_row() {
        assert_eq!(step_down(0, 1, 3), 1);
        assert_eq!(step_down(1, 10, 3), 2);
        assert_eq!(step_down(usize::MAX, 1, 3), 2);
    }

    #[test]
    fn step_down_on_empty_list_is_zero() {
        assert_eq!(step_down(4, 1, 0), 0);
    }
}
