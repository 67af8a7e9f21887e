/// Whether `current_hour` falls inside the quiet window `[start, end)`.
///
/// A window whose start is after its end wraps past midnight. Equal start and
/// end hours describe an empty window, so nothing is ever quiet.
pub fn is_quiet(current_hour: u32, quiet_start_hour: u32, quiet_end_hour: u32) -> bool {
    if quiet_start_hour <= quiet_end_hour {
        quiet_start_hour <= current_hour && current_hour < quiet_end_hour
    } else {
        current_hour >= quiet_start_hour || current_hour < quiet_end_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_window() {
        assert!(is_quiet(23, 22, 7));
        assert!(is_quiet(6, 22, 7));
        assert!(is_quiet(0, 22, 7));
        assert!(!is_quiet(10, 22, 7));
    }

    #[test]
    fn test_wrapping_window_boundaries() {
        assert!(is_quiet(22, 22, 7));
        assert!(!is_quiet(7, 22, 7));
        assert!(!is_quiet(21, 22, 7));
    }

    #[test]
    fn test_non_wrapping_window() {
        assert!(is_quiet(12, 9, 17));
        assert!(is_quiet(9, 9, 17));
        assert!(!is_quiet(17, 9, 17));
        assert!(!is_quiet(8, 9, 17));
    }

    #[test]
    fn test_zero_width_window_is_never_quiet() {
        for hour in 0..24 {
            assert!(!is_quiet(hour, 9, 9));
        }
    }
}
