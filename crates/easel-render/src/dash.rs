// crates/easel-render/src/dash.rs
use glam::Vec2;

/// Patterns that would cut one line into more pieces than this draw solid.
pub const MAX_DASH_PIECES: f32 = 100_000.0;

/// Splits the line `from -> to` into its visible dash pieces.
///
/// Canvas rules apply: the pattern alternates on/off lengths and repeats, an
/// odd-length pattern is concatenated with itself, and `offset` shifts where
/// along the pattern the line starts. An empty, all-zero or invalid pattern
/// draws the line solid, as does a pattern fine enough to exceed
/// [`MAX_DASH_PIECES`] along the line.
pub fn dash_segments(from: Vec2, to: Vec2, pattern: &[f32], offset: f32) -> Vec<(Vec2, Vec2)> {
    let valid = pattern.iter().all(|value| value.is_finite() && *value >= 0.0);
    let total: f32 = pattern.iter().sum();
    if pattern.is_empty() || !valid || total <= 0.0 || !offset.is_finite() {
        return vec![(from, to)];
    }

    let length = from.distance(to);
    if length == 0.0 {
        return Vec::new();
    }

    let smallest = pattern.iter().copied().filter(|value| *value > 0.0).fold(f32::INFINITY, f32::min);
    if length / smallest > MAX_DASH_PIECES {
        return vec![(from, to)];
    }

    let mut lengths = pattern.to_vec();
    if lengths.len() % 2 == 1 {
        lengths.extend_from_slice(pattern);
    }
    let total = total * (lengths.len() / pattern.len()) as f32;

    // Find the pattern entry the line starts in, and how much of it is left.
    let mut phase = offset.rem_euclid(total);
    let mut index = 0;
    for _ in 0..lengths.len() {
        if phase < lengths[index] {
            break;
        }
        phase -= lengths[index];
        index = (index + 1) % lengths.len();
    }
    if phase >= lengths[index] {
        phase = 0.0;
    }
    let mut remaining = lengths[index] - phase;

    let direction = (to - from) / length;
    let mut segments = Vec::new();
    let mut position = 0.0;
    while position < length {
        let end = (position + remaining).min(length);
        // Entries below the float spacing at `position` can never advance.
        if remaining > 0.0 && end <= position {
            return vec![(from, to)];
        }
        if index % 2 == 0 && end > position {
            segments.push((from + direction * position, from + direction * end));
        }
        position = end;
        index = (index + 1) % lengths.len();
        remaining = lengths[index];
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(segments: &[(Vec2, Vec2)]) -> Vec<(f32, f32)> {
        segments.iter().map(|(a, b)| (a.x, b.x)).collect()
    }

    #[test]
    fn test_pattern_without_offset() {
        let segments = dash_segments(Vec2::ZERO, Vec2::new(30.0, 0.0), &[10.0, 5.0], 0.0);
        assert_eq!(spans(&segments), vec![(0.0, 10.0), (15.0, 25.0)]);
    }

    #[test]
    fn test_offset_shifts_pattern_start() {
        let segments = dash_segments(Vec2::ZERO, Vec2::new(30.0, 0.0), &[10.0, 5.0], 3.0);
        assert_eq!(spans(&segments), vec![(0.0, 7.0), (12.0, 22.0), (27.0, 30.0)]);
    }

    #[test]
    fn test_offset_wraps_by_pattern_length() {
        let a = dash_segments(Vec2::ZERO, Vec2::new(40.0, 0.0), &[10.0, 5.0], 2.0);
        let b = dash_segments(Vec2::ZERO, Vec2::new(40.0, 0.0), &[10.0, 5.0], 17.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_odd_pattern_is_doubled() {
        // [4] behaves as [4, 4]
        let segments = dash_segments(Vec2::ZERO, Vec2::new(16.0, 0.0), &[4.0], 0.0);
        assert_eq!(spans(&segments), vec![(0.0, 4.0), (8.0, 12.0)]);
    }

    #[test]
    fn test_invalid_patterns_draw_solid() {
        let from = Vec2::ZERO;
        let to = Vec2::new(0.0, 12.0);
        assert_eq!(dash_segments(from, to, &[], 0.0), vec![(from, to)]);
        assert_eq!(dash_segments(from, to, &[0.0, 0.0], 0.0), vec![(from, to)]);
        assert_eq!(dash_segments(from, to, &[5.0, -1.0], 0.0), vec![(from, to)]);
    }

    #[test]
    fn test_pattern_too_fine_to_advance_draws_solid() {
        let from = Vec2::ZERO;
        let to = Vec2::new(100.0, 0.0);
        assert_eq!(dash_segments(from, to, &[1e-10, 1e-10], 0.0), vec![(from, to)]);
        assert_eq!(dash_segments(from, to, &[1e-10, 1e-10], 7.5), vec![(from, to)]);
        assert_eq!(dash_segments(from, to, &[50.0, 1e-10], 0.0), vec![(from, to)]);
    }

    #[test]
    fn test_piece_limit_keeps_fine_patterns_that_fit() {
        let segments = dash_segments(Vec2::ZERO, Vec2::new(100.0, 0.0), &[0.5, 0.5], 0.0);
        assert_eq!(segments.len(), 100);
        assert_eq!(segments[99], (Vec2::new(99.0, 0.0), Vec2::new(99.5, 0.0)));
    }

    #[test]
    fn test_vertical_line() {
        let segments = dash_segments(Vec2::new(5.0, 0.0), Vec2::new(5.0, 20.0), &[10.0, 5.0], 0.0);
        assert_eq!(segments[0], (Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0)));
        assert_eq!(segments[1], (Vec2::new(5.0, 15.0), Vec2::new(5.0, 20.0)));
    }
}
