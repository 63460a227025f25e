pub const ZOOM_LEVELS: [u32; 14] = [
    25, 50, 75, 100, 125, 150, 175, 200, 250, 300, 350, 400, 450, 500,
];
pub const ZOOM_DEFAULT: u32 = 100;
pub const ZOOM_MIN: u32 = 25;
pub const ZOOM_MAX: u32 = 500;

const EFFECTIVE_MIN_PT: u32 = 8;
const EFFECTIVE_MAX_PT: u32 = 500;

/// Next level above `current`, or `current` when already at the top.
pub fn zoom_in(current: u32) -> u32 {
    ZOOM_LEVELS
        .iter()
        .copied()
        .find(|&level| level > current)
        .unwrap_or(current.max(ZOOM_MAX))
}

/// Next level below `current`, or `current` when already at the bottom.
pub fn zoom_out(current: u32) -> u32 {
    ZOOM_LEVELS
        .iter()
        .rev()
        .copied()
        .find(|&level| level < current)
        .unwrap_or(current.min(ZOOM_MIN))
}

/// Clamps a persisted zoom value into the supported range.
pub fn sanitize(zoom: u32) -> u32 {
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

/// Font size in points actually handed to the editor.
pub fn effective_font_size(font_size: u32, zoom: u32) -> u32 {
    (font_size * zoom / 100).clamp(EFFECTIVE_MIN_PT, EFFECTIVE_MAX_PT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_in_steps_through_levels() {
        assert_eq!(zoom_in(100), 125);
        assert_eq!(zoom_in(200), 250);
        assert_eq!(zoom_in(500), 500);
        // off-grid values snap to the next level
        assert_eq!(zoom_in(110), 125);
    }

    #[test]
    fn test_zoom_out_steps_through_levels() {
        assert_eq!(zoom_out(100), 75);
        assert_eq!(zoom_out(250), 200);
        assert_eq!(zoom_out(25), 25);
        assert_eq!(zoom_out(110), 100);
    }

    #[test]
    fn test_effective_font_size_is_clamped() {
        assert_eq!(effective_font_size(16, 100), 16);
        assert_eq!(effective_font_size(16, 150), 24);
        assert_eq!(effective_font_size(16, 25), 8);
        assert_eq!(effective_font_size(72, 500), 360);
        assert_eq!(effective_font_size(8, 25), 8);
    }

    #[test]
    fn test_sanitize_bounds() {
        assert_eq!(sanitize(0), 25);
        assert_eq!(sanitize(900), 500);
        assert_eq!(sanitize(175), 175);
    }
}
