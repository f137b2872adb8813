//! Circular seek dial: ring geometry and rendering.
//!
//! The dial maps a click or drag over a ring-shaped progress indicator to
//! a playback offset, and renders the current offset back as a filled arc.
//! Only the annular band between 70% of the outer radius and the outer
//! radius accepts seek gestures; the area inside the ring stays free for
//! the play/pause tap, and strays outside the ring are ignored entirely.

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// The inner edge of the tappable band, as a fraction of the outer radius.
pub const INNER_RADIUS_RATIO: f64 = 0.7;

/// Distance of point `(x, y)` from the center of a `width` x `height`
/// surface, together with the surface's band radii.
fn radii(width: f64, height: f64, x: f64, y: f64) -> (f64, f64, f64, f64, f64) {
    let cx = width / 2.0;
    let cy = height / 2.0;
    let dx = x - cx;
    let dy = y - cy;
    let r = (dx * dx + dy * dy).sqrt();
    let outer = cx.min(cy);
    let inner = INNER_RADIUS_RATIO * outer;
    (dx, dy, r, inner, outer)
}

/// Angle of `(x, y)` around the ring in degrees, `0` at 12 o'clock,
/// growing clockwise, in `[0, 360)`. `None` when the point misses the
/// tappable band.
pub fn ring_hit(width: f64, height: f64, x: f64, y: f64) -> Option<f64> {
    let (dx, dy, r, inner, outer) = radii(width, height, x, y);
    if r < inner || r > outer {
        return None;
    }

    let mut angle = dy.atan2(dx).to_degrees();
    angle += 90.0;
    if angle < 0.0 {
        angle += 360.0;
    }
    Some(angle)
}

/// True when `(x, y)` lies strictly inside the ring's inner circle (the
/// independently tappable center).
pub fn inner_hit(width: f64, height: f64, x: f64, y: f64) -> bool {
    let (_, _, r, inner, _) = radii(width, height, x, y);
    r < inner
}

/// Map a point on the band to a target progress value in `[0, max]`.
pub fn seek_target(width: f64, height: f64, x: f64, y: f64, max: u64) -> Option<u64> {
    ring_hit(width, height, x, y).map(|angle| ((angle / 360.0) * max as f64).round() as u64)
}

/// Angle swept by the current playback position, in degrees `[0, 360]`.
pub fn progress_angle(position: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0) * 360.0
}

/// Ring-shaped progress widget. Cells whose center falls inside the band
/// are painted filled up to the progress angle and hollow beyond it, so
/// the drawn ring is exactly the surface `ring_hit` accepts clicks on.
pub struct SeekDial {
    pub position: Duration,
    pub duration: Duration,
    pub playing: bool,
}

impl Widget for SeekDial {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let w = area.width as f64;
        let h = area.height as f64;
        let swept = progress_angle(self.position, self.duration);

        let filled = Style::default().fg(Color::Cyan);
        let hollow = Style::default().fg(Color::DarkGray);

        for row in 0..area.height {
            for col in 0..area.width {
                // Same cell-center coordinates the mouse handler uses.
                let x = col as f64 + 0.5;
                let y = row as f64 + 0.5;
                let Some(angle) = ring_hit(w, h, x, y) else {
                    continue;
                };

                let cell = &mut buf[(area.x + col, area.y + row)];
                if angle <= swept {
                    cell.set_symbol("█").set_style(filled);
                } else {
                    cell.set_symbol("░").set_style(hollow);
                }
            }
        }

        // Center text: elapsed / total over a play-state glyph.
        let time = format!(
            "{} / {}",
            format_mmss(self.position),
            format_mmss(self.duration)
        );
        let glyph = if self.playing { "▶" } else { "⏸" };

        let mid = area.height / 2;
        draw_centered(buf, area, mid.saturating_sub(1), &time);
        draw_centered(buf, area, mid, glyph);
    }
}

fn draw_centered(buf: &mut Buffer, area: Rect, row: u16, text: &str) {
    if row >= area.height {
        return;
    }
    let len = text.chars().count() as u16;
    if len > area.width {
        return;
    }
    let x = area.x + (area.width - len) / 2;
    buf.set_string(x, area.y + row, text, Style::default());
}

/// Format a `Duration` as `MM:SS`.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 100.0;
    const H: f64 = 100.0;

    // For a 100x100 surface: center (50, 50), outer radius 50, inner 35.

    #[test]
    fn band_accepts_points_between_inner_and_outer_radius() {
        // Straight up from center, 40 units out: inside the band.
        assert!(ring_hit(W, H, 50.0, 10.0).is_some());
        // Straight right, 45 out.
        assert!(ring_hit(W, H, 95.0, 50.0).is_some());
    }

    #[test]
    fn band_rejects_center_and_far_field() {
        // Dead center.
        assert!(ring_hit(W, H, 50.0, 50.0).is_none());
        // Inside the inner radius (30 < 35).
        assert!(ring_hit(W, H, 50.0, 20.0).is_none());
        // Outside the outer radius (corner, r ≈ 70.7).
        assert!(ring_hit(W, H, 0.0, 0.0).is_none());
    }

    #[test]
    fn inner_hit_is_the_complementary_center_region() {
        assert!(inner_hit(W, H, 50.0, 50.0));
        assert!(inner_hit(W, H, 50.0, 20.0));
        assert!(!inner_hit(W, H, 50.0, 10.0));
        assert!(!inner_hit(W, H, 0.0, 0.0));
    }

    #[test]
    fn twelve_oclock_maps_to_zero() {
        let angle = ring_hit(W, H, 50.0, 10.0).unwrap();
        assert!(angle.abs() < 1e-9);
        assert_eq!(seek_target(W, H, 50.0, 10.0, 360_000), Some(0));
    }

    #[test]
    fn quarter_turn_clockwise_maps_to_quarter_progress() {
        // 3 o'clock: 90 degrees.
        let angle = ring_hit(W, H, 90.0, 50.0).unwrap();
        assert!((angle - 90.0).abs() < 1e-9);
        assert_eq!(seek_target(W, H, 90.0, 50.0, 1000), Some(250));

        // 6 o'clock: 180 degrees -> half.
        assert_eq!(seek_target(W, H, 50.0, 90.0, 1000), Some(500));

        // 9 o'clock: 270 degrees -> three quarters.
        assert_eq!(seek_target(W, H, 10.0, 50.0, 1000), Some(750));
    }

    #[test]
    fn angle_is_monotonic_clockwise_around_the_ring() {
        // Sample the band at a fixed radius, sweeping clockwise from just
        // past 12 o'clock; the mapped angle must strictly grow.
        let radius = 42.0;
        let mut last = -1.0;
        for step in 1..72 {
            let theta = (step as f64) * 5.0_f64.to_radians();
            let x = 50.0 + radius * theta.sin();
            let y = 50.0 - radius * theta.cos();
            let angle = ring_hit(W, H, x, y).expect("sample on the band");
            assert!(angle > last, "angle {angle} not past {last}");
            last = angle;
        }
    }

    #[test]
    fn seek_target_stays_within_bounds() {
        let max = 240_000;
        for row in 0..100 {
            for col in 0..100 {
                if let Some(p) = seek_target(W, H, col as f64 + 0.5, row as f64 + 0.5, max) {
                    assert!(p <= max);
                }
            }
        }
    }

    #[test]
    fn non_square_surface_uses_the_smaller_half_extent() {
        // 200x100: outer radius is min(100, 50) = 50, inner 35.
        // A point 60 to the right of center is outside the band even
        // though it is well inside the surface.
        assert!(ring_hit(200.0, 100.0, 160.0, 50.0).is_none());
        // 40 right of center sits on the band.
        assert!(ring_hit(200.0, 100.0, 140.0, 50.0).is_some());
    }

    #[test]
    fn progress_angle_clamps_and_handles_unknown_duration() {
        let dur = Duration::from_secs(100);
        assert_eq!(progress_angle(Duration::ZERO, dur), 0.0);
        assert_eq!(progress_angle(Duration::from_secs(25), dur), 90.0);
        assert_eq!(progress_angle(Duration::from_secs(500), dur), 360.0);
        assert_eq!(progress_angle(Duration::from_secs(10), Duration::ZERO), 0.0);
    }

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
    }
}
