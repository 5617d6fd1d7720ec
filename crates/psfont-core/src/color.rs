//! Contrast colors for text backgrounds
//!
//! Given a text color, pick a background that keeps it legible: invert it,
//! pull the saturation down in HSV space, then push the result toward white
//! (dark text) or toward black (light text). The two directions are
//! deliberately asymmetric.

use crate::types::Color;

/// Luminance below this counts as dark
const DARK_THRESHOLD: f32 = 0.5;

/// Saturation multiplier applied behind dark text
const DARK_TEXT_SATURATION: f32 = 0.35;

/// Saturation multiplier applied behind light text
const LIGHT_TEXT_SATURATION: f32 = 0.65;

/// HSV triple: hue in degrees `[0, 360)`, saturation and value in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

fn to_unit(color: Color) -> (f32, f32, f32) {
    (
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
    )
}

// Truncates, so 0.999 maps to 254
fn from_unit(r: f32, g: f32, b: f32) -> Color {
    Color::rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

/// Relative luminance (Rec. 709 weights) in `[0, 1]`
pub fn luminance(color: Color) -> f32 {
    let (r, g, b) = to_unit(color);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

pub fn is_dark(color: Color) -> bool {
    luminance(color) < DARK_THRESHOLD
}

pub fn invert(color: Color) -> Color {
    Color::rgb(255 - color.r, 255 - color.g, 255 - color.b)
}

/// Convert to HSV; achromatic colors get hue 0 and saturation 0
pub fn rgb_to_hsv(color: Color) -> Hsv {
    let (r, g, b) = to_unit(color);
    let c_max = r.max(g).max(b);
    let c_min = r.min(g).min(b);
    let delta = c_max - c_min;

    let mut h = 0.0;
    if delta > 0.0 {
        h = if c_max == r {
            ((g - b) / delta) % 6.0
        } else if c_max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        h *= 60.0;
        if h < 0.0 {
            h += 360.0;
        }
    }
    let s = if c_max == 0.0 { 0.0 } else { delta / c_max };

    Hsv { h, s, v: c_max }
}

/// Convert back to RGB using the six 60-degree hue sectors
pub fn hsv_to_rgb(hsv: Hsv) -> Color {
    let Hsv { h, s, v } = hsv;
    let c = v * s;
    let sector = h / 60.0;
    let x = c * (1.0 - ((sector % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (sector.floor() as i32).rem_euclid(6) {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    from_unit(r + m, g + m, b + m)
}

/// Multiply saturation by `scale`, clamped to `[0, 1]`
pub fn change_saturation(color: Color, scale: f32) -> Color {
    let mut hsv = rgb_to_hsv(color);
    hsv.s = (hsv.s * scale).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

/// Background color for a text box drawn in `text`
///
/// Dark text gets a light, washed-out inverse; light text gets a darker,
/// muted inverse.
pub fn inverted_background_for(text: Color) -> Color {
    let inverted = invert(text);
    if is_dark(text) {
        let c = change_saturation(inverted, DARK_TEXT_SATURATION);
        let lift = |v: u8| ((v as u16 + 255) / 2) as u8;
        Color::rgb(lift(c.r), lift(c.g), lift(c.b))
    } else {
        let c = change_saturation(inverted, LIGHT_TEXT_SATURATION);
        Color::rgb(c.r / 2, c.g / 2, c.b / 2)
    }
}

/// Black or white, whichever reads better on `background`
pub fn contrasting_text_color(background: Color) -> Color {
    if luminance(background) > DARK_THRESHOLD {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(Color::BLACK), 0.0);
        assert!((luminance(Color::WHITE) - 1.0).abs() < 1e-6);
        assert!(is_dark(Color::BLUE));
        assert!(!is_dark(Color::YELLOW));
    }

    #[test]
    fn test_hsv_achromatic() {
        let hsv = rgb_to_hsv(Color::rgb(128, 128, 128));
        assert_eq!(hsv.h, 0.0);
        assert_eq!(hsv.s, 0.0);
        assert_eq!(hsv_to_rgb(hsv), Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_hsv_primaries() {
        let red = rgb_to_hsv(Color::RED);
        assert_eq!((red.h, red.s, red.v), (0.0, 1.0, 1.0));
        let green = rgb_to_hsv(Color::GREEN);
        assert_eq!(green.h, 120.0);
        let blue = rgb_to_hsv(Color::BLUE);
        assert_eq!(blue.h, 240.0);
        let magenta = rgb_to_hsv(Color::MAGENTA);
        assert_eq!(magenta.h, 300.0);

        for color in [Color::RED, Color::GREEN, Color::BLUE, Color::YELLOW, Color::CYAN] {
            assert_eq!(hsv_to_rgb(rgb_to_hsv(color)), color);
        }
    }

    #[test]
    fn test_black_text_gets_white_background() {
        assert_eq!(inverted_background_for(Color::BLACK), Color::WHITE);
    }

    #[test]
    fn test_white_text_gets_black_background() {
        assert_eq!(inverted_background_for(Color::WHITE), Color::BLACK);
    }

    #[test]
    fn test_yellow_text() {
        // Inverse is pure blue; saturation 0.65 gives (89, 89, 255), halved
        assert_eq!(inverted_background_for(Color::YELLOW), Color::rgb(44, 44, 127));
    }

    #[test]
    fn test_navy_text() {
        // Inverse (255, 255, 127) sits exactly on the 60 degree boundary
        assert_eq!(
            inverted_background_for(Color::rgb(0, 0, 128)),
            Color::rgb(255, 255, 232)
        );
    }

    #[test]
    fn test_contrasting_text_color() {
        assert_eq!(contrasting_text_color(Color::WHITE), Color::BLACK);
        assert_eq!(contrasting_text_color(Color::BLUE), Color::WHITE);
    }

    proptest! {
        #[test]
        fn prop_deterministic(r: u8, g: u8, b: u8) {
            let text = Color::rgb(r, g, b);
            prop_assert_eq!(inverted_background_for(text), inverted_background_for(text));
        }

        #[test]
        fn prop_blend_direction(r: u8, g: u8, b: u8) {
            let text = Color::rgb(r, g, b);
            let bg = inverted_background_for(text);
            if is_dark(text) {
                prop_assert!(bg.r >= 127 && bg.g >= 127 && bg.b >= 127);
            } else {
                prop_assert!(bg.r <= 127 && bg.g <= 127 && bg.b <= 127);
            }
        }

        #[test]
        fn prop_desaturating_keeps_value(r: u8, g: u8, b: u8) {
            let color = Color::rgb(r, g, b);
            let muted = change_saturation(color, 0.5);
            let max_before = r.max(g).max(b) as i16;
            let max_after = muted.r.max(muted.g).max(muted.b) as i16;
            prop_assert!((max_before - max_after).abs() <= 1);
        }
    }
}
