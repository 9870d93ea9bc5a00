use bevy::color::Srgba;

/// Tint used whenever a feed color cannot be parsed.
pub const FALLBACK_TINT: Srgba = Srgba::new(0.5, 0.5, 0.5, 1.0);

/// Parses `#rrggbb`, `rrggbb`, `0xrrggbb` and the short/alpha hex forms.
pub fn parse_hex(input: &str) -> Option<Srgba> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Srgba::hex(trimmed).ok()
}

pub fn parse_or_fallback(input: &str) -> Srgba {
    parse_hex(input).unwrap_or(FALLBACK_TINT)
}

/// Approximated blackbody radiation to sRGB color conversion.
///
/// Not accurate, but good enough to tint a star by its effective temperature.
///
/// Taken from https://tannerhelland.com/2012/09/18/convert-temperature-rgb-algorithm-code.html
pub fn blackbody(kelvin: f32) -> Srgba {
    let t = kelvin.clamp(1000.0, 40_000.0) / 100.0;
    let (r, g, b) = if t <= 66.0 {
        let r = 255.0;
        let g = 99.470_8 * t.ln() - 161.119_57;
        let b = if t <= 19.0 {
            0.0
        } else {
            138.517_73 * (t - 10.0).ln() - 305.044_8
        };
        (r, g, b)
    } else {
        let r = 329.698_73 * (t - 60.0).powf(-0.133_204_76);
        let g = 288.122_16 * (t - 60.0).powf(-0.075_514_846);
        (r, g, 255.0)
    };

    Srgba::new(
        r.clamp(0.0, 255.0) / 255.0,
        g.clamp(0.0, 255.0) / 255.0,
        b.clamp(0.0, 255.0) / 255.0,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn parses_prefixed_and_bare_hex() {
        let red = Srgba::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(parse_hex("#ff0000"), Some(red));
        assert_eq!(parse_hex("ff0000"), Some(red));
        assert_eq!(parse_hex("0xff0000"), Some(red));
        assert_eq!(parse_hex(" #F00 "), Some(red));
    }

    #[test]
    fn malformed_color_degrades_to_gray() {
        assert_eq!(parse_or_fallback(""), FALLBACK_TINT);
        assert_eq!(parse_or_fallback("#zzzzzz"), FALLBACK_TINT);
        assert_eq!(parse_or_fallback("blue"), FALLBACK_TINT);
    }

    #[test]
    fn cool_stars_are_red_and_hot_stars_are_blue() {
        let cool = blackbody(3000.0);
        assert_eq!(cool.red, 1.0);
        assert!(cool.blue < cool.green);

        let hot = blackbody(15_000.0);
        assert_eq!(hot.blue, 1.0);
        assert!(hot.red < 1.0);
    }

    #[test]
    fn sunlike_temperature_is_near_white() {
        let sun = blackbody(6600.0);
        assert_eq!(sun.red, 1.0);
        assert_abs_diff_eq!(sun.green, 1.0, epsilon = 0.05);
        assert_abs_diff_eq!(sun.blue, 1.0, epsilon = 0.05);
    }
}
