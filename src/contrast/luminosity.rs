//! Relative luminosity and contrast ratio.

/// Channel value (0..1) below which sRGB is linear.
const LINEAR_THRESHOLD: f64 = 0.03928;

/// Relative luminosity of an sRGB colour.
///
/// <https://www.w3.org/TR/WCAG21/#dfn-relative-luminance>
pub fn relative_luminosity(rgb: [u8; 3]) -> f64 {
    let [r, g, b] = rgb.map(|c| {
        let v = c as f64 / 255.0;
        if v < LINEAR_THRESHOLD {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    });
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio between two luminosities, order independent.
pub fn contrast_ratio(first: f64, second: f64) -> f64 {
    let (lighter, darker) = if first >= second {
        (first, second)
    } else {
        (second, first)
    };
    (lighter + 0.05) / (darker + 0.05)
}
