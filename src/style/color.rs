use crate::foundation::core::{Paint, Rgba};
use crate::foundation::error::{CubistError, CubistResult};

/// Parses an SVG paint value: a color in any supported form, or the
/// keyword `none` (no paint, as opposed to an unset property).
pub fn parse_paint(value: &str) -> CubistResult<Paint> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("none") {
        return Ok(Paint::None);
    }
    parse_color(value).map(Paint::Color)
}

/// Parses an SVG color value: `#rgb`, `#rrggbb`, `rgb(r,g,b)` with integer
/// or percentage components, or a CSS basic color keyword. Case-insensitive.
pub fn parse_color(value: &str) -> CubistResult<Rgba> {
    let value = value.trim();
    if !value.is_ascii() {
        return Err(CubistError::style(format!("invalid color \"{value}\"")));
    }
    let lower = value.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(args) = lower.strip_prefix("rgb(") {
        let args = args
            .strip_suffix(')')
            .ok_or_else(|| CubistError::style(format!("unterminated rgb() in \"{value}\"")))?;
        return parse_rgb_args(args);
    }
    named_color(&lower).ok_or_else(|| CubistError::style(format!("unrecognized color \"{value}\"")))
}

fn parse_hex(hex: &str) -> CubistResult<Rgba> {
    fn hex_byte(pair: &str) -> CubistResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| CubistError::style(format!("invalid hex digits \"{pair}\"")))
    }
    fn hex_nibble(digit: &str) -> CubistResult<u8> {
        // Short-form digits duplicate: #f00 means #ff0000.
        hex_byte(digit).map(|n| n * 17)
    }

    match hex.len() {
        3 => Ok(Rgba::rgb(
            hex_nibble(&hex[0..1])?,
            hex_nibble(&hex[1..2])?,
            hex_nibble(&hex[2..3])?,
        )),
        6 => Ok(Rgba::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        n => Err(CubistError::style(format!(
            "hex color must have 3 or 6 digits, got {n}"
        ))),
    }
}

fn parse_rgb_args(args: &str) -> CubistResult<Rgba> {
    fn channel(text: &str) -> CubistResult<u8> {
        let text = text.trim();
        let scaled = if let Some(pct) = text.strip_suffix('%') {
            let pct: f64 = pct
                .trim()
                .parse()
                .map_err(|_| CubistError::style(format!("invalid rgb() percentage \"{text}\"")))?;
            pct / 100.0 * 255.0
        } else {
            text.parse::<f64>()
                .map_err(|_| CubistError::style(format!("invalid rgb() component \"{text}\"")))?
        };
        Ok(scaled.round().clamp(0.0, 255.0) as u8)
    }

    let parts: Vec<&str> = args.split(',').collect();
    match parts.as_slice() {
        [r, g, b] => Ok(Rgba::rgb(channel(r)?, channel(g)?, channel(b)?)),
        _ => Err(CubistError::style(format!(
            "rgb() expects 3 comma-separated components, got {}",
            parts.len()
        ))),
    }
}

/// CSS 2.1 basic color keywords.
fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        "aqua" => Rgba::rgb(0x00, 0xff, 0xff),
        "black" => Rgba::rgb(0x00, 0x00, 0x00),
        "blue" => Rgba::rgb(0x00, 0x00, 0xff),
        "fuchsia" => Rgba::rgb(0xff, 0x00, 0xff),
        "gray" => Rgba::rgb(0x80, 0x80, 0x80),
        "green" => Rgba::rgb(0x00, 0x80, 0x00),
        "lime" => Rgba::rgb(0x00, 0xff, 0x00),
        "maroon" => Rgba::rgb(0x80, 0x00, 0x00),
        "navy" => Rgba::rgb(0x00, 0x00, 0x80),
        "olive" => Rgba::rgb(0x80, 0x80, 0x00),
        "purple" => Rgba::rgb(0x80, 0x00, 0x80),
        "red" => Rgba::rgb(0xff, 0x00, 0x00),
        "silver" => Rgba::rgb(0xc0, 0xc0, 0xc0),
        "teal" => Rgba::rgb(0x00, 0x80, 0x80),
        "white" => Rgba::rgb(0xff, 0xff, 0xff),
        "yellow" => Rgba::rgb(0xff, 0xff, 0x00),
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
