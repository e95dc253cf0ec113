/// Packed ARGB color encoding for the target platform
///
/// Colors arrive as CSS-ish strings from the editor (`#rrggbb`, occasionally
/// `rgba(...)`). The platform wants a single 32-bit int with alpha in the high byte.

const WHITE: u32 = 0x00FF_FFFF;

/// Pack a color and opacity into `0xAARRGGBB`.
///
/// Missing colors are white. Alpha is `floor(opacity * 255)` with no clamping
/// beyond the truncation to a byte.
pub fn encode_color(color: Option<&str>, opacity: f64) -> u32 {
    let alpha = (opacity * 255.0).floor() as i64 as u32;
    (alpha << 24) | rgb(color)
}

/// Low 24 bits of a color string, white when absent
pub fn rgb(color: Option<&str>) -> u32 {
    match color {
        Some(value) => parse_rgb(value).unwrap_or(0),
        None => WHITE,
    }
}

fn parse_rgb(value: &str) -> Option<u32> {
    let value = value.trim();

    if let Some(args) = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let mut channels = args.split(',').map(|c| c.trim().parse::<f64>().ok());
        let r = channels.next()??;
        let g = channels.next()??;
        let b = channels.next()??;
        let channel = |c: f64| (c.clamp(0.0, 255.0) as u32) & 0xFF;
        return Some((channel(r) << 16) | (channel(g) << 8) | channel(b));
    }

    let hex = value.trim_start_matches('#');
    let hex = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        hex.to_string()
    };
    u64::from_str_radix(&hex, 16)
        .ok()
        .map(|n| (n & 0x00FF_FFFF) as u32)
}

/// Java int literal for a packed ARGB value
pub fn argb_literal(color: u32) -> String {
    format!("0x{:08X}", color)
}

/// Java int literal for a bare RGB value (text colors)
pub fn rgb_literal(color: u32) -> String {
    format!("0x{:06X}", color & 0x00FF_FFFF)
}
