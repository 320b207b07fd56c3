use std::sync::LazyLock;

// Default mapping of #ansixxx names to RGB reference values
const ANSI_COLORS: &[(&str, &str)] = &[
    // dark
    ("#ansiblack", "#000000"),
    ("#ansidarkred", "#7f0000"),
    ("#ansidarkgreen", "#007f00"),
    ("#ansibrown", "#7f7fe0"),
    ("#ansidarkblue", "#00007f"),
    ("#ansipurple", "#7f007f"),
    ("#ansiteal", "#007f7f"),
    ("#ansilightgray", "#e5e5e5"),
    // normal
    ("#ansidarkgray", "#555555"),
    ("#ansired", "#ff0000"),
    ("#ansigreen", "#00ff00"),
    ("#ansiyellow", "#ffff00"),
    ("#ansiblue", "#6060ff"),
    ("#ansifuchsia", "#ff00ff"),
    ("#ansiturquoise", "#00ffff"),
    ("#ansiwhite", "#ffffff"),
];

/// The fixed 256-entry xterm palette: 16 base colors, the 6x6x6 color cube,
/// and 24 grayscale steps. Built once per process.
pub static PALETTE: LazyLock<[(u8, u8, u8); 256]> = LazyLock::new(build_palette);

fn build_palette() -> [(u8, u8, u8); 256] {
    let mut colors = [(0u8, 0u8, 0u8); 256];

    // colors 0..16: the 16 basic colors
    let base: [(u8, u8, u8); 16] = [
        (0x00, 0x00, 0x00),
        (0xcd, 0x00, 0x00),
        (0x00, 0xcd, 0x00),
        (0xcd, 0xcd, 0x00),
        (0x00, 0x00, 0xee),
        (0xcd, 0x00, 0xcd),
        (0x00, 0xcd, 0xcd),
        (0xe5, 0xe5, 0xe5),
        (0x7f, 0x7f, 0x7f),
        (0xff, 0x00, 0x00),
        (0x00, 0xff, 0x00),
        (0xff, 0xff, 0x00),
        (0x5c, 0x5c, 0xff),
        (0xff, 0x00, 0xff),
        (0x00, 0xff, 0xff),
        (0xff, 0xff, 0xff),
    ];
    colors[..16].copy_from_slice(&base);

    // colors 16..232: the 6x6x6 color cube
    let steps = [0x00u8, 0x5f, 0x87, 0xaf, 0xd7, 0xff];
    for i in 0..216 {
        colors[16 + i] = (
            steps[(i / 36) % 6],
            steps[(i / 6) % 6],
            steps[i % 6],
        );
    }

    // colors 232..256: grayscale
    for i in 0..24 {
        let v = 8 + (i as u8) * 10;
        colors[232 + i] = (v, v, v);
    }

    colors
}

/// Resolve a named color like "#ansired" to its reference hex value.
/// Unrecognized names pass through untouched; a later `to_rgb` on a
/// malformed value still yields black rather than an error.
pub fn resolve_named(color: &str) -> String {
    for (name, hex) in ANSI_COLORS {
        if *name == color {
            return (*hex).to_string();
        }
    }
    color.to_string()
}

/// Parse a "#rrggbb" string into an RGB triple. Malformed input resolves
/// to (0, 0, 0) rather than failing the render.
pub fn to_rgb(color: &str) -> (u8, u8, u8) {
    let hex = color.strip_prefix('#').unwrap_or(color);
    let value = u32::from_str_radix(hex, 16).unwrap_or(0);

    let r = ((value >> 16) & 0xff) as u8;
    let g = ((value >> 8) & 0xff) as u8;
    let b = (value & 0xff) as u8;

    (r, g, b)
}

pub fn from_rgb(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Scale each channel of a hex color by `percent`, clamping to [0, 255].
/// A percent of exactly 1.0 returns the input unchanged; empty input
/// returns empty.
pub fn reshade(color: &str, percent: f32) -> String {
    if color.is_empty() || percent == 1.0 {
        return color.to_string();
    }

    let (r, g, b) = to_rgb(color);
    let scale = |c: u8| -> u8 { (f32::from(c) * percent).clamp(0.0, 255.0) as u8 };
    from_rgb(scale(r), scale(g), scale(b))
}

/// Find the palette index closest to (r, g, b) by squared Euclidean
/// distance. Ties resolve to the lowest index, so pure white maps to the
/// dedicated entry 15 rather than the cube corner.
pub fn rgb_to_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0usize;
    let mut best_distance = i32::MAX;

    for (i, &(pr, pg, pb)) in PALETTE.iter().enumerate() {
        let rd = i32::from(r) - i32::from(pr);
        let gd = i32::from(g) - i32::from(pg);
        let bd = i32::from(b) - i32::from(pb);
        let d = rd * rd + gd * gd + bd * bd;

        if d < best_distance {
            best = i;
            best_distance = d;
        }
    }

    best as u8
}

/// Resolve an arbitrary color value (named or hex) to a palette index.
pub fn color_index(color: &str) -> u8 {
    let hex = resolve_named(color);
    let (r, g, b) = to_rgb(&hex);
    rgb_to_index(r, g, b)
}
