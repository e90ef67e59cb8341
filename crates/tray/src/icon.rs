//! Status icon rendering.
//!
//! The icon is a filled circle on a transparent square, inset by a fixed
//! margin and outlined in black. Only the fill color changes with status.

/// Icon fill color for each keep-alive status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconColor {
    /// Running with every condition met.
    Active,
    /// Running but some condition unmet.
    Paused,
    /// Loop stopped.
    Stopped,
}

impl IconColor {
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Self::Active => [34, 139, 34, 255],
            Self::Paused => [255, 140, 0, 255],
            Self::Stopped => [128, 128, 128, 255],
        }
    }
}

const MARGIN: f32 = 8.0;
const OUTLINE: [u8; 4] = [0, 0, 0, 255];

/// Renders a `size` x `size` RGBA icon, row-major.
pub fn render_icon(color: IconColor, size: u32) -> Vec<u8> {
    let mut rgba = vec![0u8; (size * size * 4) as usize];

    let center = size as f32 / 2.0;
    let radius = (size as f32 - 2.0 * MARGIN).max(0.0) / 2.0;
    let fill = color.rgba();

    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            let pixel = if dist <= radius - 1.0 {
                fill
            } else if dist <= radius {
                OUTLINE
            } else {
                continue;
            };

            let offset = ((y * size + x) * 4) as usize;
            rgba[offset..offset + 4].copy_from_slice(&pixel);
        }
    }

    rgba
}
