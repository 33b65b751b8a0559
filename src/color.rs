//! Celebration palette

use rand::Rng;

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// CSS `#rrggbb` string, as accepted by canvas `fillStyle`
    pub fn css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed six-color celebration palette (reds, pinks, white, gold)
pub const PALETTE: [Color; 6] = [
    Color::from_hex(0xe94d58),
    Color::from_hex(0xff7aa2),
    Color::from_hex(0xffd1dc),
    Color::from_hex(0xffffff),
    Color::from_hex(0xff4da6),
    Color::from_hex(0xffcc66),
];

/// Pick a palette color uniformly
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_css_formatting() {
        assert_eq!(PALETTE[0].css(), "#e94d58");
        assert_eq!(PALETTE[3].css(), "#ffffff");
        assert_eq!(Color::rgb(1, 2, 3).css(), "#010203");
    }

    #[test]
    fn test_random_color_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; PALETTE.len()];
        for _ in 0..500 {
            let c = random_color(&mut rng);
            let idx = PALETTE.iter().position(|p| *p == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
