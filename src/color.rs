use rand::Rng;

/// Opaque 8-bit color carried by every particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.gen(), rng.gen(), rng.gen())
    }

    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba { rgb: self, alpha }
    }
}

/// Color plus straight (unmultiplied) alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn opaque_conversion() {
        let c: Rgba = Rgb::RED.into();
        assert_eq!(c.alpha, 1.0);
        assert_eq!(c.alpha_u8(), 255);
    }

    #[test]
    fn random_colors_vary() {
        let mut rng = StdRng::seed_from_u64(7);
        let first = Rgb::random(&mut rng);
        assert!((0..16).any(|_| Rgb::random(&mut rng) != first));
    }
}
