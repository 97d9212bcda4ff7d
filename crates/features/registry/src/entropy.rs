use sky_domain::{StarBrightness, StarColor, StarSize};

/// Source of uniform choices for new stars.
///
/// Every [`rand::Rng`] is an `Entropy`. Tests can implement it by hand to pin exact
/// outcomes.
pub trait Entropy {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: rand::Rng> Entropy for R {
    fn pick(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Draws a color from the palette of `size`. Out-of-range picks wrap around.
pub fn pick_color<E: Entropy + ?Sized>(size: StarSize, entropy: &mut E) -> StarColor {
    let palette = StarColor::palette(size);
    palette[entropy.pick(palette.len()) % palette.len()]
}

/// Draws a brightness, independent of size.
pub fn pick_brightness<E: Entropy + ?Sized>(entropy: &mut E) -> StarBrightness {
    let all = StarBrightness::ALL;
    all[entropy.pick(all.len()) % all.len()]
}
