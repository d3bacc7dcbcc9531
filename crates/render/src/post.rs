//! Host-side parameters for the bloom and film-grain passes.

/// Normalized 1D Gaussian weights, centre tap first.
///
/// `size` is the full tap count and is forced odd; only the centre and one
/// side are returned since the kernel is symmetric.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let half = (size / 2) as i32;
    let sigma = sigma.max(f32::EPSILON);
    let gauss = |x: i32| (-((x * x) as f32) / (2.0 * sigma * sigma)).exp();

    let total: f32 = (-half..=half).map(gauss).sum();
    (0..=half).map(|i| gauss(i) / total).collect()
}

/// Time input for the film-grain noise, advanced by a fixed step per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmClock {
    time: f32,
    step: f32,
}

impl FilmClock {
    pub fn new(step: f32) -> Self {
        Self { time: 0.0, step }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance one frame and return the new time.
    ///
    /// Wraps well before f32 loses the precision the noise hash needs.
    pub fn tick(&mut self) -> f32 {
        self.time = (self.time + self.step) % 1000.0;
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_sums_to_one_across_both_sides() {
        let k = gaussian_kernel(25, 4.0);
        assert_eq!(k.len(), 13);
        let total = k[0] + 2.0 * k[1..].iter().sum::<f32>();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn kernel_falls_off_from_centre() {
        let k = gaussian_kernel(9, 2.0);
        assert!(k.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn even_size_is_rounded_up() {
        assert_eq!(gaussian_kernel(4, 1.0).len(), 3);
        assert_eq!(gaussian_kernel(0, 1.0), vec![1.0]);
    }

    #[test]
    fn film_clock_steps_and_wraps() {
        let mut clock = FilmClock::new(0.01);
        assert_eq!(clock.time(), 0.0);
        clock.tick();
        assert!((clock.time() - 0.01).abs() < 1e-7);

        let mut fast = FilmClock::new(600.0);
        fast.tick();
        assert!((fast.tick() - 200.0).abs() < 1e-3);
    }
}
