//! Linear axis scales and tick generation.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    pub fn new(domain_min: f32, domain_max: f32, range_min: f32, range_max: f32) -> Self {
        Self {
            domain_min,
            domain_max,
            range_min,
            range_max,
        }
    }

    pub fn map(&self, value: f32) -> f32 {
        let d = self.domain_max - self.domain_min;
        if d.abs() < 1e-12 {
            return self.range_min;
        }
        let t = (value - self.domain_min) / d;
        self.range_min + t * (self.range_max - self.range_min)
    }

    pub fn invert(&self, px: f32) -> f32 {
        let r = self.range_max - self.range_min;
        if r.abs() < 1e-12 {
            return self.domain_min;
        }
        let t = (px - self.range_min) / r;
        self.domain_min + t * (self.domain_max - self.domain_min)
    }

    /// Evenly spaced tick values including both endpoints.
    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let n = count.max(2);
        let span = self.domain_max - self.domain_min;
        (0..n)
            .map(|i| self.domain_min + span * (i as f32 / (n - 1) as f32))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_invert_round_trip() {
        let scale = LinearScale::new(0.0, 10.0, 100.0, 200.0);
        assert_eq!(scale.map(5.0), 150.0);
        assert_eq!(scale.invert(150.0), 5.0);
    }

    #[test]
    fn ticks_include_endpoints() {
        let scale = LinearScale::new(0.0, 8.0, 0.0, 1.0);
        let ticks = scale.ticks(5);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn degenerate_domain_maps_to_range_start() {
        let scale = LinearScale::new(3.0, 3.0, 50.0, 60.0);
        assert_eq!(scale.map(3.0), 50.0);
    }
}
