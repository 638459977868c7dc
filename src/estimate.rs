/// Hit count of a finished run over `samples` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimate {
    pub samples: u64,
    pub inside: u64,
}

impl Estimate {
    // PI ≈ 4 * (points inside circle / total points)
    pub fn pi(&self) -> f64 {
        4.0 * self.inside as f64 / self.samples as f64
    }

    pub fn error(&self) -> f64 {
        (std::f64::consts::PI - self.pi()).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_from_counts() {
        let estimate = Estimate {
            samples: 1_000_000,
            inside: 785_000,
        };
        assert!((estimate.pi() - 3.14).abs() < 1e-12);
        assert!((estimate.error() - (std::f64::consts::PI - 3.14)).abs() < 1e-12);
    }
}
