use crate::complex::*;

/// A complex polynomial with explicit coefficients, ascending by power.
///
/// This is the crate's stand-in for a symbolic calculus provider: the
/// iteration engine itself only ever sees roots and an elementwise step
/// function, and anything able to produce those plugs in the same way.
#[derive(Clone, Debug)]
pub struct Polynomial {
    coeffs: Vec<C<f64>>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<C<f64>>) -> Self {
        assert!(!coeffs.is_empty(), "a polynomial needs a coefficient");
        Self { coeffs }
    }

    /// Monic polynomial with the given zeros, in the given order.
    pub fn from_roots(roots: &[C<f64>]) -> Self {
        let mut coeffs = vec![c(1.0, 0.0)];
        for &r in roots {
            // multiply by (z - r)
            let mut next = vec![c(0.0, 0.0); coeffs.len() + 1];
            for (k, &a) in coeffs.iter().enumerate() {
                next[k + 1] = next[k + 1] + a;
                next[k] = next[k] - a * r;
            }
            coeffs = next;
        }
        Self::new(coeffs)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn eval(&self, z: C<f64>) -> C<f64> {
        let mut acc = c(0.0, 0.0);
        for &a in self.coeffs.iter().rev() {
            acc = acc * z + a;
        }
        acc
    }

    pub fn derivative(&self) -> Polynomial {
        if self.coeffs.len() == 1 {
            return Self::new(vec![c(0.0, 0.0)]);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &a)| a * cr(k as f64))
            .collect();
        Self::new(coeffs)
    }

    /// The elementwise Newton update `f(z) / f'(z)`.
    pub fn newton_step(&self) -> impl Fn(C<f64>) -> C<f64> + Clone + Send + 'static {
        let f = self.clone();
        let df = self.derivative();
        move |z| f.eval(z) / df.eval(z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_from_roots_vanishes_at_roots() {
        let s = 3_f64.sqrt() / 2.0;
        let roots = [c(1.0, 0.0), c(-0.5, s), c(-0.5, -s)];
        let p = Polynomial::from_roots(&roots);
        assert_eq!(p.degree(), 3);
        for r in roots {
            assert!(p.eval(r).norm() < 1e-12);
        }
        // z^3 - 1 away from the roots
        assert!((p.eval(c(2.0, 0.0)) - c(7.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_derivative_power_rule() {
        // p(z) = 1 + 2z + 3z^2, p'(z) = 2 + 6z
        let p = Polynomial::new(vec![cr(1.0), cr(2.0), cr(3.0)]);
        let d = p.derivative();
        assert_eq!(d.eval(c(0.0, 0.0)), cr(2.0));
        assert_eq!(d.eval(c(1.0, 0.0)), cr(8.0));
    }

    #[test]
    fn test_newton_step_moves_toward_root() {
        // p(z) = z^2 - 1 from z = 2: step = 3/4, next = 1.25
        let p = Polynomial::new(vec![cr(-1.0), cr(0.0), cr(1.0)]);
        let step = p.newton_step();
        assert!((step(cr(2.0)) - cr(0.75)).norm() < 1e-15);
    }
}
