//! Numerical integration
//!
//! Classical fixed-step Runge-Kutta 4th order (RK4). No adaptive step
//! control: the caller picks `dt` and gets exactly four derivative
//! evaluations per step.

use nalgebra::SVector;

/// Generic RK4 step for any fixed-size state vector
///
/// Solves dx/dt = f(t, x) using the classical 4th-order Runge-Kutta method.
/// Derivatives are evaluated at `t`, `t + dt/2`, `t + dt/2` and `t + dt`
/// and combined with weights 1/6, 1/3, 1/3, 1/6.
///
/// A negative `dt` integrates backward in time.
///
/// # Arguments
/// * `x` - Current state
/// * `t` - Current time
/// * `dt` - Time step
/// * `f` - Derivative function f(t, x) -> dx/dt
///
/// # Returns
/// New state after integration
pub fn rk4<const N: usize, F>(
    x: &SVector<f64, N>,
    t: f64,
    dt: f64,
    mut f: F,
) -> SVector<f64, N>
where
    F: FnMut(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    let half_dt = dt / 2.0;

    let k1 = f(t, x);
    let k2 = f(t + half_dt, &(x + k1 * half_dt));
    let k3 = f(t + half_dt, &(x + k2 * half_dt));
    let k4 = f(t + dt, &(x + k3 * dt));

    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_rk4_exponential_decay() {
        // dx/dt = -x, x(0) = 1  =>  x(t) = e^(-t)
        let dt = 0.01;
        let mut x = SVector::<f64, 1>::new(1.0);
        let mut t = 0.0;

        for _ in 0..100 {
            x = rk4(&x, t, dt, |_t, x| -*x);
            t += dt;
        }

        assert_relative_eq!(x[0], (-1.0_f64).exp(), epsilon = 1e-9);
    }

    #[test]
    fn test_rk4_harmonic_oscillator() {
        // State [x, v]: dx/dt = v, dv/dt = -x, x(0) = 1, v(0) = 0  =>  x(t) = cos(t)
        let dt = 0.001;
        let mut x = SVector::<f64, 2>::new(1.0, 0.0);
        let mut t = 0.0;

        let steps = (PI / 2.0 / dt) as usize;
        for _ in 0..steps {
            x = rk4(&x, t, dt, |_t, s| SVector::<f64, 2>::new(s[1], -s[0]));
            t += dt;
        }

        assert_relative_eq!(x[0], t.cos(), epsilon = 1e-9);
        assert_relative_eq!(x[1], -t.sin(), epsilon = 1e-9);
    }

    #[test]
    fn test_rk4_evaluation_times() {
        let mut times = Vec::new();
        let x = SVector::<f64, 1>::new(0.0);

        rk4(&x, 2.0, 0.5, |t, _x| {
            times.push(t);
            SVector::<f64, 1>::zeros()
        });

        assert_eq!(times, vec![2.0, 2.25, 2.25, 2.5]);
    }

    #[test]
    fn test_rk4_time_dependent_exact_for_cubic() {
        // dx/dt = 3t², RK4 is exact for polynomials up to degree 3 in x(t)
        let x0 = SVector::<f64, 1>::new(0.0);
        let x = rk4(&x0, 0.0, 2.0, |t, _x| SVector::<f64, 1>::new(3.0 * t * t));

        assert_relative_eq!(x[0], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rk4_backward_step_recovers_start() {
        let x0 = SVector::<f64, 2>::new(0.3, -0.7);
        let f = |_t: f64, s: &SVector<f64, 2>| SVector::<f64, 2>::new(s[1], -s[0]);

        let forward = rk4(&x0, 0.0, 0.01, f);
        let back = rk4(&forward, 0.01, -0.01, f);

        assert_relative_eq!(back, x0, epsilon = 1e-10);
    }
}
