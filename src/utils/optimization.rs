//! Bounded Nelder-Mead simplex minimizer for parameter estimation.

// Standard simplex coefficients: reflection, expansion, contraction,
// shrink.
const ALPHA: f64 = 1.0;
const GAMMA: f64 = 2.0;
const RHO: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// Options controlling the simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread and simplex size.
    pub tolerance: f64,
    /// Relative step used to seed the initial simplex.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a simplex minimization.
#[derive(Debug, Clone)]
pub struct SimplexOutcome {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the simplex collapsed below the tolerance.
    pub converged: bool,
}

#[derive(Clone)]
struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Minimize `objective` starting from `initial`, optionally clamping
/// every iterate to per-dimension `(min, max)` bounds.
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    options: &SimplexOptions,
) -> SimplexOutcome
where
    F: Fn(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return SimplexOutcome {
            point: vec![],
            value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let clamp = |point: Vec<f64>| -> Vec<f64> {
        match bounds {
            None => point,
            Some(limits) => point
                .into_iter()
                .zip(limits.iter())
                .map(|(x, &(lo, hi))| x.clamp(lo, hi))
                .collect(),
        }
    };

    let eval = |point: Vec<f64>| -> Vertex {
        let value = objective(&point);
        Vertex { point, value }
    };

    // Seed the simplex: the start point plus one perturbed vertex per
    // dimension.
    let mut simplex: Vec<Vertex> = Vec::with_capacity(dim + 1);
    simplex.push(eval(clamp(initial.to_vec())));
    for i in 0..dim {
        let mut point = initial.to_vec();
        let step = if point[i].abs() > 1e-10 {
            options.initial_step * point[i].abs()
        } else {
            options.initial_step
        };
        point[i] += step;
        simplex.push(eval(clamp(point)));
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < options.max_iter {
        iterations += 1;
        simplex.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));

        let spread = simplex[dim].value - simplex[0].value;
        if spread.abs() < options.tolerance || simplex_diameter(&simplex) < options.tolerance {
            converged = true;
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; dim];
        for vertex in &simplex[..dim] {
            for (c, x) in centroid.iter_mut().zip(vertex.point.iter()) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= dim as f64;
        }

        let worst = simplex[dim].clone();
        let toward = |coef: f64, from: &[f64]| -> Vec<f64> {
            centroid
                .iter()
                .zip(from.iter())
                .map(|(c, x)| c + coef * (c - x))
                .collect()
        };

        let reflected = eval(clamp(toward(ALPHA, &worst.point)));

        if reflected.value < simplex[0].value {
            // Try to expand past the reflection point.
            let expanded = eval(clamp(
                centroid
                    .iter()
                    .zip(reflected.point.iter())
                    .map(|(c, r)| c + GAMMA * (r - c))
                    .collect(),
            ));
            simplex[dim] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }

        if reflected.value < simplex[dim - 1].value {
            simplex[dim] = reflected;
            continue;
        }

        // Contract toward the better of the worst vertex and its
        // reflection.
        let anchor = if reflected.value < worst.value {
            &reflected.point
        } else {
            &worst.point
        };
        let contracted = eval(clamp(
            centroid
                .iter()
                .zip(anchor.iter())
                .map(|(c, x)| c + RHO * (x - c))
                .collect(),
        ));
        if contracted.value < worst.value.min(reflected.value) {
            simplex[dim] = contracted;
            continue;
        }

        // Shrink everything toward the best vertex.
        let best = simplex[0].point.clone();
        for vertex in simplex.iter_mut().skip(1) {
            let shrunk: Vec<f64> = best
                .iter()
                .zip(vertex.point.iter())
                .map(|(b, x)| b + SIGMA * (x - b))
                .collect();
            *vertex = eval(clamp(shrunk));
        }
    }

    let best = simplex
        .iter()
        .min_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal))
        .cloned()
        .unwrap_or_else(|| simplex[0].clone());

    SimplexOutcome {
        point: best.point,
        value: best.value,
        iterations,
        converged,
    }
}

fn simplex_diameter(simplex: &[Vertex]) -> f64 {
    let best = &simplex[0].point;
    simplex
        .iter()
        .skip(1)
        .map(|v| {
            v.point
                .iter()
                .zip(best.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn minimizes_quadratic_bowl() {
        let outcome = minimize(
            |x| (x[0] - 2.0).powi(2) + (x[1] + 3.0).powi(2),
            &[0.0, 0.0],
            None,
            &SimplexOptions::default(),
        );
        assert!(outcome.converged);
        assert_relative_eq!(outcome.point[0], 2.0, epsilon = 1e-4);
        assert_relative_eq!(outcome.point[1], -3.0, epsilon = 1e-4);
        assert_relative_eq!(outcome.value, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn minimizes_rosenbrock() {
        let options = SimplexOptions {
            max_iter: 5000,
            tolerance: 1e-10,
            ..Default::default()
        };
        let outcome = minimize(
            |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
            &[-1.0, 1.0],
            None,
            &options,
        );
        assert_relative_eq!(outcome.point[0], 1.0, epsilon = 1e-3);
        assert_relative_eq!(outcome.point[1], 1.0, epsilon = 1e-3);
    }

    #[test]
    fn respects_bounds() {
        // Unconstrained minimum at 5; box forces the boundary.
        let outcome = minimize(
            |x| (x[0] - 5.0).powi(2),
            &[1.0],
            Some(&[(0.0, 3.0)]),
            &SimplexOptions::default(),
        );
        assert_relative_eq!(outcome.point[0], 3.0, epsilon = 1e-4);
    }

    #[test]
    fn converges_from_the_optimum() {
        let outcome = minimize(
            |x| (x[0] - 1.5).powi(2),
            &[1.5],
            None,
            &SimplexOptions::default(),
        );
        assert!(outcome.converged);
        assert_relative_eq!(outcome.point[0], 1.5, epsilon = 1e-4);
    }

    #[test]
    fn empty_start_is_rejected() {
        let outcome = minimize(|_| 0.0, &[], None, &SimplexOptions::default());
        assert!(!outcome.converged);
        assert!(outcome.value.is_nan());
    }
}
