//! # 非线性最小二乘拟合
//!
//! Levenberg-Marquardt 算法，雅可比矩阵由前向差分得到。
//! 模型函数接收完整的自变量数组，便于依赖扫描方向的模型（如磁滞回线）。
//!
//! ## 依赖关系
//! - 被 `experiment/magnetism_type.rs` 使用
//! - 使用 `nalgebra` 求解阻尼正规方程

use crate::error::{PhysicsLabError, Result};

use nalgebra::{DMatrix, DVector};

const MAX_ITERATIONS: usize = 200;
const MAX_DAMPING: f64 = 1e16;

/// 拟合结果
#[derive(Debug, Clone)]
pub struct CurveFit {
    /// 最优参数
    pub params: Vec<f64>,
}

/// 拟合 `model(x, params)` 到数据 `y`，初值 `p0`
pub fn curve_fit<F>(model: F, x: &[f64], y: &[f64], p0: &[f64]) -> Result<CurveFit>
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
{
    let n = x.len();
    let m = p0.len();
    if y.len() != n {
        return Err(PhysicsLabError::InvalidArgument(format!(
            "x and y lengths differ ({} vs {})",
            n,
            y.len()
        )));
    }
    if n < m {
        return Err(PhysicsLabError::InsufficientData {
            context: "curve fit".to_string(),
            required: m,
            found: n,
        });
    }

    let residuals = |params: &[f64]| -> DVector<f64> {
        let simulated = model(x, params);
        DVector::from_iterator(n, y.iter().zip(simulated).map(|(yi, si)| yi - si))
    };
    let sum_of_squares = |r: &DVector<f64>| -> f64 {
        let s = r.norm_squared();
        if s.is_finite() {
            s
        } else {
            f64::INFINITY
        }
    };

    let mut params = p0.to_vec();
    let mut r = residuals(&params);
    let mut sse = sum_of_squares(&r);
    if !sse.is_finite() {
        return Err(PhysicsLabError::SingularFit(
            "model is not finite at the initial guess".to_string(),
        ));
    }

    let mut damping = 1e-3;
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let jacobian = jacobian(&model, x, &params, &r, y);
        let jt = jacobian.transpose();
        let normal = &jt * &jacobian;
        let gradient = &jt * &r;

        let mut improved = false;
        while damping < MAX_DAMPING {
            let mut damped = normal.clone();
            for j in 0..m {
                damped[(j, j)] += damping * normal[(j, j)].max(1e-30);
            }

            let step = match damped.lu().solve(&gradient) {
                Some(step) => step,
                None => {
                    damping *= 10.0;
                    continue;
                }
            };

            let candidate: Vec<f64> = params.iter().zip(step.iter()).map(|(p, s)| p + s).collect();
            let candidate_r = residuals(&candidate);
            let candidate_sse = sum_of_squares(&candidate_r);

            if candidate_sse < sse {
                let relative_gain = (sse - candidate_sse) / sse.max(f64::MIN_POSITIVE);
                let step_small = step
                    .iter()
                    .zip(&candidate)
                    .all(|(s, p)| s.abs() <= 1e-12 * (p.abs() + 1e-12));

                params = candidate;
                r = candidate_r;
                sse = candidate_sse;
                damping = (damping / 10.0).max(1e-12);
                improved = true;

                if relative_gain < 1e-12 || step_small {
                    return Ok(CurveFit { params });
                }
                break;
            }
            damping *= 10.0;
        }

        // 无法继续下降：当前点即为局部最优
        if !improved {
            break;
        }
    }

    if params.iter().all(|p| p.is_finite()) && damping >= MAX_DAMPING {
        return Ok(CurveFit { params });
    }

    Err(PhysicsLabError::NotConverged {
        method: "Levenberg-Marquardt".to_string(),
        iterations,
    })
}

/// 前向差分雅可比矩阵（模型对参数的导数）
fn jacobian<F>(model: &F, x: &[f64], params: &[f64], r: &DVector<f64>, y: &[f64]) -> DMatrix<f64>
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
{
    let n = x.len();
    let m = params.len();
    let eps = f64::EPSILON.sqrt();
    let mut jac = DMatrix::zeros(n, m);

    for j in 0..m {
        let h = eps * if params[j] == 0.0 { 1.0 } else { params[j].abs() };
        let mut shifted = params.to_vec();
        shifted[j] += h;
        let simulated = model(x, &shifted);
        for i in 0..n {
            // model(p) = y - r
            let base = y[i] - r[i];
            let derivative = (simulated[i] - base) / h;
            jac[(i, j)] = if derivative.is_finite() { derivative } else { 0.0 };
        }
    }

    jac
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exponential(x: &[f64], p: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| p[0] * (p[1] * xi).exp()).collect()
    }

    #[test]
    fn test_exponential_fit() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 0.1).collect();
        let y = exponential(&x, &[2.5, -1.3]);

        let fit = curve_fit(exponential, &x, &y, &[1.0, -0.5]).unwrap();
        assert!((fit.params[0] - 2.5).abs() < 1e-6);
        assert!((fit.params[1] + 1.3).abs() < 1e-6);
        let sse: f64 = exponential(&x, &fit.params)
            .iter()
            .zip(&y)
            .map(|(f, yi)| (f - yi).powi(2))
            .sum();
        assert!(sse < 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        let result = curve_fit(exponential, &[1.0], &[1.0], &[1.0, 1.0]);
        assert!(result.is_err());
    }
}
