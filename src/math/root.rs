//! # 割线法求根
//!
//! 不提供导数时的 Newton 法（即割线法）。第二个初始点取
//! `x0·(1 + 1e-4) ± 1e-4`。
//!
//! ## 依赖关系
//! - 被 `experiment/van_der_pauw.rs` 使用

use crate::error::{PhysicsLabError, Result};

/// 求根参数
#[derive(Debug, Clone, Copy)]
pub struct NewtonOptions {
    /// 绝对容差
    pub tol: f64,
    /// 相对容差
    pub rtol: f64,
    pub max_iter: usize,
}

impl Default for NewtonOptions {
    fn default() -> Self {
        NewtonOptions {
            tol: 1.48e-8,
            rtol: 0.0,
            max_iter: 50,
        }
    }
}

/// 在 `x0` 附近寻找 `f` 的根
pub fn newton<F>(f: F, x0: f64, options: NewtonOptions) -> Result<f64>
where
    F: Fn(f64) -> f64,
{
    const STEP: f64 = 1e-4;

    let mut p0 = x0;
    let mut p1 = x0 * (1.0 + STEP);
    p1 += if p1 >= 0.0 { STEP } else { -STEP };

    let mut q0 = f(p0);
    let mut q1 = f(p1);
    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for _ in 0..options.max_iter {
        if q1 == q0 {
            if q1 == 0.0 {
                return Ok(p1);
            }
            return Err(PhysicsLabError::SingularFit(format!(
                "secant is flat at x = {} (f = {})",
                p1, q1
            )));
        }

        let p = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };

        if !p.is_finite() {
            break;
        }
        if (p - p1).abs() < options.tol + options.rtol * p.abs() {
            return Ok(p);
        }

        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = f(p1);
    }

    Err(PhysicsLabError::NotConverged {
        method: "Secant method".to_string(),
        iterations: options.max_iter,
    })
}
