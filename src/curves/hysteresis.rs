//! # 铁磁磁滞回线
//!
//! 每条分支参数化为 `M = Ms·2/π·atan(k·(H ∓ Hc))`，
//! 其中 `k = tan(π/2 · Mr/Ms) / Hc`，保证 `M(0) = ∓Mr`、`M(±Hc) = 0`。
//!
//! ## 依赖关系
//! - 被 `experiment/magnetism_type.rs` 用作拟合模型
//! - 无外部模块依赖

use std::f64::consts::FRAC_PI_2;

/// 磁场扫描方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// 磁场增大（上升分支）
    Rising,
    /// 磁场减小（下降分支）
    Falling,
}

impl SweepDirection {
    /// 逐点判断扫描方向
    ///
    /// 相邻两点磁场相同时沿用前一个方向；首点取第一个非零步长的方向。
    pub fn of_sweep(fields: &[f64]) -> Vec<SweepDirection> {
        let first = fields
            .windows(2)
            .find(|w| w[1] != w[0])
            .map(|w| Self::of_step(w[1] - w[0]))
            .unwrap_or(SweepDirection::Rising);

        let mut current = first;
        let mut directions = Vec::with_capacity(fields.len());
        for i in 0..fields.len() {
            if i > 0 {
                let step = fields[i] - fields[i - 1];
                if step != 0.0 {
                    current = Self::of_step(step);
                }
            }
            directions.push(current);
        }
        directions
    }

    fn of_step(step: f64) -> Self {
        if step > 0.0 {
            SweepDirection::Rising
        } else {
            SweepDirection::Falling
        }
    }
}

/// 磁滞回线单支
pub fn magnetic_hysteresis_branch(
    field: f64,
    saturation: f64,
    remanence: f64,
    coercivity: f64,
    direction: SweepDirection,
) -> f64 {
    let sign = match direction {
        SweepDirection::Rising => 1.0,
        SweepDirection::Falling => -1.0,
    };
    let slope = (FRAC_PI_2 * remanence / saturation).tan() / coercivity;
    saturation / FRAC_PI_2 * (slope * (field - sign * coercivity)).atan()
}

/// 完整磁滞回线：每点根据扫描方向选择分支
pub fn magnetic_hysteresis_loop(
    fields: &[f64],
    saturation: f64,
    remanence: f64,
    coercivity: f64,
) -> Vec<f64> {
    SweepDirection::of_sweep(fields)
        .into_iter()
        .zip(fields)
        .map(|(direction, &h)| {
            magnetic_hysteresis_branch(h, saturation, remanence, coercivity, direction)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_characteristic_points() {
        let (ms, mr, hc) = (2.0, 1.0, 500.0);
        let rising_zero = magnetic_hysteresis_branch(0.0, ms, mr, hc, SweepDirection::Rising);
        let falling_zero = magnetic_hysteresis_branch(0.0, ms, mr, hc, SweepDirection::Falling);
        assert!((rising_zero + mr).abs() < 1e-12);
        assert!((falling_zero - mr).abs() < 1e-12);

        let rising_hc = magnetic_hysteresis_branch(hc, ms, mr, hc, SweepDirection::Rising);
        let falling_hc = magnetic_hysteresis_branch(-hc, ms, mr, hc, SweepDirection::Falling);
        assert!(rising_hc.abs() < 1e-12);
        assert!(falling_hc.abs() < 1e-12);

        // 高场趋于饱和
        let high = magnetic_hysteresis_branch(1e9, ms, mr, hc, SweepDirection::Rising);
        assert!((high - ms).abs() < 1e-3);
    }

    #[test]
    fn test_sweep_direction() {
        let fields = [0.0, 0.0, 1.0, 2.0, 2.0, 1.0, 0.0];
        let dirs = SweepDirection::of_sweep(&fields);
        use SweepDirection::*;
        assert_eq!(dirs, vec![Rising, Rising, Rising, Rising, Rising, Falling, Falling]);

        let descending = SweepDirection::of_sweep(&[3.0, 2.0, 1.0]);
        assert!(descending.iter().all(|d| *d == Falling));
    }

    #[test]
    fn test_loop_is_open_at_zero_field() {
        let fields = [-10.0, 0.0, 10.0, 0.0, -10.0];
        let loop_ = magnetic_hysteresis_loop(&fields, 1.0, 0.5, 2.0);
        assert!((loop_[1] + 0.5).abs() < 1e-12);
        assert!((loop_[3] - 0.5).abs() < 1e-12);
    }
}
