//! # 电学量模块
//!
//! 电阻、方块电阻、电阻率、载流子浓度与迁移率的换算。
//!
//! ## 依赖关系
//! - 被 `experiment/van_der_pauw.rs`, `experiment/hall.rs` 使用
//! - 无外部模块依赖

use crate::error::{PhysicsLabError, Result};

/// 元电荷 (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// 电阻：物体属性
pub struct Resistance;

impl Resistance {
    /// 欧姆定律 R = V / I
    pub fn from_ohms_law(voltage: f64, current: f64) -> Result<f64> {
        if current == 0.0 {
            return Err(PhysicsLabError::InvalidArgument(
                "current must be non-zero for Ohm's law".to_string(),
            ));
        }
        Ok(voltage / current)
    }
}

/// 方块电阻：薄层属性
pub struct SheetResistance;

impl SheetResistance {
    pub const UNIT: &'static str = "ohms per square";
}

/// 电阻率：材料属性
pub struct Resistivity;

impl Resistivity {
    pub const UNIT: &'static str = "ohm-meter";

    /// 由方块电阻 (ohms per square) 和厚度 (m) 计算电阻率
    pub fn from_sheet_resistance(sheet_resistance: f64, thickness: f64) -> f64 {
        sheet_resistance * thickness
    }
}

/// 载流子浓度 (m⁻³) = 面载流子密度 (m⁻²) / 厚度 (m)
pub fn carrier_concentration(sheet_density: f64, thickness: f64) -> Result<f64> {
    if thickness <= 0.0 {
        return Err(PhysicsLabError::InvalidArgument(format!(
            "thickness must be positive, got {}",
            thickness
        )));
    }
    Ok(sheet_density / thickness)
}

/// 迁移率
pub struct Mobility;

impl Mobility {
    pub const UNIT: &'static str = "m^2/(V*s)";

    /// μ = 1 / (e · n_s · R_s)
    pub fn from_sheets(sheet_density: f64, sheet_resistance: f64) -> Result<f64> {
        let denominator = ELEMENTARY_CHARGE * sheet_density * sheet_resistance;
        if denominator == 0.0 {
            return Err(PhysicsLabError::InvalidArgument(
                "sheet density and sheet resistance must be non-zero".to_string(),
            ));
        }
        Ok(1.0 / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ohms_law() {
        assert!((Resistance::from_ohms_law(5.0, 0.5).unwrap() - 10.0).abs() < 1e-12);
        assert!(Resistance::from_ohms_law(1.0, 0.0).is_err());
    }

    #[test]
    fn test_resistivity() {
        assert!((Resistivity::from_sheet_resistance(100.0, 1e-7) - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn test_mobility_roundtrip() {
        // n_s = 1e16 m^-2, R_s = 1000 ohm/sq -> μ = 1 / (e * 1e19)
        let mu = Mobility::from_sheets(1e16, 1000.0).unwrap();
        assert!((mu - 1.0 / (ELEMENTARY_CHARGE * 1e19)).abs() / mu < 1e-12);
        assert!(carrier_concentration(1e16, 0.0).is_err());
        assert!((carrier_concentration(1e16, 1e-6).unwrap() - 1e22).abs() < 1e8);
    }
}
