//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `van-der-pauw`: Van der Pauw 方块电阻
//! - `hall`: 霍尔效应
//! - `magnetism`: 磁性类型分离
//! - `curie`: 居里温度
//! - `geometry`: 接触几何分类与对称变换
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: batch, van_der_pauw, hall, magnetism, curie, geometry

pub mod batch;
pub mod curie;
pub mod geometry;
pub mod hall;
pub mod magnetism;
pub mod van_der_pauw;

use clap::{Parser, Subcommand};

/// physicslab - 物理实验室测量数据处理工具
#[derive(Parser)]
#[command(name = "physicslab")]
#[command(author = "Martin Brajer")]
#[command(version)]
#[command(about = "Processing of common physics laboratory measurements", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Sheet resistance from Van der Pauw four-contact measurements
    VanDerPauw(van_der_pauw::VanDerPauwArgs),

    /// Sheet density, carrier type and mobility from Hall measurements
    Hall(hall::HallArgs),

    /// Separate magnetization sweeps into diamagnetic and ferromagnetic parts
    Magnetism(magnetism::MagnetismArgs),

    /// Estimate Curie temperature from magnetization vs temperature
    Curie(curie::CurieArgs),

    /// Classify a Van der Pauw contact geometry and list its symmetry images
    Geometry(geometry::GeometryArgs),
}
