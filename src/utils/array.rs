//! # 数组工具
//!
//! 置换符号与一维数组的方阵化重排。
//!
//! ## 依赖关系
//! - `permutation_sign` 被 `experiment/van_der_pauw.rs` 用于几何分类
//! - `squarificate` 被 `commands/magnetism.rs` 用于 `ui::plot_grid` 布局

/// 置换符号 `sgn(σ) = (-1)^(逆序数)`
///
/// 相对于升序排列计算。对另一种排序，利用
/// `sgn(π1 ∘ π2) = sgn(π1)·sgn(π2)`。
pub fn permutation_sign<T: PartialOrd>(seq: &[T]) -> i32 {
    let mut inversions = 0usize;
    for i in 0..seq.len() {
        for j in (i + 1)..seq.len() {
            if seq[i] > seq[j] {
                inversions += 1;
            }
        }
    }
    if inversions % 2 == 0 {
        1
    } else {
        -1
    }
}

/// 将一维序列重排为近似方形的二维网格
///
/// 列数 `ceil(sqrt(n))`，行数 `ceil(n / 列数)`，空位用 `filler` 填充。
/// 例如 10 个元素得到 3×4 网格，末尾两格为 `filler`。
pub fn squarificate<T: Clone>(items: Vec<T>, filler: T) -> Vec<Vec<T>> {
    let num = items.len();
    if num == 0 {
        return Vec::new();
    }

    let ncols = (num as f64).sqrt().ceil() as usize;
    let nrows = num.div_ceil(ncols);

    let mut padded = items;
    padded.resize(nrows * ncols, filler);

    padded.chunks(ncols).map(|row| row.to_vec()).collect()
}
