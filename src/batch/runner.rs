//! # 批量执行器
//!
//! 并行执行批量处理任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果顺序与输入一致
//! - 进度条显示
//!
//! ## 依赖关系
//! - 被 `experiment/mod.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::{PhysicsLabError, Result};
use crate::utils::progress;

use rayon::prelude::*;

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示使用全部 CPU）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理列表，返回与输入顺序一致的结果
    pub fn run<T, R, F>(&self, items: Vec<T>, processor: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Processing");

        // 配置 rayon 线程池
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| PhysicsLabError::Other(format!("Failed to build thread pool: {}", e)))?;

        let results: Vec<R> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_preserves_order() {
        let runner = BatchRunner::new(4);
        let squares = runner.run((0..100).collect(), |x: &i64| x * x).unwrap();
        assert_eq!(squares.len(), 100);
        assert!(squares.iter().enumerate().all(|(i, s)| *s == (i * i) as i64));
    }

    #[test]
    fn test_zero_jobs_uses_all_cpus() {
        let runner = BatchRunner::new(0);
        assert_eq!(runner.jobs, num_cpus::get());
        assert_eq!(runner.run(vec![1, 2, 3], |x: &i32| x + 1).unwrap(), vec![2, 3, 4]);
    }
}
