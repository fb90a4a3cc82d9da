use stockstar_core::screener::entity::{WEIGHT_SUM_TOLERANCE, WeightVector};

const DIMENSIONS: usize = 4;

/// # Summary
/// 活跃度权重的候选网格。
///
/// # Invariants
/// - 网格本身不可变；每次调用 `iter` 都从头开始枚举。
/// - 只产出通过 `WeightVector` 校验的组合（分量非负、和在容差内）。
#[derive(Debug, Clone, PartialEq)]
pub struct WeightGrid {
    // 每个分量的候选取值
    candidates: Vec<f64>,
    // 权重之和允许偏离 1 的容差
    tolerance: f64,
}

impl Default for WeightGrid {
    fn default() -> Self {
        Self::new(vec![0.1, 0.3, 0.5, 0.7, 0.9], WEIGHT_SUM_TOLERANCE)
    }
}

impl WeightGrid {
    pub fn new(candidates: Vec<f64>, tolerance: f64) -> Self {
        Self { candidates, tolerance }
    }

    pub fn candidates(&self) -> &[f64] {
        &self.candidates
    }

    /// # Summary
    /// 惰性枚举所有合法组合。
    ///
    /// # Logic
    /// 以候选集为各位数字的里程表计数，最后一个分量变化最快；
    /// 和不满足容差的组合在迭代过程中被跳过。
    pub fn iter(&self) -> WeightGridIter<'_> {
        WeightGridIter {
            grid: self,
            odometer: [0; DIMENSIONS],
            exhausted: self.candidates.is_empty(),
        }
    }
}

impl<'a> IntoIterator for &'a WeightGrid {
    type Item = WeightVector;
    type IntoIter = WeightGridIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 权重网格迭代器，由 `WeightGrid::iter` 创建。
#[derive(Debug, Clone)]
pub struct WeightGridIter<'a> {
    grid: &'a WeightGrid,
    odometer: [usize; DIMENSIONS],
    exhausted: bool,
}

impl WeightGridIter<'_> {
    fn current(&self) -> [f64; DIMENSIONS] {
        self.odometer.map(|i| self.grid.candidates[i])
    }

    /// 里程表进位；最高位溢出时标记结束。
    fn advance(&mut self) {
        let base = self.grid.candidates.len();
        for digit in self.odometer.iter_mut().rev() {
            *digit += 1;
            if *digit < base {
                return;
            }
            *digit = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for WeightGridIter<'_> {
    type Item = WeightVector;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted {
            let components = self.current();
            self.advance();
            if let Ok(weights) = WeightVector::with_tolerance(components, self.grid.tolerance) {
                return Some(weights);
            }
        }
        None
    }
}
