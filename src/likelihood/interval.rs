//! Likelihood intervals over a hypothesis grid.
//!
//! A [`LikelihoodInterval`] is the set of grid points whose likelihood ratio
//! to the maximum-likelihood point is at least a threshold. The set is not
//! assumed to be contiguous: a multimodal surface can produce several
//! separated runs, reported through [`LikelihoodInterval::segments`] and
//! [`LikelihoodInterval::is_contiguous`].
use crate::likelihood::options::LikelihoodThreshold;

/// `LikelihoodInterval` — grid points supported at a given threshold.
///
/// Fields
/// ------
/// - `threshold`: [`LikelihoodThreshold`]
///   Cutoff on the ratio `L(h) / L(ĥ)`.
/// - `indices`: `Vec<usize>`
///   Member grid indices in increasing order. Never empty: the
///   maximum-likelihood point always belongs to its own interval.
/// - `hypotheses`: `Vec<f64>`
///   Grid values at `indices`.
/// - `grid_len`: `usize`
///   Length of the grid the interval was computed on.
///
/// Invariants
/// ----------
/// - `indices.len() == hypotheses.len() >= 1`.
/// - `indices` is strictly increasing and every entry is `< grid_len`.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodInterval {
    threshold: LikelihoodThreshold,
    indices: Vec<usize>,
    hypotheses: Vec<f64>,
    grid_len: usize,
}

impl LikelihoodInterval {
    pub(crate) fn new(
        threshold: LikelihoodThreshold, indices: Vec<usize>, hypotheses: Vec<f64>,
        grid_len: usize,
    ) -> Self {
        LikelihoodInterval { threshold, indices, hypotheses, grid_len }
    }

    /// Threshold the interval was computed at.
    pub fn threshold(&self) -> LikelihoodThreshold {
        self.threshold
    }

    /// Member grid indices, increasing.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Member hypothesis values, increasing.
    pub fn hypotheses(&self) -> &[f64] {
        &self.hypotheses
    }

    /// Number of member grid points.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Smallest and largest member hypothesis.
    ///
    /// For a non-contiguous interval these bounds enclose excluded points;
    /// check [`is_contiguous`](Self::is_contiguous) before reporting them as
    /// an interval.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((*self.hypotheses.first()?, *self.hypotheses.last()?))
    }

    /// `true` when the members form a single run of adjacent grid points.
    pub fn is_contiguous(&self) -> bool {
        self.indices.windows(2).all(|w| w[1] == w[0] + 1)
    }

    /// Maximal runs of adjacent member grid points as `(lower, upper)`
    /// hypothesis pairs.
    pub fn segments(&self) -> Vec<(f64, f64)> {
        let mut segments = Vec::new();
        let mut start = 0;
        for k in 1..=self.indices.len() {
            let run_ends = k == self.indices.len() || self.indices[k] != self.indices[k - 1] + 1;
            if run_ends {
                segments.push((self.hypotheses[start], self.hypotheses[k - 1]));
                start = k;
            }
        }
        segments
    }

    /// `true` when the interval reaches the first or last grid point, so the
    /// true interval may extend beyond the grid.
    pub fn touches_grid_edge(&self) -> bool {
        match (self.indices.first(), self.indices.last()) {
            (Some(&first), Some(&last)) => first == 0 || last + 1 == self.grid_len,
            _ => false,
        }
    }
}

impl std::fmt::Display for LikelihoodInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} likelihood interval: ", self.threshold)?;
        let segments = self.segments();
        for (k, (lo, hi)) in segments.iter().enumerate() {
            if k > 0 {
                write!(f, " ∪ ")?;
            }
            write!(f, "[{lo}, {hi}]")?;
        }
        if segments.len() > 1 {
            write!(f, " (non-contiguous)")?;
        }
        Ok(())
    }
}
