use ndarray::{ArrayView1, Zip};

use crate::{Float, Sample};

/// A distance function between feature vectors.
///
/// `rdistance` is a cheaper "reduced" distance that preserves ordering, used
/// when only the ranking of candidates matters.
pub trait Distance<F: Float>: Clone + Send + Sync {
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F;

    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.distance(a, b)
    }

    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist
    }

    fn dist_to_rdist(&self, dist: F) -> F {
        dist
    }
}

/// Euclidean (L2) distance. The reduced distance is the squared distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L2Dist;

impl<F: Float> Distance<F> for L2Dist {
    #[inline]
    fn distance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        self.rdistance(a, b).sqrt()
    }

    #[inline]
    fn rdistance(&self, a: ArrayView1<F>, b: ArrayView1<F>) -> F {
        debug_assert_eq!(a.len(), b.len());
        Zip::from(&a).and(&b).fold(F::zero(), |acc, &x, &y| {
            let d = x - y;
            acc + d * d
        })
    }

    #[inline]
    fn rdist_to_dist(&self, rdist: F) -> F {
        rdist.sqrt()
    }

    #[inline]
    fn dist_to_rdist(&self, dist: F) -> F {
        dist * dist
    }
}

/// Euclidean distance between the feature vectors of two samples.
///
/// Labels are ignored.
pub fn euclidean<F: Float>(a: &Sample<F>, b: &Sample<F>) -> F {
    L2Dist.distance(a.features(), b.features())
}
