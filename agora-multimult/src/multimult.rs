use crate::heap::{IndexHeap, TwoMax};
use crate::scalar::Weight;
use crate::MultiMultError;

use group::Group;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Once the largest weight is this many bits longer than the runner-up, it is
/// multiplied out directly instead of being worn down by repeated subtraction.
const MAX_BIT_GAP: usize = 4;

#[derive(Debug, Clone)]
pub struct Pair<G, K> {
    pub point: G,
    pub weight: K,
}

/// Accumulates `(point, weight)` pairs and evaluates `sum(weight * point)`
/// with the Bos–Coster method.
#[derive(Debug, Clone)]
pub struct MultiMult<G, K> {
    pairs: Vec<Pair<G, K>>,
    known: Vec<usize>,
}

impl<G: Group, K: Weight> Default for MultiMult<G, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Group, K: Weight> MultiMult<G, K> {
    pub fn new() -> Self {
        Self {
            pairs: vec![],
            known: vec![],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
            known: vec![],
        }
    }

    pub fn from_slices(points: &[G], weights: &[K]) -> Result<Self, MultiMultError> {
        if points.len() != weights.len() {
            return Err(MultiMultError::InvalidInputLengths(
                points.len(),
                weights.len(),
            ));
        }
        let mut multimult = Self::with_capacity(points.len());
        for (point, weight) in points.iter().zip(weights) {
            multimult.insert(*point, weight.clone());
        }
        Ok(multimult)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Registers a point that is expected to be inserted several times.
    /// Weights inserted for it later are summed into a single pair.
    pub fn add_known(&mut self, point: G) {
        if self.find_known(&point).is_none() {
            self.known.push(self.pairs.len());
            self.pairs.push(Pair {
                point,
                weight: K::zero(),
            });
        }
    }

    pub fn insert(&mut self, point: G, weight: K) {
        if let Some(position) = self.find_known(&point) {
            self.pairs[position].weight.add_assign_weight(&weight);
        } else {
            self.pairs.push(Pair { point, weight });
        }
    }

    pub fn insert_pair(&mut self, pair: Pair<G, K>) {
        self.pairs.push(pair);
    }

    fn find_known(&self, point: &G) -> Option<usize> {
        self.known
            .iter()
            .copied()
            .find(|&position| self.pairs[position].point == *point)
    }

    pub fn evaluate(self) -> G {
        let (mut points, mut weights): (Vec<G>, Vec<K>) = self
            .pairs
            .into_iter()
            .filter(|pair| !pair.weight.is_zero())
            .map(|pair| (pair.point, pair.weight))
            .unzip();

        match weights.len() {
            0 => return G::identity(),
            1 => return mul_weight(&points[0], &weights[0]),
            _ => {}
        }

        let mut heap = (0..weights.len()).collect::<Vec<usize>>();
        let mut hlen = heap.len();
        IndexHeap::init(&mut heap, &weights);

        let mut acc = G::identity();
        let mut rounds = 0_usize;
        let mut direct = 0_usize;
        loop {
            // zero weights leave the heap as soon as they appear
            let (a, b) = match IndexHeap::get_two_max(&heap[..hlen], &weights) {
                Some(TwoMax {
                    max1,
                    max2: Some(max2),
                }) => (max1, max2),
                Some(TwoMax { max1, max2: None }) => {
                    acc += mul_weight(&points[max1], &weights[max1]);
                    break;
                }
                None => break,
            };

            if weights[a].bits() > weights[b].bits() + MAX_BIT_GAP {
                let weight = std::mem::replace(&mut weights[a], K::zero());
                acc += mul_weight(&points[a], &weight);
                direct += 1;
            } else {
                let subtrahend = weights[b].clone();
                weights[a].sub_assign_smaller(&subtrahend);
                let addend = points[a];
                points[b] += addend;
                rounds += 1;
            }

            if weights[a].is_zero() {
                heap.swap(0, hlen - 1);
                hlen -= 1;
            }
            IndexHeap::root_replaced(&mut heap[..hlen], &weights);
        }

        tracing::debug!(
            pairs = weights.len(),
            rounds,
            direct,
            "bos-coster evaluation finished"
        );
        acc
    }
}

/// Evaluates independent multiplications, in parallel with the `parallel`
/// feature.
#[cfg(feature = "parallel")]
pub fn evaluate_batch<G, K>(batch: Vec<MultiMult<G, K>>) -> Vec<G>
where
    G: Group,
    K: Weight + Send,
{
    batch.into_par_iter().map(MultiMult::evaluate).collect()
}

/// Evaluates independent multiplications, in parallel with the `parallel`
/// feature.
#[cfg(not(feature = "parallel"))]
pub fn evaluate_batch<G, K>(batch: Vec<MultiMult<G, K>>) -> Vec<G>
where
    G: Group,
    K: Weight,
{
    batch.into_iter().map(MultiMult::evaluate).collect()
}

/// Computes `sum(weights[i] * points[i])` one term at a time.
pub fn naive_msm<G: Group, K: Weight>(points: &[G], weights: &[K]) -> Result<G, MultiMultError> {
    if points.len() != weights.len() {
        return Err(MultiMultError::InvalidInputLengths(
            points.len(),
            weights.len(),
        ));
    }
    Ok(points
        .iter()
        .zip(weights)
        .fold(G::identity(), |acc, (point, weight)| {
            acc + mul_weight(point, weight)
        }))
}

/// Variable-time double-and-add.
fn mul_weight<G: Group, K: Weight>(point: &G, weight: &K) -> G {
    let mut acc = G::identity();
    for i in (0..weight.bits()).rev() {
        acc = acc.double();
        if weight.bit(i) {
            acc += point;
        }
    }
    acc
}
