#![deny(clippy::all)]
#![deny(clippy::dbg_macro)]

pub mod heap;
pub mod multimult;
mod scalar;

pub use heap::{IndexHeap, TwoMax};
pub use multimult::{evaluate_batch, naive_msm, MultiMult, Pair};
pub use scalar::Weight;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MultiMultError {
    #[error("unequal slice lengths: {0} and {1}")]
    InvalidInputLengths(usize, usize),
}
