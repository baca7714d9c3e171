use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Nested copy of the weights of a Neuron or a Network at one point in time.
///
/// A neuron is a `Row` of leaves (its weights followed by its bias), a network
/// is a `Row` of layers, each one a `Row` of neuron rows. The difference
/// between two consecutive snapshots has the same shape and is used as
/// adjustment record by the analyser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightTree {
    Leaf(f64),
    Row(Vec<WeightTree>),
}

impl WeightTree {
    /// all scalar values in depth-first order, each with its index path
    /// (e.g. [layer, neuron, weight] for a network)
    pub fn leaves(&self) -> Vec<(Vec<usize>, f64)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut Vec::new(), &mut out);
        out
    }

    fn collect_leaves(&self, path: &mut Vec<usize>, out: &mut Vec<(Vec<usize>, f64)>) {
        match self {
            WeightTree::Leaf(value) => out.push((path.clone(), *value)),
            WeightTree::Row(children) => {
                for (i, child) in children.iter().enumerate() {
                    path.push(i);
                    child.collect_leaves(path, out);
                    path.pop();
                }
            }
        }
    }

    /// same shape, every leaf set to 0
    pub fn zeros_like(&self) -> WeightTree {
        match self {
            WeightTree::Leaf(_) => WeightTree::Leaf(0.0),
            WeightTree::Row(children) => {
                WeightTree::Row(children.iter().map(|c| c.zeros_like()).collect())
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.leaves().iter().all(|(_, value)| *value == 0.0)
    }
}

/// Anything whose weights can be observed by the analyser
pub trait Snapshot {
    fn snapshot(&self) -> WeightTree;

    /// human readable kind of subject, used in plot titles
    fn subject_name(&self) -> &'static str;
}

/// Element-wise `new - old` over two snapshots of identical shape.
pub fn compare_weights(old: &WeightTree, new: &WeightTree) -> Result<WeightTree> {
    match (old, new) {
        (WeightTree::Leaf(o), WeightTree::Leaf(n)) => Ok(WeightTree::Leaf(n - o)),
        (WeightTree::Row(o), WeightTree::Row(n)) if o.len() == n.len() => Ok(WeightTree::Row(
            o.iter()
                .zip(n.iter())
                .map(|(o, n)| compare_weights(o, n))
                .collect::<Result<Vec<_>>>()?,
        )),
        _ => Err(Error::ShapeMismatch),
    }
}
