//! Weighted CART tree (Gini impurity) over a dense feature matrix.

use ndarray::{Array2, ArrayView1};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        p_bot: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TreeParams {
    /// Non-constant features examined per split
    pub max_features: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct Builder<'a, R: Rng + ?Sized> {
    x: &'a Array2<f64>,
    y: &'a [bool],
    weights: &'a [f64],
    params: TreeParams,
    rng: &'a mut R,
    nodes: Vec<Node>,
}

/// Weighted Gini impurity times node weight: 2ab / (a + b).
fn weighted_gini(w0: f64, w1: f64) -> f64 {
    let total = w0 + w1;
    if total <= 0.0 {
        0.0
    } else {
        2.0 * w0 * w1 / total
    }
}

impl<R: Rng + ?Sized> Builder<'_, R> {
    fn class_weights(&self, idx: &[usize]) -> (f64, f64) {
        idx.iter().fold((0.0, 0.0), |(w0, w1), &i| {
            if self.y[i] {
                (w0, w1 + self.weights[i])
            } else {
                (w0 + self.weights[i], w1)
            }
        })
    }

    fn build(&mut self, idx: Vec<usize>, depth: usize) -> usize {
        let (w0, w1) = self.class_weights(&idx);
        let id = self.nodes.len();
        let p_bot = if w0 + w1 > 0.0 { w1 / (w0 + w1) } else { 0.0 };
        self.nodes.push(Node::Leaf { p_bot });

        let pure = w0 == 0.0 || w1 == 0.0;
        let too_deep = self.params.max_depth.is_some_and(|d| depth >= d);
        if pure || too_deep || idx.len() < self.params.min_samples_split {
            return id;
        }

        let Some((feature, threshold)) = self.best_split(&idx, w0, w1) else {
            return id;
        };
        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = idx
            .into_iter()
            .partition(|&i| self.x[[i, feature]] <= threshold);

        let left = self.build(left_idx, depth + 1);
        let right = self.build(right_idx, depth + 1);
        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    /// Lowest weighted child impurity over a random feature order. Constant
    /// features do not count towards `max_features`.
    fn best_split(&mut self, idx: &[usize], w0: f64, w1: f64) -> Option<(usize, f64)> {
        let mut order: Vec<usize> = (0..self.x.ncols()).collect();
        order.shuffle(&mut *self.rng);

        let mut best: Option<(f64, usize, f64)> = None;
        let mut examined = 0;
        let mut sorted = idx.to_vec();

        for f in order {
            if examined >= self.params.max_features {
                break;
            }
            let col = self.x.column(f);
            sorted.sort_by(|&a, &b| col[a].total_cmp(&col[b]));
            let (first, last) = (col[sorted[0]], col[sorted[sorted.len() - 1]]);
            if first == last {
                continue;
            }
            examined += 1;

            let (mut l0, mut l1) = (0.0, 0.0);
            for k in 0..sorted.len() - 1 {
                let i = sorted[k];
                if self.y[i] {
                    l1 += self.weights[i];
                } else {
                    l0 += self.weights[i];
                }
                let (v, next) = (col[i], col[sorted[k + 1]]);
                if next <= v {
                    continue;
                }
                let impurity = weighted_gini(l0, l1) + weighted_gini(w0 - l0, w1 - l1);
                if best.map_or(true, |(b, _, _)| impurity < b) {
                    let mut threshold = v / 2.0 + next / 2.0;
                    if threshold >= next {
                        threshold = v;
                    }
                    best = Some((impurity, f, threshold));
                }
            }
        }
        best.map(|(_, f, t)| (f, t))
    }
}

impl DecisionTree {
    /// Grow a tree on the rows with positive weight.
    pub(crate) fn grow<R: Rng + ?Sized>(
        x: &Array2<f64>,
        y: &[bool],
        weights: &[f64],
        params: TreeParams,
        rng: &mut R,
    ) -> Self {
        let idx: Vec<usize> = (0..y.len()).filter(|&i| weights[i] > 0.0).collect();
        let mut builder = Builder {
            x,
            y,
            weights,
            params,
            rng,
            nodes: Vec::new(),
        };
        if idx.is_empty() {
            builder.nodes.push(Node::Leaf { p_bot: 0.0 });
        } else {
            builder.build(idx, 0);
        }
        Self {
            nodes: builder.nodes,
        }
    }

    /// Class-weighted bot fraction of the leaf `row` falls into.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { p_bot } => return *p_bot,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }
}
