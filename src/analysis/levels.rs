use crate::graph::Graph;
use ahash::AHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Visit {
    New,
    Open,
    Done,
}

/// Longest-path level of every node.
///
/// Traversal is seeded from all nodes without incoming edges, or from the
/// first node when every node has one. Edges that close a cycle are ignored,
/// so cyclic graphs still terminate. A node's level is the length of the
/// longest remaining path from a seed; nodes no seed reaches get level 0.
pub fn compute_levels(graph: &Graph) -> AHashMap<String, usize> {
    level_positions(graph)
        .into_iter()
        .enumerate()
        .map(|(p, level)| (graph.node_at(p).id().to_string(), level))
        .collect()
}

/// Levels indexed by node position.
pub(crate) fn level_positions(graph: &Graph) -> Vec<usize> {
    let n = graph.node_count();
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|p| graph.successor_positions(p).collect())
        .collect();
    let mut seeds: Vec<usize> = (0..n)
        .filter(|&p| graph.predecessor_positions(p).next().is_none())
        .collect();
    if seeds.is_empty() && n > 0 {
        seeds.push(0);
    }

    // Depth-first walk recording the non-back edges and a post-order.
    let mut state = vec![Visit::New; n];
    let mut forward: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut post_order = Vec::with_capacity(n);
    for &seed in &seeds {
        if state[seed] != Visit::New {
            continue;
        }
        state[seed] = Visit::Open;
        let mut stack = vec![(seed, 0usize)];
        while let Some(&(current, cursor)) = stack.last() {
            match adjacency[current].get(cursor) {
                Some(&next) => {
                    let top = stack.len() - 1;
                    stack[top].1 += 1;
                    match state[next] {
                        Visit::Open => {}
                        Visit::Done => forward[current].push(next),
                        Visit::New => {
                            forward[current].push(next);
                            state[next] = Visit::Open;
                            stack.push((next, 0));
                        }
                    }
                }
                None => {
                    state[current] = Visit::Done;
                    post_order.push(current);
                    stack.pop();
                }
            }
        }
    }

    // Reverse post-order is a topological order of the forward edges.
    let mut levels = vec![0; n];
    for &current in post_order.iter().rev() {
        for &next in &forward[current] {
            levels[next] = levels[next].max(levels[current] + 1);
        }
    }
    levels
}
