use crate::graph::Graph;
use itertools::Itertools;

/// Enumerates every elementary cycle.
///
/// Each cycle is reported once, rotated so that it begins at the member that
/// comes first in insertion order. Parallel edges do not produce duplicates;
/// a self-loop is a cycle of one node.
///
/// Runs Johnson's circuit search: from each start node the search stays inside
/// the strongly connected component of that node among the nodes at or after
/// it, and blocked nodes are only revisited once a cycle through them closes.
pub fn simple_cycles(graph: &Graph) -> Vec<Vec<String>> {
    let n = graph.node_count();
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|p| graph.successor_positions(p).unique().collect())
        .collect();
    let mut reverse = vec![Vec::new(); n];
    for (source, targets) in adjacency.iter().enumerate() {
        for &target in targets {
            reverse[target].push(source);
        }
    }

    let mut search = Search::new(&adjacency, n);
    for start in 0..n {
        let component = component_from(&adjacency, &reverse, start);
        if !component[start] {
            continue;
        }
        search.reset(start, component);
        search.circuit(start);
    }

    search
        .found
        .into_iter()
        .map(|cycle| {
            cycle
                .into_iter()
                .map(|p| graph.node_at(p).id().to_string())
                .collect()
        })
        .collect()
}

/// Nodes at or after `start` that both reach it and are reachable from it.
/// `start` itself is included only when it lies on a cycle.
fn component_from(adjacency: &[Vec<usize>], reverse: &[Vec<usize>], start: usize) -> Vec<bool> {
    let forward = reach(adjacency, start);
    let backward = reach(reverse, start);
    let mut component: Vec<bool> = forward
        .iter()
        .zip(&backward)
        .map(|(&f, &b)| f && b)
        .collect();
    // `reach` marks the origin, so check it has a real cycle through it.
    component[start] = adjacency[start]
        .iter()
        .any(|&next| next >= start && backward[next]);
    component
}

fn reach(adjacency: &[Vec<usize>], start: usize) -> Vec<bool> {
    let mut seen = vec![false; adjacency.len()];
    seen[start] = true;
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for &next in &adjacency[node] {
            if next >= start && !seen[next] {
                seen[next] = true;
                stack.push(next);
            }
        }
    }
    seen
}

struct Search<'a> {
    adjacency: &'a [Vec<usize>],
    start: usize,
    component: Vec<bool>,
    blocked: Vec<bool>,
    blocked_by: Vec<Vec<usize>>,
    path: Vec<usize>,
    found: Vec<Vec<usize>>,
}

impl<'a> Search<'a> {
    fn new(adjacency: &'a [Vec<usize>], n: usize) -> Self {
        Self {
            adjacency,
            start: 0,
            component: vec![false; n],
            blocked: vec![false; n],
            blocked_by: vec![Vec::new(); n],
            path: Vec::new(),
            found: Vec::new(),
        }
    }

    fn reset(&mut self, start: usize, component: Vec<bool>) {
        self.start = start;
        self.component = component;
        self.blocked.fill(false);
        self.blocked_by.iter_mut().for_each(Vec::clear);
        self.path.clear();
    }

    fn circuit(&mut self, node: usize) -> bool {
        let adjacency = self.adjacency;
        let mut closed = false;
        self.path.push(node);
        self.blocked[node] = true;

        for &next in &adjacency[node] {
            if !self.component[next] {
                continue;
            }
            if next == self.start {
                self.found.push(self.path.clone());
                closed = true;
            } else if !self.blocked[next] && self.circuit(next) {
                closed = true;
            }
        }

        if closed {
            self.unblock(node);
        } else {
            for &next in &adjacency[node] {
                if self.component[next] && !self.blocked_by[next].contains(&node) {
                    self.blocked_by[next].push(node);
                }
            }
        }
        self.path.pop();
        closed
    }

    fn unblock(&mut self, node: usize) {
        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if self.blocked[current] {
                self.blocked[current] = false;
                pending.append(&mut self.blocked_by[current]);
            }
        }
    }
}
