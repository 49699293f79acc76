//! Maximum-weight perfect matching over a dense general graph
//!
//! Primal-dual blossom algorithm, O(n^3). This is the classic
//! dual-variable formulation: zero-slack edges form the search forest,
//! odd cycles are contracted into blossoms carrying their own duals, and
//! dual adjustments are chosen as the minimum over the usual four
//! candidate groups. Vertices are 1-indexed internally; ids above `n`
//! denote contracted blossoms.
//!
//! Correctness rather than speed is the bar here: tournament fields are
//! tens to low hundreds of competitors, so a dense O(n^3) formulation is
//! plenty and keeps the implementation auditable.
//!
//! Input weights must be non-negative; on a complete graph with strictly
//! positive weights the maximum-weight matching is necessarily perfect,
//! which is the property the pairing layer relies on after shifting its
//! weights above zero.

use std::collections::VecDeque;

const INF: i64 = i64::MAX / 4;

#[derive(Debug, Clone, Copy)]
struct Edge {
    u: usize,
    v: usize,
    w: i64,
}

/// Dense blossom solver state
///
/// Arrays are sized `2n + 1`: slot 0 is a sentinel ("no vertex"), slots
/// `1..=n` are real vertices and slots `n+1..=2n` are blossoms.
struct BlossomSolver {
    n: usize,
    n_x: usize,
    g: Vec<Vec<Edge>>,
    lab: Vec<i64>,
    mate: Vec<usize>,
    slack: Vec<usize>,
    st: Vec<usize>,
    pa: Vec<usize>,
    flower_from: Vec<Vec<usize>>,
    side: Vec<i8>,
    vis: Vec<usize>,
    flower: Vec<Vec<usize>>,
    queue: VecDeque<usize>,
    visit_token: usize,
}

impl BlossomSolver {
    fn new(n: usize, weight: &dyn Fn(usize, usize) -> i64) -> Self {
        let size = 2 * n + 1;
        let mut g = vec![vec![Edge { u: 0, v: 0, w: 0 }; size]; size];
        for u in 1..=n {
            for v in 1..=n {
                let w = if u == v { 0 } else { weight(u - 1, v - 1) };
                debug_assert!(w >= 0, "matching weights must be non-negative");
                g[u][v] = Edge { u, v, w };
            }
        }
        let mut flower_from = vec![vec![0; n + 1]; size];
        for (u, row) in flower_from.iter_mut().enumerate().take(n + 1).skip(1) {
            row[u] = u;
        }
        Self {
            n,
            n_x: n,
            g,
            lab: vec![0; size],
            mate: vec![0; size],
            slack: vec![0; size],
            st: (0..size).collect(),
            pa: vec![0; size],
            flower_from,
            side: vec![-1; size],
            vis: vec![0; size],
            flower: vec![Vec::new(); size],
            queue: VecDeque::new(),
            visit_token: 0,
        }
    }

    /// Reduced cost of an edge under the current duals (weights doubled)
    fn e_delta(&self, e: Edge) -> i64 {
        self.lab[e.u] + self.lab[e.v] - self.g[e.u][e.v].w * 2
    }

    fn update_slack(&mut self, u: usize, x: usize) {
        if self.slack[x] == 0
            || self.e_delta(self.g[u][x]) < self.e_delta(self.g[self.slack[x]][x])
        {
            self.slack[x] = u;
        }
    }

    fn set_slack(&mut self, x: usize) {
        self.slack[x] = 0;
        for u in 1..=self.n {
            if self.g[u][x].w > 0 && self.st[u] != x && self.side[self.st[u]] == 0 {
                self.update_slack(u, x);
            }
        }
    }

    fn queue_push(&mut self, x: usize) {
        if x <= self.n {
            self.queue.push_back(x);
        } else {
            let members = self.flower[x].clone();
            for t in members {
                self.queue_push(t);
            }
        }
    }

    fn set_st(&mut self, x: usize, b: usize) {
        self.st[x] = b;
        if x > self.n {
            let members = self.flower[x].clone();
            for t in members {
                self.set_st(t, b);
            }
        }
    }

    /// Position of `xr` inside blossom `b`, normalizing to an even offset by
    /// reversing the cycle tail when necessary
    fn get_pr(&mut self, b: usize, xr: usize) -> usize {
        let pr = self.flower[b]
            .iter()
            .position(|&t| t == xr)
            .expect("blossom member lookup");
        if pr % 2 == 1 {
            self.flower[b][1..].reverse();
            self.flower[b].len() - pr
        } else {
            pr
        }
    }

    fn set_match(&mut self, u: usize, v: usize) {
        self.mate[u] = self.g[u][v].v;
        if u > self.n {
            let e = self.g[u][v];
            let xr = self.flower_from[u][e.u];
            let pr = self.get_pr(u, xr);
            for i in 0..pr {
                let a = self.flower[u][i];
                let b = self.flower[u][i ^ 1];
                self.set_match(a, b);
            }
            self.set_match(xr, v);
            self.flower[u].rotate_left(pr);
        }
    }

    fn augment(&mut self, mut u: usize, mut v: usize) {
        loop {
            let xnv = self.st[self.mate[u]];
            self.set_match(u, v);
            if xnv == 0 {
                return;
            }
            self.set_match(xnv, self.st[self.pa[xnv]]);
            u = self.st[self.pa[xnv]];
            v = xnv;
        }
    }

    fn get_lca(&mut self, mut u: usize, mut v: usize) -> usize {
        self.visit_token += 1;
        let token = self.visit_token;
        while u != 0 || v != 0 {
            if u != 0 {
                if self.vis[u] == token {
                    return u;
                }
                self.vis[u] = token;
                u = self.st[self.mate[u]];
                if u != 0 {
                    u = self.st[self.pa[u]];
                }
            }
            std::mem::swap(&mut u, &mut v);
        }
        0
    }

    fn add_blossom(&mut self, u: usize, lca: usize, v: usize) {
        let mut b = self.n + 1;
        while b <= self.n_x && self.st[b] != 0 {
            b += 1;
        }
        if b > self.n_x {
            self.n_x += 1;
        }
        self.lab[b] = 0;
        self.side[b] = 0;
        self.mate[b] = self.mate[lca];
        self.flower[b].clear();
        self.flower[b].push(lca);

        let mut x = u;
        while x != lca {
            self.flower[b].push(x);
            let y = self.st[self.mate[x]];
            self.flower[b].push(y);
            self.queue_push(y);
            x = self.st[self.pa[y]];
        }
        self.flower[b][1..].reverse();

        let mut x = v;
        while x != lca {
            self.flower[b].push(x);
            let y = self.st[self.mate[x]];
            self.flower[b].push(y);
            self.queue_push(y);
            x = self.st[self.pa[y]];
        }

        self.set_st(b, b);
        for x in 1..=self.n_x {
            self.g[b][x].w = 0;
            self.g[x][b].w = 0;
        }
        for x in 1..=self.n {
            self.flower_from[b][x] = 0;
        }
        for i in 0..self.flower[b].len() {
            let xs = self.flower[b][i];
            for x in 1..=self.n_x {
                if self.g[b][x].w == 0
                    || self.e_delta(self.g[xs][x]) < self.e_delta(self.g[b][x])
                {
                    self.g[b][x] = self.g[xs][x];
                    self.g[x][b] = self.g[x][xs];
                }
            }
            for x in 1..=self.n {
                if self.flower_from[xs][x] != 0 {
                    self.flower_from[b][x] = xs;
                }
            }
        }
        self.set_slack(b);
    }

    fn expand_blossom(&mut self, b: usize) {
        for i in 0..self.flower[b].len() {
            let member = self.flower[b][i];
            self.set_st(member, member);
        }
        let xr = self.flower_from[b][self.g[b][self.pa[b]].u];
        let pr = self.get_pr(b, xr);
        let mut i = 0;
        while i < pr {
            let xs = self.flower[b][i];
            let xns = self.flower[b][i + 1];
            self.pa[xs] = self.g[xns][xs].u;
            self.side[xs] = 1;
            self.side[xns] = 0;
            self.slack[xs] = 0;
            self.set_slack(xns);
            self.queue_push(xns);
            i += 2;
        }
        self.side[xr] = 1;
        self.pa[xr] = self.pa[b];
        for i in (pr + 1)..self.flower[b].len() {
            let xs = self.flower[b][i];
            self.side[xs] = -1;
            self.set_slack(xs);
        }
        self.st[b] = 0;
    }

    /// Handle a zero-slack edge discovered from the search forest.
    /// Returns true when an augmenting path was applied.
    fn on_found_edge(&mut self, e: Edge) -> bool {
        let u = self.st[e.u];
        let v = self.st[e.v];
        if self.side[v] == -1 {
            self.pa[v] = e.u;
            self.side[v] = 1;
            let nu = self.st[self.mate[v]];
            self.slack[v] = 0;
            self.slack[nu] = 0;
            self.side[nu] = 0;
            self.queue_push(nu);
        } else if self.side[v] == 0 {
            let lca = self.get_lca(u, v);
            if lca == 0 {
                self.augment(u, v);
                self.augment(v, u);
                return true;
            }
            self.add_blossom(u, lca, v);
        }
        false
    }

    /// One phase: grow the forest and adjust duals until an augmenting path
    /// is found (true) or none with positive gain remains (false)
    fn phase(&mut self) -> bool {
        for x in 1..=self.n_x {
            self.side[x] = -1;
            self.slack[x] = 0;
        }
        self.queue.clear();
        for x in 1..=self.n_x {
            if self.st[x] == x && self.mate[x] == 0 {
                self.pa[x] = 0;
                self.side[x] = 0;
                self.queue_push(x);
            }
        }
        if self.queue.is_empty() {
            return false;
        }

        loop {
            while let Some(u) = self.queue.pop_front() {
                if self.side[self.st[u]] == 1 {
                    continue;
                }
                for v in 1..=self.n {
                    if self.g[u][v].w > 0 && self.st[u] != self.st[v] {
                        if self.e_delta(self.g[u][v]) == 0 {
                            if self.on_found_edge(self.g[u][v]) {
                                return true;
                            }
                        } else {
                            let sv = self.st[v];
                            self.update_slack(u, sv);
                        }
                    }
                }
            }

            let mut d = INF;
            for b in (self.n + 1)..=self.n_x {
                if self.st[b] == b && self.side[b] == 1 {
                    d = d.min(self.lab[b] / 2);
                }
            }
            for x in 1..=self.n_x {
                if self.st[x] == x && self.slack[x] != 0 {
                    let delta = self.e_delta(self.g[self.slack[x]][x]);
                    if self.side[x] == -1 {
                        d = d.min(delta);
                    } else if self.side[x] == 0 {
                        d = d.min(delta / 2);
                    }
                }
            }

            for u in 1..=self.n {
                match self.side[self.st[u]] {
                    0 => {
                        if self.lab[u] <= d {
                            return false;
                        }
                        self.lab[u] -= d;
                    }
                    1 => self.lab[u] += d,
                    _ => {}
                }
            }
            for b in (self.n + 1)..=self.n_x {
                if self.st[b] == b {
                    match self.side[b] {
                        0 => self.lab[b] += d * 2,
                        1 => self.lab[b] -= d * 2,
                        _ => {}
                    }
                }
            }

            self.queue.clear();
            for x in 1..=self.n_x {
                if self.st[x] == x
                    && self.slack[x] != 0
                    && self.st[self.slack[x]] != x
                    && self.e_delta(self.g[self.slack[x]][x]) == 0
                    && self.on_found_edge(self.g[self.slack[x]][x])
                {
                    return true;
                }
            }
            for b in (self.n + 1)..=self.n_x {
                if self.st[b] == b && self.side[b] == 1 && self.lab[b] == 0 {
                    self.expand_blossom(b);
                }
            }
        }
    }

    fn solve(&mut self) -> Vec<usize> {
        let mut w_max = 0;
        for u in 1..=self.n {
            for v in 1..=self.n {
                w_max = w_max.max(self.g[u][v].w);
            }
        }
        for u in 1..=self.n {
            self.lab[u] = w_max;
        }
        while self.phase() {}
        self.mate[1..=self.n].to_vec()
    }
}

/// Compute a maximum-weight matching over the complete graph on `n`
/// vertices with non-negative weights given by `weight(i, j)` (0-indexed,
/// symmetric, diagonal ignored).
///
/// Returns `mate` where `mate[i] == Some(j)` iff `i` is matched to `j`.
/// The result is deterministic for a fixed weight function.
pub fn maximum_weight_matching(
    n: usize,
    weight: &dyn Fn(usize, usize) -> i64,
) -> Vec<Option<usize>> {
    if n == 0 {
        return Vec::new();
    }
    let mut solver = BlossomSolver::new(n, weight);
    let mates = solver.solve();
    mates
        .into_iter()
        .map(|m| if m == 0 { None } else { Some(m - 1) })
        .collect()
}
