//! Flat storage for growth agents.
//!
//! Agents carry no parent/child links: a split appends an independent
//! [`Branch`], and expiry filters it out.

use rand::Rng;

/// One gradient-following growth agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    /// Column position in grid units, in `[0, width)`.
    pub x: f32,
    /// Row position in grid units, in `[0, height)`.
    pub y: f32,
    /// Heading, horizontal component.
    pub dx: f32,
    /// Heading, vertical component (pre-aspect).
    pub dy: f32,
    /// Ticks survived.
    pub age: u32,
    /// How strongly this branch deposits and nourishes, in `[0.1, 0.35]`.
    pub burst: f32,
}

impl Branch {
    /// A fresh branch at `(x, y)` with heading `(dx, dy)`.
    pub fn new(x: f32, y: f32, dx: f32, dy: f32, burst: f32) -> Self {
        Self {
            x,
            y,
            dx,
            dy,
            age: 0,
            burst,
        }
    }

    /// Current position.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// Bounded population of branches.
#[derive(Clone, Debug, PartialEq)]
pub struct Colony {
    branches: Vec<Branch>,
    limit: usize,
}

impl Colony {
    /// An empty colony that holds at most `limit` branches.
    pub fn new(limit: usize) -> Self {
        Self {
            branches: Vec::with_capacity(limit),
            limit,
        }
    }

    /// Maximum population.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Current population.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Whether the colony is empty.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Whether another branch fits under the limit.
    pub fn has_headroom(&self) -> bool {
        self.branches.len() < self.limit
    }

    /// All live branches in insertion order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Add a branch. Returns `false` and drops it when the colony is full.
    pub fn push(&mut self, branch: Branch) -> bool {
        if self.has_headroom() {
            self.branches.push(branch);
            true
        } else {
            false
        }
    }

    /// Remove every branch.
    pub fn clear(&mut self) {
        self.branches.clear();
    }

    /// Move every branch out, leaving the colony empty.
    ///
    /// Used by the growth pass, which advances branches while deciding
    /// which survive and which split.
    pub fn take(&mut self) -> Vec<Branch> {
        std::mem::take(&mut self.branches)
    }

    /// Install `branches` as the live population, truncated to the limit.
    pub fn restore(&mut self, mut branches: Vec<Branch>) {
        branches.truncate(self.limit);
        self.branches = branches;
    }

    /// Pick one branch uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Branch> {
        if self.branches.is_empty() {
            None
        } else {
            self.branches.get(rng.random_range(0..self.branches.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn branch(x: f32) -> Branch {
        Branch::new(x, 0.0, 1.0, 0.0, 0.2)
    }

    #[test]
    fn push_refuses_past_limit() {
        let mut colony = Colony::new(2);
        assert!(colony.push(branch(0.0)));
        assert!(colony.push(branch(1.0)));
        assert!(!colony.has_headroom());
        assert!(!colony.push(branch(2.0)));
        assert_eq!(colony.len(), 2);
    }

    #[test]
    fn take_empties_colony() {
        let mut colony = Colony::new(4);
        colony.push(branch(0.0));
        colony.push(branch(1.0));
        let taken = colony.take();
        assert_eq!(taken.len(), 2);
        assert!(colony.is_empty());
        assert_eq!(colony.limit(), 4);
        colony.restore(taken);
        assert_eq!(colony.len(), 2);
    }

    #[test]
    fn restore_truncates_to_limit() {
        let mut colony = Colony::new(3);
        colony.restore((0..5).map(|i| branch(i as f32)).collect());
        assert_eq!(colony.len(), 3);
        assert_eq!(colony.branches()[2].x, 2.0);
    }

    #[test]
    fn choose_returns_member() {
        let mut colony = Colony::new(8);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(colony.choose(&mut rng).is_none());
        for i in 0..5 {
            colony.push(branch(i as f32));
        }
        for _ in 0..20 {
            let picked = colony.choose(&mut rng).unwrap();
            assert!(colony.branches().contains(picked));
        }
    }

    #[test]
    fn new_branch_starts_at_age_zero() {
        let b = Branch::new(3.0, 4.0, 0.0, 1.0, 0.3);
        assert_eq!(b.age, 0);
        assert_eq!(b.position(), (3.0, 4.0));
    }
}
