//! Double-buffered grid.
//!
//! A [`PingPong`] holds two equally sized buffers. The *front* buffer is
//! the published state every reader sees; the *back* buffer is scratch
//! space written by a full-grid pass. [`PingPong::swap`] publishes the
//! back buffer in O(1) and recycles the old front as the next scratch.

/// Two equally sized `f32` buffers with O(1) swap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PingPong {
    front: Vec<f32>,
    back: Vec<f32>,
}

impl PingPong {
    /// Create a pair of `len`-cell buffers with the front filled with `value`.
    pub fn filled(len: usize, value: f32) -> Self {
        Self {
            front: vec![value; len],
            back: vec![0.0; len],
        }
    }

    /// Number of cells per buffer.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    /// Whether the buffers hold no cells.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// The published buffer.
    pub fn front(&self) -> &[f32] {
        &self.front
    }

    /// Mutable access to the published buffer for in-place deposits.
    pub fn front_mut(&mut self) -> &mut [f32] {
        &mut self.front
    }

    /// Borrow the published buffer for reading and the scratch buffer for
    /// writing at the same time.
    pub fn split(&mut self) -> (&[f32], &mut [f32]) {
        (&self.front, &mut self.back)
    }

    /// Publish the scratch buffer. The previous front becomes scratch.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Refill the front with `value` and zero the scratch buffer.
    pub fn reset(&mut self, len: usize, value: f32) {
        self.front.clear();
        self.front.resize(len, value);
        self.back.clear();
        self.back.resize(len, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_publishes_back_buffer() {
        let mut pp = PingPong::filled(3, 1.0);
        {
            let (front, back) = pp.split();
            for (b, f) in back.iter_mut().zip(front) {
                *b = f * 2.0;
            }
        }
        assert_eq!(pp.front(), &[1.0, 1.0, 1.0]);
        pp.swap();
        assert_eq!(pp.front(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn reset_resizes_both_buffers() {
        let mut pp = PingPong::filled(2, 0.5);
        pp.reset(5, 1.0);
        assert_eq!(pp.len(), 5);
        assert!(pp.front().iter().all(|&v| v == 1.0));
        let (_, back) = pp.split();
        assert_eq!(back.len(), 5);
        assert!(back.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_by_default() {
        let pp = PingPong::default();
        assert!(pp.is_empty());
        assert_eq!(pp.len(), 0);
    }
}
