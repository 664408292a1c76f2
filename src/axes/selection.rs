use crate::ShortVec;

/// Every way of choosing `nselect` distinct axes out of `naxes`, without repetition.
///
/// Selections are ascending and come out in a fixed order starting from `[0, 1, .., nselect - 1]`,
/// with the lowest-numbered indices varying fastest.
/// Choosing zero axes yields a single empty selection.
#[derive(Debug, Clone)]
pub struct AxisSelections {
    naxes: usize,
    current: ShortVec<usize>,
    exhausted: bool,
}

impl AxisSelections {
    pub fn new(naxes: usize, nselect: usize) -> Self {
        Self {
            naxes,
            current: (0..nselect).collect(),
            exhausted: nselect > naxes,
        }
    }

    /// Start again from the first selection.
    pub fn restart(&mut self) {
        let nselect = self.current.len();
        self.current.clear();
        self.current.extend(0..nselect);
        self.exhausted = nselect > self.naxes;
    }

    /// Step `current` on to the next selection.
    /// Returns false once every selection has been produced.
    fn advance(&mut self) -> bool {
        let nselect = self.current.len();
        if nselect == 0 {
            return false;
        }

        let sel = &mut self.current;
        for idx in 0..nselect {
            // increment the first index which won't collide with its neighbour,
            // then reset those below it
            if idx == nselect - 1 || sel[idx + 1] > sel[idx] + 1 {
                sel[idx] += 1;
                for (i, s) in sel[..idx].iter_mut().enumerate() {
                    *s = i;
                }
                break;
            }
        }
        sel[nselect - 1] < self.naxes
    }
}

impl Iterator for AxisSelections {
    type Item = ShortVec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let out = self.current.clone();
        self.exhausted = !self.advance();
        Some(out)
    }
}
