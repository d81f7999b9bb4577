use crate::error::{Error, Result};
use crate::replace::Replacer;
use crate::seq::Seq;

/// Start offsets of the complete `[i, i + size)` windows over a list of
/// `len` elements, ascending. Incomplete trailing windows are excluded.
pub fn window_starts(len: usize, size: usize, step: usize) -> Vec<usize> {
    debug_assert!(size > 0 && step > 0);
    let mut starts = Vec::new();
    let mut i = 0;
    while i + size <= len {
        starts.push(i);
        i += step;
    }
    starts
}

fn validate(op: &'static str, size: usize, step: usize) -> Result<()> {
    if size == 0 {
        return Err(Error::InvalidArgument {
            op,
            reason: "window size must be a positive integer".into(),
        });
    }
    if step == 0 {
        return Err(Error::InvalidArgument {
            op,
            reason: "window step must be a positive integer".into(),
        });
    }
    Ok(())
}

impl<T: Clone> Seq<T> {
    /// Start indices of windows whose element slice satisfies `pred`,
    /// ascending.
    pub fn find_if_window<P>(&self, size: usize, step: usize, pred: P) -> Result<Vec<usize>>
    where
        P: Fn(&[T]) -> bool,
    {
        validate("find_if_window", size, step)?;
        Ok(window_starts(self.len(), size, step)
            .into_iter()
            .filter(|&i| pred(&self.elements()[i..i + size]))
            .collect())
    }

    /// Same windows as `find_if_window`, visited from the highest valid
    /// start backward.
    pub fn find_if_reverse_window<P>(&self, size: usize, step: usize, pred: P) -> Result<Vec<usize>>
    where
        P: Fn(&[T]) -> bool,
    {
        validate("find_if_reverse_window", size, step)?;
        Ok(window_starts(self.len(), size, step)
            .into_iter()
            .rev()
            .filter(|&i| pred(&self.elements()[i..i + size]))
            .collect())
    }

    /// Replace every matched window as a whole. Matches are found on the
    /// original elements; splices are applied back-to-front on a scratch
    /// copy so position accounting stays correct despite shrinking or
    /// growing replacements.
    pub fn replace_if_window<P>(
        &self,
        size: usize,
        step: usize,
        pred: P,
        replacer: &Replacer<Seq<T>, T>,
    ) -> Result<Seq<T>>
    where
        P: Fn(&[T]) -> bool,
    {
        validate("replace_if_window", size, step)?;
        let matched: Vec<usize> = window_starts(self.len(), size, step)
            .into_iter()
            .filter(|&i| pred(&self.elements()[i..i + size]))
            .collect();
        let mut out = self.elements().to_vec();
        for &start in matched.iter().rev() {
            let window = Seq::new(self.elements()[start..start + size].to_vec());
            let items = replacer.resolve(&window, start);
            // A shrinking splice at a later overlapping window may have
            // consumed part of this one.
            let end = (start + size).min(out.len());
            out.splice(start..end, items);
        }
        Ok(Seq::new(out))
    }

    /// Reverse-iterating variant: each window is tested against the evolving
    /// scratch copy, so replacements at later positions are visible when
    /// earlier windows are examined. Windows left incomplete by shrinking
    /// replacements are skipped.
    pub fn replace_if_reverse_window<P>(
        &self,
        size: usize,
        step: usize,
        pred: P,
        replacer: &Replacer<Seq<T>, T>,
    ) -> Result<Seq<T>>
    where
        P: Fn(&[T]) -> bool,
    {
        validate("replace_if_reverse_window", size, step)?;
        let mut out = self.elements().to_vec();
        for start in window_starts(self.len(), size, step).into_iter().rev() {
            if start + size > out.len() {
                continue;
            }
            if pred(&out[start..start + size]) {
                let window = Seq::new(out[start..start + size].to_vec());
                let items = replacer.resolve(&window, start);
                out.splice(start..start + size, items);
            }
        }
        Ok(Seq::new(out))
    }
}

#[cfg(test)]
mod tests {
    use super::window_starts;
    use crate::error::Error;
    use crate::replace::Replacer;
    use crate::seq::Seq;

    fn seq(values: &[i64]) -> Seq<i64> {
        Seq::new(values.to_vec())
    }

    #[test]
    fn starts_cover_only_complete_windows() {
        assert_eq!(window_starts(6, 2, 2), vec![0, 2, 4]);
        assert_eq!(window_starts(5, 2, 2), vec![0, 2]);
        assert_eq!(window_starts(5, 3, 1), vec![0, 1, 2]);
        assert_eq!(window_starts(2, 3, 1), Vec::<usize>::new());
        assert_eq!(window_starts(0, 1, 1), Vec::<usize>::new());
    }

    #[test]
    fn zero_size_or_step_is_invalid() {
        let s = seq(&[1, 2, 3]);
        assert!(matches!(
            s.find_if_window(0, 1, |_| true),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            s.find_if_window(1, 0, |_| true),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn find_if_window_returns_matching_starts() {
        let s = seq(&[1, 1, 2, 1, 1]);
        let starts = s.find_if_window(2, 1, |w| w == [1, 1]).unwrap();
        assert_eq!(starts, vec![0, 3]);
        let reversed = s.find_if_reverse_window(2, 1, |w| w == [1, 1]).unwrap();
        assert_eq!(reversed, vec![3, 0]);
    }

    #[test]
    fn replace_if_window_splices_matches_back_to_front() {
        let s = seq(&[1, 1, 2, 1, 1]);
        let rep = Replacer::values([9]);
        let out = s.replace_if_window(2, 1, |w| w == [1, 1], &rep).unwrap();
        assert_eq!(out.to_vec(), vec![9, 2, 9]);
    }

    #[test]
    fn window_replacer_sees_the_whole_window_and_its_start() {
        let s = seq(&[1, 2, 3, 4]);
        let rep = Replacer::with(|window: &Seq<i64>, start| {
            Replacer::values([window.elements().iter().sum::<i64>(), start as i64])
        });
        let out = s.replace_if_window(2, 2, |_| true, &rep).unwrap();
        assert_eq!(out.to_vec(), vec![3, 0, 7, 2]);
    }

    #[test]
    fn reverse_variant_tests_the_evolving_scratch() {
        // Deleting the window at start 1 leaves [1, 1], which the window at
        // start 0 then matches against the evolving scratch.
        let s = seq(&[1, 2, 2, 1]);
        let delete = Replacer::values([]);
        let out = s
            .replace_if_reverse_window(2, 1, |w| w == [2, 2], &delete)
            .unwrap();
        assert_eq!(out.to_vec(), vec![1, 1]);

        let merged = out;
        assert_eq!(merged.len(), 2);

        // The forward variant matches on the original elements only.
        let forward = s.replace_if_window(2, 1, |w| w == [1, 1], &delete).unwrap();
        assert_eq!(forward.to_vec(), vec![1, 2, 2, 1]);

        // Reverse sees [1, 1] appear after the inner deletion.
        let reverse = s
            .replace_if_reverse_window(2, 1, |w| w == [2, 2] || w == [1, 1], &delete)
            .unwrap();
        assert_eq!(reverse.to_vec(), Vec::<i64>::new());
    }

    #[test]
    fn shrinking_splices_skip_windows_left_incomplete() {
        let s = seq(&[1, 1, 1]);
        let delete = Replacer::values([]);
        let out = s
            .replace_if_reverse_window(2, 1, |w| w == [1, 1], &delete)
            .unwrap();
        assert_eq!(out.to_vec(), vec![1]);
    }

    #[test]
    fn incomplete_trailing_windows_never_match() {
        let s = seq(&[5, 5, 5]);
        let starts = s.find_if_window(2, 2, |_| true).unwrap();
        assert_eq!(starts, vec![0]);
    }
}
