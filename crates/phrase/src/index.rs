use crate::error::{Error, IndexFailure, Result};
use crate::seq::Seq;

/// How the upper bound of the valid range is treated during resolution.
///
/// - `Exclusive`: positions must exist, valid range is `[0, len)`.
/// - `Inclusive`: a position may equal the length, valid range is `[0, len]`.
///   Used by split-point specifications, where a boundary at the end of the
///   sequence is legitimate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RangeMode {
    Exclusive,
    Inclusive,
}

/// A bulk index specification: a single signed index, a list of signed
/// indices, or a sequence of them. Negative values count from the end
/// (`-1` is the last element).
pub trait IndexSpec {
    fn raw_indices(&self) -> Vec<i64>;
}

impl IndexSpec for i64 {
    fn raw_indices(&self) -> Vec<i64> {
        vec![*self]
    }
}

impl IndexSpec for &[i64] {
    fn raw_indices(&self) -> Vec<i64> {
        self.to_vec()
    }
}

impl<const N: usize> IndexSpec for [i64; N] {
    fn raw_indices(&self) -> Vec<i64> {
        self.to_vec()
    }
}

impl IndexSpec for Vec<i64> {
    fn raw_indices(&self) -> Vec<i64> {
        self.clone()
    }
}

impl IndexSpec for &Seq<i64> {
    fn raw_indices(&self) -> Vec<i64> {
        self.elements().to_vec()
    }
}

fn resolve_raw(index: i64, len: usize, mode: RangeMode) -> Option<usize> {
    let candidate = if index < 0 {
        (len as i64) + index
    } else {
        index
    };
    let upper = match mode {
        RangeMode::Exclusive => len as i64,
        RangeMode::Inclusive => (len as i64) + 1,
    };
    if (0..upper).contains(&candidate) {
        Some(candidate as usize)
    } else {
        None
    }
}

/// Resolve a single signed index against `len`.
pub fn resolve_one(op: &'static str, index: i64, len: usize, mode: RangeMode) -> Result<usize> {
    resolve_raw(index, len, mode).ok_or_else(|| Error::IndexOutOfRange {
        op,
        len,
        failures: vec![IndexFailure {
            position: 0,
            value: index,
        }],
    })
}

/// Resolve a bulk specification against `len`.
///
/// The output order mirrors the input order (not sorted). Either every entry
/// resolves or the call fails as a whole with one aggregate error listing
/// every failing entry; partial success is not permitted.
pub fn resolve_many<S: IndexSpec + ?Sized>(
    op: &'static str,
    spec: &S,
    len: usize,
    mode: RangeMode,
) -> Result<Vec<usize>> {
    let raw = spec.raw_indices();
    let mut resolved = Vec::with_capacity(raw.len());
    let mut failures = Vec::new();
    for (position, &value) in raw.iter().enumerate() {
        match resolve_raw(value, len, mode) {
            Some(abs) => resolved.push(abs),
            None => failures.push(IndexFailure { position, value }),
        }
    }
    if failures.is_empty() {
        Ok(resolved)
    } else {
        Err(Error::IndexOutOfRange { op, len, failures })
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeMode, resolve_many, resolve_one};
    use crate::error::Error;
    use crate::seq::Seq;

    #[test]
    fn resolve_one_succeeds_exactly_within_signed_bounds() {
        let len = 5;
        for i in -(len as i64)..(len as i64) {
            assert!(resolve_one("op", i, len, RangeMode::Exclusive).is_ok(), "i={i}");
        }
        assert!(resolve_one("op", -(len as i64) - 1, len, RangeMode::Exclusive).is_err());
        assert!(resolve_one("op", len as i64, len, RangeMode::Exclusive).is_err());
    }

    #[test]
    fn negative_one_resolves_to_last() {
        assert_eq!(resolve_one("op", -1, 5, RangeMode::Exclusive).unwrap(), 4);
        assert_eq!(resolve_one("op", -1, 1, RangeMode::Exclusive).unwrap(), 0);
    }

    #[test]
    fn inclusive_mode_extends_the_upper_bound_by_one() {
        assert_eq!(resolve_one("op", 5, 5, RangeMode::Inclusive).unwrap(), 5);
        assert!(resolve_one("op", 6, 5, RangeMode::Inclusive).is_err());
        assert_eq!(resolve_one("op", -1, 5, RangeMode::Inclusive).unwrap(), 4);
    }

    #[test]
    fn empty_length_rejects_everything_exclusive() {
        assert!(resolve_one("op", 0, 0, RangeMode::Exclusive).is_err());
        assert!(resolve_one("op", -1, 0, RangeMode::Exclusive).is_err());
        assert_eq!(resolve_one("op", 0, 0, RangeMode::Inclusive).unwrap(), 0);
    }

    #[test]
    fn resolve_many_mirrors_input_order() {
        let resolved = resolve_many("op", &[3, 0, -1], 5, RangeMode::Exclusive).unwrap();
        assert_eq!(resolved, vec![3, 0, 4]);
    }

    #[test]
    fn resolve_many_accepts_a_sequence_spec() {
        let spec = Seq::new(vec![0_i64, -2]);
        let resolved = resolve_many("op", &&spec, 4, RangeMode::Exclusive).unwrap();
        assert_eq!(resolved, vec![0, 2]);
    }

    #[test]
    fn resolve_many_enumerates_only_the_failing_entries() {
        let err = resolve_many("op", &[3, -8], 5, RangeMode::Exclusive).unwrap_err();
        match err {
            Error::IndexOutOfRange { len, failures, .. } => {
                assert_eq!(len, 5);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].position, 1);
                assert_eq!(failures[0].value, -8);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn resolve_many_reports_every_failure_at_once() {
        let err = resolve_many("op", &[9, 1, -9], 5, RangeMode::Exclusive).unwrap_err();
        match err {
            Error::IndexOutOfRange { failures, .. } => {
                let reported: Vec<(usize, i64)> =
                    failures.iter().map(|f| (f.position, f.value)).collect();
                assert_eq!(reported, vec![(0, 9), (2, -9)]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
