use std::fmt;

use crate::error::{Error, Result};
use crate::flow::Frame;
use crate::index::{IndexSpec, RangeMode, resolve_many};
use crate::replace::Replacer;

/// An immutable ordered sequence.
///
/// - Insertion order is semantically significant and preserved by every
///   operation unless the operation explicitly reorders.
/// - No operation mutates the receiver; every transformation returns a new
///   `Seq`. Element values are shared by `Clone`, the element vector never
///   is.
/// - Each instance also carries its own control-flow continuation state
///   (see the `if_`/`then`/`else_` and `while_`/`do_` methods); equality and
///   `Debug` ignore it.
pub struct Seq<T> {
    pub(crate) elements: Vec<T>,
    pub(crate) frame: Frame<T>,
}

impl<T> Seq<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            elements,
            frame: Frame::None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.elements.last()
    }

    /// Signed positional access; `-1` is the last element.
    pub fn get(&self, index: i64) -> Option<&T> {
        let len = self.elements.len() as i64;
        let candidate = if index < 0 { len + index } else { index };
        if (0..len).contains(&candidate) {
            self.elements.get(candidate as usize)
        } else {
            None
        }
    }

    pub fn find_first_index<P>(&self, pred: P) -> Option<usize>
    where
        P: Fn(&T, usize) -> bool,
    {
        self.elements
            .iter()
            .enumerate()
            .find(|(i, v)| pred(v, *i))
            .map(|(i, _)| i)
    }

    pub fn find_last_index<P>(&self, pred: P) -> Option<usize>
    where
        P: Fn(&T, usize) -> bool,
    {
        self.elements
            .iter()
            .enumerate()
            .rev()
            .find(|(i, v)| pred(v, *i))
            .map(|(i, _)| i)
    }

    pub fn find_indices<P>(&self, pred: P) -> Vec<usize>
    where
        P: Fn(&T, usize) -> bool,
    {
        self.elements
            .iter()
            .enumerate()
            .filter(|(i, v)| pred(v, *i))
            .map(|(i, _)| i)
            .collect()
    }
}

fn nth_selected(p: usize, n: usize, offset: usize) -> bool {
    p >= offset && (p - offset) % n == 0
}

fn require_positive(op: &'static str, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(Error::InvalidArgument {
            op,
            reason: "n must be a positive integer".into(),
        });
    }
    Ok(n)
}

enum SpliceKind {
    Before,
    After,
    Replace,
}

impl<T: Clone> Seq<T> {
    /// An equal copy with a clean control-flow frame.
    pub(crate) fn fresh(&self) -> Seq<T> {
        Seq::new(self.elements.clone())
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.elements.clone()
    }

    /// Half-open slice with raw clamping (array-slice semantics, never an
    /// error). Negative bounds count from the end; `end` of `None` means
    /// the full length.
    pub fn slice(&self, start: i64, end: Option<i64>) -> Seq<T> {
        let len = self.elements.len() as i64;
        let clamp = |i: i64| -> usize {
            let v = if i < 0 { len + i } else { i };
            v.clamp(0, len) as usize
        };
        let start = clamp(start);
        let end = clamp(end.unwrap_or(len));
        if start >= end {
            Seq::empty()
        } else {
            Seq::new(self.elements[start..end].to_vec())
        }
    }

    fn take_first(&self, n: u64) -> Seq<T> {
        let n = n.min(self.elements.len() as u64) as usize;
        Seq::new(self.elements[..n].to_vec())
    }

    fn take_last(&self, n: u64) -> Seq<T> {
        let len = self.elements.len();
        let n = n.min(len as u64) as usize;
        Seq::new(self.elements[len - n..].to_vec())
    }

    fn skip_first(&self, n: u64) -> Seq<T> {
        let n = n.min(self.elements.len() as u64) as usize;
        Seq::new(self.elements[n..].to_vec())
    }

    fn skip_last(&self, n: u64) -> Seq<T> {
        let len = self.elements.len();
        let n = n.min(len as u64) as usize;
        Seq::new(self.elements[..len - n].to_vec())
    }

    /// Keep the first `n` elements; a negative `n` keeps from the opposite
    /// end. Counts beyond the length are clamped.
    pub fn keep(&self, n: i64) -> Seq<T> {
        if n >= 0 {
            self.take_first(n as u64)
        } else {
            self.take_last(n.unsigned_abs())
        }
    }

    pub fn keep_right(&self, n: i64) -> Seq<T> {
        if n >= 0 {
            self.take_last(n as u64)
        } else {
            self.take_first(n.unsigned_abs())
        }
    }

    /// Remove the first `n` elements; a negative `n` removes from the
    /// opposite end.
    pub fn drop(&self, n: i64) -> Seq<T> {
        if n >= 0 {
            self.skip_first(n as u64)
        } else {
            self.skip_last(n.unsigned_abs())
        }
    }

    pub fn drop_right(&self, n: i64) -> Seq<T> {
        if n >= 0 {
            self.skip_last(n as u64)
        } else {
            self.skip_first(n.unsigned_abs())
        }
    }

    /// Keep exactly the resolved positions, preserving the relative order of
    /// the kept elements.
    pub fn keep_indices<S: IndexSpec>(&self, spec: S) -> Result<Seq<T>> {
        let resolved = resolve_many("keep_indices", &spec, self.len(), RangeMode::Exclusive)?;
        let mut selected = vec![false; self.len()];
        for p in resolved {
            selected[p] = true;
        }
        Ok(Seq::new(
            self.elements
                .iter()
                .enumerate()
                .filter(|(i, _)| selected[*i])
                .map(|(_, v)| v.clone())
                .collect(),
        ))
    }

    pub fn drop_indices<S: IndexSpec>(&self, spec: S) -> Result<Seq<T>> {
        let resolved = resolve_many("drop_indices", &spec, self.len(), RangeMode::Exclusive)?;
        let mut selected = vec![false; self.len()];
        for p in resolved {
            selected[p] = true;
        }
        Ok(Seq::new(
            self.elements
                .iter()
                .enumerate()
                .filter(|(i, _)| !selected[*i])
                .map(|(_, v)| v.clone())
                .collect(),
        ))
    }

    /// Keep every position `p` where `p >= offset && (p - offset) % n == 0`.
    pub fn keep_nth(&self, n: usize, offset: usize) -> Result<Seq<T>> {
        let n = require_positive("keep_nth", n)?;
        Ok(self.filter(|_, p| nth_selected(p, n, offset)))
    }

    pub fn drop_nth(&self, n: usize, offset: usize) -> Result<Seq<T>> {
        let n = require_positive("drop_nth", n)?;
        Ok(self.filter(|_, p| !nth_selected(p, n, offset)))
    }

    fn splice_with<S: IndexSpec>(
        &self,
        op: &'static str,
        spec: S,
        replacer: &Replacer<T, T>,
        kind: SpliceKind,
    ) -> Result<Seq<T>> {
        let mut positions = resolve_many(op, &spec, self.len(), RangeMode::Exclusive)?;
        if positions.is_empty() {
            return Ok(self.fresh());
        }
        // Last-to-first so earlier splices stay valid while the list
        // shrinks or grows.
        positions.sort_unstable();
        let mut out = self.elements.clone();
        for &p in positions.iter().rev() {
            let items = replacer.resolve(&self.elements[p], p);
            let range = match kind {
                SpliceKind::Before => p..p,
                SpliceKind::After => p + 1..p + 1,
                SpliceKind::Replace => p..p + 1,
            };
            out.splice(range, items);
        }
        Ok(Seq::new(out))
    }

    /// Insert the resolved replacement before each resolved position.
    pub fn insert_before<S: IndexSpec>(
        &self,
        spec: S,
        replacer: &Replacer<T, T>,
    ) -> Result<Seq<T>> {
        self.splice_with("insert_before", spec, replacer, SpliceKind::Before)
    }

    /// Insert the resolved replacement after each resolved position.
    pub fn insert_after<S: IndexSpec>(
        &self,
        spec: S,
        replacer: &Replacer<T, T>,
    ) -> Result<Seq<T>> {
        self.splice_with("insert_after", spec, replacer, SpliceKind::After)
    }

    /// Replace the element at each resolved position with the resolved
    /// replacement (zero or more elements).
    pub fn replace_indices<S: IndexSpec>(
        &self,
        spec: S,
        replacer: &Replacer<T, T>,
    ) -> Result<Seq<T>> {
        self.splice_with("replace_indices", spec, replacer, SpliceKind::Replace)
    }

    pub fn map_indices<S, F>(&self, spec: S, f: F) -> Result<Seq<T>>
    where
        S: IndexSpec,
        F: Fn(&T, usize) -> T,
    {
        let positions = resolve_many("map_indices", &spec, self.len(), RangeMode::Exclusive)?;
        let mut out = self.elements.clone();
        for p in positions {
            out[p] = f(&self.elements[p], p);
        }
        Ok(Seq::new(out))
    }

    pub fn flat_map_indices<S, F>(&self, spec: S, f: F) -> Result<Seq<T>>
    where
        S: IndexSpec,
        F: Fn(&T, usize) -> Vec<T>,
    {
        let mut positions =
            resolve_many("flat_map_indices", &spec, self.len(), RangeMode::Exclusive)?;
        positions.sort_unstable();
        let mut out = self.elements.clone();
        for &p in positions.iter().rev() {
            out.splice(p..p + 1, f(&self.elements[p], p));
        }
        Ok(Seq::new(out))
    }

    fn splice_one(&self, p: usize, replacer: &Replacer<T, T>) -> Seq<T> {
        let mut out = self.elements.clone();
        out.splice(p..p + 1, replacer.resolve(&self.elements[p], p));
        Seq::new(out)
    }

    /// Replace the first element matching `pred`; an unchanged copy when
    /// nothing matches.
    pub fn replace_first_index<P>(&self, pred: P, replacer: &Replacer<T, T>) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
    {
        match self.find_first_index(pred) {
            Some(p) => self.splice_one(p, replacer),
            None => self.fresh(),
        }
    }

    pub fn replace_last_index<P>(&self, pred: P, replacer: &Replacer<T, T>) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
    {
        match self.find_last_index(pred) {
            Some(p) => self.splice_one(p, replacer),
            None => self.fresh(),
        }
    }

    /// Replace every element matching `pred`; an unchanged copy when nothing
    /// matches.
    pub fn replace_if<P>(&self, pred: P, replacer: &Replacer<T, T>) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
    {
        let positions = self.find_indices(pred);
        if positions.is_empty() {
            return self.fresh();
        }
        let mut out = self.elements.clone();
        for &p in positions.iter().rev() {
            out.splice(p..p + 1, replacer.resolve(&self.elements[p], p));
        }
        Seq::new(out)
    }

    pub fn map_first_index<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> T,
    {
        match self.find_first_index(pred) {
            Some(p) => {
                let mut out = self.elements.clone();
                out[p] = f(&self.elements[p], p);
                Seq::new(out)
            }
            None => self.fresh(),
        }
    }

    pub fn map_last_index<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> T,
    {
        match self.find_last_index(pred) {
            Some(p) => {
                let mut out = self.elements.clone();
                out[p] = f(&self.elements[p], p);
                Seq::new(out)
            }
            None => self.fresh(),
        }
    }

    pub fn map_if<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> T,
    {
        let positions = self.find_indices(pred);
        if positions.is_empty() {
            return self.fresh();
        }
        let mut out = self.elements.clone();
        for p in positions {
            out[p] = f(&self.elements[p], p);
        }
        Seq::new(out)
    }

    pub fn flat_map_first_index<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> Vec<T>,
    {
        match self.find_first_index(pred) {
            Some(p) => {
                let mut out = self.elements.clone();
                out.splice(p..p + 1, f(&self.elements[p], p));
                Seq::new(out)
            }
            None => self.fresh(),
        }
    }

    pub fn flat_map_last_index<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> Vec<T>,
    {
        match self.find_last_index(pred) {
            Some(p) => {
                let mut out = self.elements.clone();
                out.splice(p..p + 1, f(&self.elements[p], p));
                Seq::new(out)
            }
            None => self.fresh(),
        }
    }

    pub fn flat_map_if<P, F>(&self, pred: P, f: F) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
        F: Fn(&T, usize) -> Vec<T>,
    {
        let positions = self.find_indices(pred);
        if positions.is_empty() {
            return self.fresh();
        }
        let mut out = self.elements.clone();
        for &p in positions.iter().rev() {
            out.splice(p..p + 1, f(&self.elements[p], p));
        }
        Seq::new(out)
    }

    /// Replace every nth element (same positional rule as `keep_nth`),
    /// applied as a flat-map over the whole sequence.
    pub fn replace_nth(
        &self,
        n: usize,
        replacer: &Replacer<T, T>,
        offset: usize,
    ) -> Result<Seq<T>> {
        let n = require_positive("replace_nth", n)?;
        Ok(self.flat_map(|v, p| {
            if nth_selected(p, n, offset) {
                replacer.resolve(v, p)
            } else {
                vec![v.clone()]
            }
        }))
    }

    pub fn map_nth<F>(&self, n: usize, f: F, offset: usize) -> Result<Seq<T>>
    where
        F: Fn(&T, usize) -> T,
    {
        let n = require_positive("map_nth", n)?;
        Ok(self.map(|v, p| {
            if nth_selected(p, n, offset) {
                f(v, p)
            } else {
                v.clone()
            }
        }))
    }

    pub fn flat_map_nth<F>(&self, n: usize, f: F, offset: usize) -> Result<Seq<T>>
    where
        F: Fn(&T, usize) -> Vec<T>,
    {
        let n = require_positive("flat_map_nth", n)?;
        Ok(self.flat_map(|v, p| {
            if nth_selected(p, n, offset) {
                f(v, p)
            } else {
                vec![v.clone()]
            }
        }))
    }

    fn cut_slice(
        &self,
        op: &'static str,
        start: i64,
        end: i64,
    ) -> Result<(Vec<T>, Seq<T>, Vec<T>, usize)> {
        let mut bounds = resolve_many(op, &[start, end], self.len(), RangeMode::Inclusive)?;
        bounds.sort_unstable();
        let (a, b) = (bounds[0], bounds[1]);
        Ok((
            self.elements[..a].to_vec(),
            Seq::new(self.elements[a..b].to_vec()),
            self.elements[b..].to_vec(),
            a,
        ))
    }

    /// Replace the `[start, end)` slice as a whole. Function-shaped
    /// replacers receive the entire mid sequence plus its starting offset
    /// within the receiver.
    pub fn replace_slice(
        &self,
        start: i64,
        end: i64,
        replacer: &Replacer<Seq<T>, T>,
    ) -> Result<Seq<T>> {
        let (mut out, mid, post, offset) = self.cut_slice("replace_slice", start, end)?;
        out.extend(replacer.resolve(&mid, offset));
        out.extend(post);
        Ok(Seq::new(out))
    }

    pub fn map_slice<F>(&self, start: i64, end: i64, f: F) -> Result<Seq<T>>
    where
        F: Fn(&Seq<T>, usize) -> Seq<T>,
    {
        let (mut out, mid, post, offset) = self.cut_slice("map_slice", start, end)?;
        out.extend(f(&mid, offset).elements.iter().cloned());
        out.extend(post);
        Ok(Seq::new(out))
    }

    pub fn flat_map_slice<F>(&self, start: i64, end: i64, f: F) -> Result<Seq<T>>
    where
        F: Fn(&Seq<T>, usize) -> Vec<T>,
    {
        let (mut out, mid, post, offset) = self.cut_slice("flat_map_slice", start, end)?;
        out.extend(f(&mid, offset));
        out.extend(post);
        Ok(Seq::new(out))
    }

    pub fn map<U, F>(&self, f: F) -> Seq<U>
    where
        F: Fn(&T, usize) -> U,
    {
        Seq::new(
            self.elements
                .iter()
                .enumerate()
                .map(|(i, v)| f(v, i))
                .collect(),
        )
    }

    /// Per-element map whose results are flattened one level.
    pub fn flat_map<U, F>(&self, f: F) -> Seq<U>
    where
        F: Fn(&T, usize) -> Vec<U>,
    {
        Seq::new(
            self.elements
                .iter()
                .enumerate()
                .flat_map(|(i, v)| f(v, i))
                .collect(),
        )
    }

    pub fn filter<P>(&self, pred: P) -> Seq<T>
    where
        P: Fn(&T, usize) -> bool,
    {
        Seq::new(
            self.elements
                .iter()
                .enumerate()
                .filter(|(i, v)| pred(v, *i))
                .map(|(_, v)| v.clone())
                .collect(),
        )
    }

    /// Concatenate other sequences after this one, in the order given.
    pub fn append(&self, others: &[Seq<T>]) -> Seq<T> {
        let mut out = self.elements.clone();
        for other in others {
            out.extend_from_slice(&other.elements);
        }
        Seq::new(out)
    }

    /// Concatenate other sequences before this one, in the order given.
    pub fn prepend(&self, others: &[Seq<T>]) -> Seq<T> {
        let mut out = Vec::new();
        for other in others {
            out.extend_from_slice(&other.elements);
        }
        out.extend_from_slice(&self.elements);
        Seq::new(out)
    }

    pub fn append_items<I: IntoIterator<Item = T>>(&self, items: I) -> Seq<T> {
        let mut out = self.elements.clone();
        out.extend(items);
        Seq::new(out)
    }

    pub fn prepend_items<I: IntoIterator<Item = T>>(&self, items: I) -> Seq<T> {
        let mut out: Vec<T> = items.into_iter().collect();
        out.extend_from_slice(&self.elements);
        Seq::new(out)
    }

    /// Swap the elements of each resolved pair, strictly in the order given;
    /// later swaps see the effect of earlier ones. All pairs are validated
    /// before anything is built.
    pub fn swap_at(&self, pairs: &[(i64, i64)]) -> Result<Seq<T>> {
        let mut raw = Vec::with_capacity(pairs.len() * 2);
        for &(a, b) in pairs {
            raw.push(a);
            raw.push(b);
        }
        let resolved = resolve_many("swap_at", &raw, self.len(), RangeMode::Exclusive)?;
        let mut out = self.elements.clone();
        for pair in resolved.chunks_exact(2) {
            out.swap(pair[0], pair[1]);
        }
        Ok(Seq::new(out))
    }

    /// Cut at the resolved boundaries (inclusive resolution: a boundary may
    /// equal the length), sorted ascending, into `k + 1` chunks. Duplicate
    /// boundaries yield empty chunks.
    pub fn split_at<S: IndexSpec>(&self, spec: S) -> Result<Vec<Seq<T>>> {
        let mut bounds = resolve_many("split_at", &spec, self.len(), RangeMode::Inclusive)?;
        bounds.sort_unstable();
        let mut chunks = Vec::with_capacity(bounds.len() + 1);
        let mut prev = 0;
        for b in bounds {
            chunks.push(Seq::new(self.elements[prev..b].to_vec()));
            prev = b;
        }
        chunks.push(Seq::new(self.elements[prev..].to_vec()));
        Ok(chunks)
    }

    /// Two-way split by predicate, preserving relative order within each
    /// output.
    pub fn partition<P>(&self, pred: P) -> (Seq<T>, Seq<T>)
    where
        P: Fn(&T, usize) -> bool,
    {
        let mut matching = Vec::new();
        let mut rest = Vec::new();
        for (i, v) in self.elements.iter().enumerate() {
            if pred(v, i) {
                matching.push(v.clone());
            } else {
                rest.push(v.clone());
            }
        }
        (Seq::new(matching), Seq::new(rest))
    }

    /// Group elements by key; key order is the order of first occurrence.
    pub fn group_by<K, F>(&self, key: F) -> Vec<(K, Seq<T>)>
    where
        K: PartialEq,
        F: Fn(&T, usize) -> K,
    {
        let mut groups: Vec<(K, Vec<T>)> = Vec::new();
        for (i, v) in self.elements.iter().enumerate() {
            let k = key(v, i);
            match groups.iter_mut().find(|(existing, _)| *existing == k) {
                Some((_, items)) => items.push(v.clone()),
                None => groups.push((k, vec![v.clone()])),
            }
        }
        groups
            .into_iter()
            .map(|(k, items)| (k, Seq::new(items)))
            .collect()
    }

    /// Reverse element order.
    pub fn retrograde(&self) -> Seq<T> {
        Seq::new(self.elements.iter().rev().cloned().collect())
    }

    /// Drop later duplicates, keeping the first occurrence of each value.
    pub fn dedupe(&self) -> Seq<T>
    where
        T: PartialEq,
    {
        let mut out: Vec<T> = Vec::with_capacity(self.elements.len());
        for v in &self.elements {
            if !out.contains(v) {
                out.push(v.clone());
            }
        }
        Seq::new(out)
    }

    fn check_len(&self, op: &'static str, other_len: usize) -> Result<()> {
        if self.len() != other_len {
            return Err(Error::LengthMismatch {
                op,
                left: self.len(),
                right: other_len,
            });
        }
        Ok(())
    }

    /// Pair elements positionally; fails on differing lengths.
    pub fn zip<U: Clone>(&self, other: &Seq<U>) -> Result<Seq<(T, U)>> {
        self.check_len("zip", other.len())?;
        Ok(Seq::new(
            self.elements
                .iter()
                .cloned()
                .zip(other.elements.iter().cloned())
                .collect(),
        ))
    }

    /// Combine elements positionally with `f`; fails on differing lengths.
    pub fn combine<F>(&self, other: &Seq<T>, f: F) -> Result<Seq<T>>
    where
        F: Fn(&T, &T) -> T,
    {
        self.check_len("combine", other.len())?;
        Ok(Seq::new(
            self.elements
                .iter()
                .zip(other.elements.iter())
                .map(|(a, b)| f(a, b))
                .collect(),
        ))
    }

    /// Interleave the two sequences (`a0 b0 a1 b1 ...`); fails on differing
    /// lengths.
    pub fn twine(&self, other: &Seq<T>) -> Result<Seq<T>> {
        self.check_len("twine", other.len())?;
        let mut out = Vec::with_capacity(self.len() * 2);
        for (a, b) in self.elements.iter().zip(other.elements.iter()) {
            out.push(a.clone());
            out.push(b.clone());
        }
        Ok(Seq::new(out))
    }

    /// Swap values between the two sequences at every position where `pred`
    /// holds; fails on differing lengths.
    pub fn exchange_values_if<P>(&self, other: &Seq<T>, pred: P) -> Result<(Seq<T>, Seq<T>)>
    where
        P: Fn(&T, &T, usize) -> bool,
    {
        self.check_len("exchange_values_if", other.len())?;
        let mut left = Vec::with_capacity(self.len());
        let mut right = Vec::with_capacity(self.len());
        for (i, (a, b)) in self.elements.iter().zip(other.elements.iter()).enumerate() {
            if pred(a, b, i) {
                left.push(b.clone());
                right.push(a.clone());
            } else {
                left.push(a.clone());
                right.push(b.clone());
            }
        }
        Ok((Seq::new(left), Seq::new(right)))
    }

    /// Re-construct every element into the target member type. Conversion
    /// failure reports the offending position.
    pub fn cast<U>(&self) -> Result<Seq<U>>
    where
        U: TryFrom<T>,
    {
        let mut out = Vec::with_capacity(self.len());
        for (position, v) in self.elements.iter().enumerate() {
            match U::try_from(v.clone()) {
                Ok(u) => out.push(u),
                Err(_) => {
                    return Err(Error::TypeMismatch {
                        op: "cast",
                        position,
                        detail: format!(
                            "cannot construct {} from the source element",
                            std::any::type_name::<U>()
                        ),
                    });
                }
            }
        }
        Ok(Seq::new(out))
    }
}

impl<T: Clone> Clone for Seq<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            frame: self.frame.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for Seq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for Seq<T> {}

impl<T: fmt::Debug> fmt::Debug for Seq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements.iter()).finish()
    }
}

impl<T> Default for Seq<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Seq<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T> FromIterator<T> for Seq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Seq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Seq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
