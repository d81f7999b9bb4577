use std::rc::Rc;

use crate::seq::Seq;

/// A replacement specification: what replaces the content at a resolved
/// position.
///
/// `C` is the context handed to function shapes (the current element for
/// per-element operations, the whole mid/window sequence for slice and
/// window operations); `T` is the element type being spliced in.
pub enum Replacer<C, T> {
    /// A single element; contributes exactly one element.
    Value(T),
    /// A list of elements, spliced in as-is. An empty list deletes.
    Values(Vec<T>),
    /// A whole sequence; contributes its entire element list.
    Seq(Seq<T>),
    /// A position-aware function returning any of the above shapes.
    With(Rc<dyn Fn(&C, usize) -> Replacer<C, T>>),
}

impl<C, T> Replacer<C, T> {
    pub fn value(value: T) -> Self {
        Replacer::Value(value)
    }

    pub fn values<I: IntoIterator<Item = T>>(values: I) -> Self {
        Replacer::Values(values.into_iter().collect())
    }

    pub fn seq(seq: Seq<T>) -> Self {
        Replacer::Seq(seq)
    }

    pub fn with<F>(f: F) -> Self
    where
        F: Fn(&C, usize) -> Replacer<C, T> + 'static,
    {
        Replacer::With(Rc::new(f))
    }
}

impl<C, T: Clone> Replacer<C, T> {
    /// Flatten this specification into the elements that replace the
    /// affected position.
    ///
    /// Function shapes are invoked with `(current, position)` and their
    /// results flattened recursively. Called once per affected position;
    /// results are never memoized across positions.
    pub fn resolve(&self, current: &C, position: usize) -> Vec<T> {
        match self {
            Replacer::Value(value) => vec![value.clone()],
            Replacer::Values(values) => values.clone(),
            Replacer::Seq(seq) => seq.elements().to_vec(),
            Replacer::With(f) => f(current, position).resolve(current, position),
        }
    }
}

impl<C, T: Clone> Clone for Replacer<C, T> {
    fn clone(&self) -> Self {
        match self {
            Replacer::Value(value) => Replacer::Value(value.clone()),
            Replacer::Values(values) => Replacer::Values(values.clone()),
            Replacer::Seq(seq) => Replacer::Seq(seq.clone()),
            Replacer::With(f) => Replacer::With(Rc::clone(f)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Replacer;
    use crate::seq::Seq;

    #[test]
    fn value_contributes_a_singleton() {
        let rep: Replacer<i64, i64> = Replacer::value(7);
        assert_eq!(rep.resolve(&0, 0), vec![7]);
    }

    #[test]
    fn values_contribute_themselves_and_empty_deletes() {
        let rep: Replacer<i64, i64> = Replacer::values([6, 7]);
        assert_eq!(rep.resolve(&0, 0), vec![6, 7]);

        let empty: Replacer<i64, i64> = Replacer::values([]);
        assert_eq!(empty.resolve(&0, 0), Vec::<i64>::new());
    }

    #[test]
    fn seq_contributes_its_whole_element_list() {
        let rep: Replacer<i64, i64> = Replacer::seq(Seq::new(vec![1, 2, 3]));
        assert_eq!(rep.resolve(&0, 5), vec![1, 2, 3]);
    }

    #[test]
    fn function_shapes_see_current_value_and_position() {
        let rep: Replacer<i64, i64> =
            Replacer::with(|current, position| Replacer::values([*current, position as i64]));
        assert_eq!(rep.resolve(&40, 2), vec![40, 2]);
        assert_eq!(rep.resolve(&9, 0), vec![9, 0]);
    }

    #[test]
    fn function_results_flatten_recursively() {
        let rep: Replacer<i64, i64> = Replacer::with(|_, _| {
            Replacer::with(|current, _| Replacer::seq(Seq::new(vec![*current, *current])))
        });
        assert_eq!(rep.resolve(&3, 0), vec![3, 3]);
    }
}
