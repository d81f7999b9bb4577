use std::rc::Rc;

use crate::error::{Error, Result};
use crate::seq::Seq;

pub(crate) type BranchBody<T> = Box<dyn FnOnce(Seq<T>) -> Seq<T>>;
type BranchFn<T> = Rc<dyn Fn(BranchBody<T>) -> Seq<T>>;
type LoopBody<T> = Rc<dyn Fn(Seq<T>) -> Seq<T>>;
type LoopCond<T> = Rc<dyn Fn(&Seq<T>) -> bool>;
type DoFn<T> = Rc<dyn Fn(LoopBody<T>) -> Seq<T>>;
type WhileFn<T> = Rc<dyn Fn(LoopCond<T>) -> Seq<T>>;

/// Continuation state attached to each sequence instance. `None` means the
/// instance is not inside any block; structural operations always produce
/// `None` results, which is what implicitly ends a block.
pub(crate) enum Frame<T> {
    None,
    If(Vec<IfLevel<T>>),
    Loop {
        do_fn: Option<DoFn<T>>,
        while_fn: Option<WhileFn<T>>,
    },
}

/// One open `if_` level: the closure that runs the taken arm and the one
/// that skips the untaken arm, already oriented by the condition's truth.
pub(crate) struct IfLevel<T> {
    then_branch: BranchFn<T>,
    else_branch: BranchFn<T>,
}

impl<T> Clone for IfLevel<T> {
    fn clone(&self) -> Self {
        Self {
            then_branch: Rc::clone(&self.then_branch),
            else_branch: Rc::clone(&self.else_branch),
        }
    }
}

impl<T> Clone for Frame<T> {
    fn clone(&self) -> Self {
        match self {
            Frame::None => Frame::None,
            Frame::If(levels) => Frame::If(levels.clone()),
            Frame::Loop { do_fn, while_fn } => Frame::Loop {
                do_fn: do_fn.clone(),
                while_fn: while_fn.clone(),
            },
        }
    }
}

impl<T: Clone + 'static> Seq<T> {
    fn into_fresh(self) -> Seq<T> {
        Seq {
            elements: self.elements,
            frame: Frame::None,
        }
    }

    fn pop_level(self) -> Seq<T> {
        match self.frame {
            Frame::If(mut levels) => {
                levels.pop();
                let frame = if levels.is_empty() {
                    Frame::None
                } else {
                    Frame::If(levels)
                };
                Seq {
                    elements: self.elements,
                    frame,
                }
            }
            frame => Seq {
                elements: self.elements,
                frame,
            },
        }
    }

    /// Open a conditional block. The returned sequence carries one more
    /// branch level; only the arm matching `truthy` will ever run.
    ///
    /// Chained `then` calls on the same arm behave like sequential
    /// statements, and a block opened inside a branch body is closed when
    /// that body's arm completes.
    pub fn if_(self, truthy: bool) -> Seq<T> {
        let me = self.clone();
        let take: BranchFn<T> = {
            let me = me.clone();
            Rc::new(move |body: BranchBody<T>| body(me.clone()).pop_level().if_(truthy))
        };
        let skip: BranchFn<T> = Rc::new(move |_body: BranchBody<T>| me.clone().pop_level().if_(truthy));
        let mut levels = match self.frame {
            Frame::If(levels) => levels,
            _ => Vec::new(),
        };
        levels.push(if truthy {
            IfLevel {
                then_branch: take,
                else_branch: skip,
            }
        } else {
            IfLevel {
                then_branch: skip,
                else_branch: take,
            }
        });
        Seq {
            elements: self.elements,
            frame: Frame::If(levels),
        }
    }

    /// `if_` with the condition computed from the current sequence.
    pub fn if_with<C>(self, cond: C) -> Seq<T>
    where
        C: Fn(&Seq<T>) -> bool,
    {
        let truthy = cond(&self);
        self.if_(truthy)
    }

    /// Run `body` if the innermost open condition was true, skip it (without
    /// evaluating it) otherwise.
    pub fn then<F>(self, body: F) -> Result<Seq<T>>
    where
        F: FnOnce(Seq<T>) -> Seq<T> + 'static,
    {
        match self.frame {
            Frame::If(mut levels) => match levels.pop() {
                Some(level) => Ok((level.then_branch)(Box::new(body))),
                None => Err(Error::NoActiveBlock { call: "then" }),
            },
            _ => Err(Error::NoActiveBlock { call: "then" }),
        }
    }

    /// Run `body` if the innermost open condition was false; the mirror of
    /// `then`.
    pub fn else_<F>(self, body: F) -> Result<Seq<T>>
    where
        F: FnOnce(Seq<T>) -> Seq<T> + 'static,
    {
        match self.frame {
            Frame::If(mut levels) => match levels.pop() {
                Some(level) => Ok((level.else_branch)(Box::new(body))),
                None => Err(Error::NoActiveBlock { call: "else_" }),
            },
            _ => Err(Error::NoActiveBlock { call: "else_" }),
        }
    }

    /// Explicitly close the innermost open block. Tolerant when no block is
    /// open.
    pub fn end_if(self) -> Seq<T> {
        self.pop_level()
    }

    /// Guard the next `do_` with `cond`. When the condition holds, the
    /// following `do_` runs its body repeatedly until the condition turns
    /// false; when it does not, the following `do_` is skipped entirely.
    ///
    /// Termination is strictly condition-driven: an always-true condition
    /// loops forever.
    pub fn while_<C>(self, cond: C) -> Seq<T>
    where
        C: Fn(&Seq<T>) -> bool + 'static,
    {
        self.while_rc(Rc::new(cond))
    }

    fn while_rc(self, cond: LoopCond<T>) -> Seq<T> {
        if let Frame::Loop {
            while_fn: Some(w), ..
        } = &self.frame
        {
            // A pending single `do_` execution; the condition retroactively
            // turns it into a loop over the same body.
            let w = Rc::clone(w);
            return w(cond);
        }
        let me = self.into_fresh();
        let truthy = cond(&me);
        let do_fn: DoFn<T> = if truthy {
            let me = me.clone();
            Rc::new(move |body: LoopBody<T>| {
                let mut current = body(me.clone());
                while cond(&current) {
                    current = body(current);
                }
                current.into_fresh()
            })
        } else {
            let me = me.clone();
            Rc::new(move |_body| me.clone())
        };
        Seq {
            elements: me.elements,
            frame: Frame::Loop {
                do_fn: Some(do_fn),
                while_fn: None,
            },
        }
    }

    /// Run `body`. After an upstream `while_`, the installed guard drives
    /// the loop (or skips the body when the guard was false). Bare `do_`
    /// runs the body once and lets a following `while_` turn that single
    /// run into a loop over the same body.
    pub fn do_<F>(self, body: F) -> Seq<T>
    where
        F: Fn(Seq<T>) -> Seq<T> + 'static,
    {
        self.do_rc(Rc::new(body))
    }

    fn do_rc(self, body: LoopBody<T>) -> Seq<T> {
        if let Frame::Loop { do_fn: Some(d), .. } = &self.frame {
            let d = Rc::clone(d);
            return d(body);
        }
        let result = body(self.into_fresh()).into_fresh();
        let while_fn: WhileFn<T> = {
            let result = result.clone();
            Rc::new(move |cond: LoopCond<T>| {
                let mut current = result.clone();
                while cond(&current) {
                    current = body(current);
                }
                current.into_fresh()
            })
        };
        Seq {
            elements: result.elements,
            frame: Frame::Loop {
                do_fn: None,
                while_fn: Some(while_fn),
            },
        }
    }
}
