//! Recursive parsers (parser that include themselves within their patterns).
//!
//! The [`recursive()`] function covers most cases. Use [`Recursive`] directly when a grammar has several mutually
//! recursive rules that cannot all be built inside one closure.
//!
//! # Nesting depth
//!
//! Every level of nesting in the input corresponds to a handful of nested function calls while parsing. With the
//! `stacker` feature (enabled by default), the stack is grown on the heap whenever a recursive parser is entered close
//! to its limit, so the nesting depth that can be parsed is bounded only by available memory. Without it, the depth is
//! bounded by the size of the thread's stack: expect a few thousand levels on an 8 MiB main thread, and fewer on
//! spawned threads, which default to 2 MiB.

use super::*;
use crate::util::{RefW, Slot};

// Remaining stack below which a new segment is allocated, and the size of that segment.
#[cfg(feature = "stacker")]
const RED_ZONE: usize = 64 * 1024;
#[cfg(feature = "stacker")]
const STACK_PER_SEGMENT: usize = 1024 * 1024;

fn invoke_slot<'a, T: 'a>(slot: &Slot<Parser<'a, T>>, input: Input<'a>) -> Outcome<'a, T> {
    match slot.get() {
        #[cfg(feature = "stacker")]
        Some(parser) => stacker::maybe_grow(RED_ZONE, STACK_PER_SEGMENT, || parser.invoke(input)),
        #[cfg(not(feature = "stacker"))]
        Some(parser) => parser.invoke(input),
        None => Err(Failure::new(input, Reason::Undefined)),
    }
}

/// A parser that can be defined in terms of itself by separating its [declaration](Recursive::declare) from its
/// [definition](Recursive::define).
///
/// Prefer to use [`recursive()`], which exists as a convenient wrapper around both operations, if possible.
///
/// Every parser obtained from a `Recursive`, whether through [`Recursive::handle`] or [`Recursive::parser`], shares
/// ownership of the definition, so a grammar built from several declarations keeps working after the declarations
/// themselves go out of scope. A definition that refers to its own handle forms a reference cycle and is never freed;
/// use [`recursive()`] for self-referential rules to avoid this.
pub struct Recursive<'a, T> {
    slot: RefC<Slot<Parser<'a, T>>>,
}

impl<'a, T: 'a> Recursive<'a, T> {
    /// Declare the existence of a recursive parser, allowing it to be used to construct parser combinators before
    /// being fully defined.
    ///
    /// This should be followed by **exactly one** call to [`Recursive::define`] before parsing anything. Until then,
    /// its parsers fail with [`Reason::Undefined`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// #[derive(Debug, PartialEq)]
    /// enum Value {
    ///     Num(u32),
    ///     List(Vec<Value>),
    /// }
    ///
    /// // Two rules referring to each other, built outside of any closure
    /// let value = Recursive::<Value>::declare();
    /// let list = Recursive::<Vec<Value>>::declare();
    ///
    /// list.define(
    ///     literal('[')
    ///         .ignore_then(delimited_by(value.handle(), literal(','), literal(']')))
    ///         .skip(literal(']')),
    /// );
    /// value.define(
    ///     digit(0, 9)
    ///         .transform(Value::Num)
    ///         .or_else(list.handle().transform(Value::List)),
    /// );
    ///
    /// let value = value.parser();
    /// assert_eq!(value.parse("[1,[2]]"), Ok(Value::List(vec![
    ///     Value::Num(1),
    ///     Value::List(vec![Value::Num(2)]),
    /// ])));
    /// ```
    pub fn declare() -> Self {
        Self {
            slot: RefC::new(Slot::new()),
        }
    }

    /// Define the parser after declaring it, allowing it to be used for parsing.
    ///
    /// # Panics
    ///
    /// Panics if the parser has already been defined.
    pub fn define(&self, parser: Parser<'a, T>) {
        if self.slot.set(parser).is_err() {
            panic!("recursive parser defined more than once");
        }
    }

    /// Whether [`Recursive::define`] has been called.
    pub fn is_defined(&self) -> bool {
        self.slot.get().is_some()
    }

    /// A parser that runs the definition, for use in the definitions of other parsers (including this one).
    ///
    /// The handle fails with [`Reason::Undefined`] if it is invoked before the definition exists.
    pub fn handle(&self) -> Parser<'a, T> {
        let slot = self.slot.clone();
        Parser::new(move |input| invoke_slot(&slot, input))
    }

    /// Finish the declaration, turning it into a parser that runs the definition.
    pub fn parser(self) -> Parser<'a, T> {
        self.handle()
    }

    // Refers to the definition without keeping it alive. Fails with `Undefined` once every strong parser is gone.
    fn weak_handle(&self) -> Parser<'a, T> {
        let slot: RefW<Slot<Parser<'a, T>>> = RefC::downgrade(&self.slot);
        Parser::new(move |input| match slot.upgrade() {
            Some(slot) => invoke_slot(&slot, input),
            None => Err(Failure::new(input, Reason::Undefined)),
        })
    }
}

/// Construct a recursive parser (i.e: a parser that may contain itself as part of its pattern).
///
/// The given function receives a handle to the parser being defined and must return its definition. The handle must
/// not be used to parse input before this function returns.
///
/// The handle does not own the definition, so the parser does not keep itself alive. It fails with
/// [`Reason::Undefined`] if it is kept and invoked after the returned parser, and every clone of it, has been
/// dropped.
///
/// This is a wrapper around [`Recursive::declare`] and [`Recursive::define`].
///
/// See the [module documentation](self) for limits on nesting depth.
///
/// # Examples
///
/// ```
/// # use mparse::prelude::*;
/// #[derive(Debug, PartialEq)]
/// enum Tree<'a> {
///     Leaf(&'a str),
///     Branch(Vec<Tree<'a>>),
/// }
///
/// // Parser that recursively parses nested lists
/// let tree = recursive(|tree| {
///     let branch = literal('[')
///         .ignore_then(delimited_by(tree, literal(','), literal(']')))
///         .skip(literal(']'))
///         .transform(Tree::Branch);
///     let leaf = at_least::<_, &str>(alpha(), 1).transform(Tree::Leaf);
///     branch.or_else(leaf).trim()
/// });
///
/// assert_eq!(tree.parse("hello"), Ok(Tree::Leaf("hello")));
/// assert_eq!(tree.parse("[a, b, c]"), Ok(Tree::Branch(vec![
///     Tree::Leaf("a"),
///     Tree::Leaf("b"),
///     Tree::Leaf("c"),
/// ])));
/// // The parser can deal with arbitrarily complex nested lists
/// assert_eq!(tree.parse("[[a, b], c, [d, [e, f]]]"), Ok(Tree::Branch(vec![
///     Tree::Branch(vec![Tree::Leaf("a"), Tree::Leaf("b")]),
///     Tree::Leaf("c"),
///     Tree::Branch(vec![
///         Tree::Leaf("d"),
///         Tree::Branch(vec![Tree::Leaf("e"), Tree::Leaf("f")]),
///     ]),
/// ])));
/// ```
pub fn recursive<'a, T, F>(builder: F) -> Parser<'a, T>
where
    T: 'a,
    F: FnOnce(Parser<'a, T>) -> Parser<'a, T>,
{
    let declared = Recursive::declare();
    declared.define(builder(declared.weak_handle()));
    declared.parser()
}
