//! Utilities for debugging parsers.
//!
//! Mark interesting parsers with [`Parser::debug`], then run the outer parser with [`Parser::invoke_traced`] to get a
//! [`Trace`] of every marked parser that was entered, where it was entered, and how it finished. Outside of a traced
//! invocation, marked parsers behave exactly like unmarked ones and record nothing.
//!
//! Tracing requires the `std` feature. Without it, [`Parser::debug`] returns the parser unchanged.

use super::*;
use alloc::{string::String, vec::Vec};
use core::panic::Location;

/// How a traced parser finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    /// The parser matched, leaving the input at this byte offset.
    Matched {
        /// The byte offset of the remaining input.
        end: usize,
    },
    /// The parser failed.
    Failed {
        /// The byte offset of the failure.
        at: usize,
        /// The failure's message.
        message: String,
    },
    /// The parser never returned (usually because it panicked).
    Unfinished,
}

/// A record of one traced parser being entered, including any traced parsers it ran in turn.
#[derive(Clone, Debug)]
pub struct Scope {
    label: Cow<'static, str>,
    location: &'static Location<'static>,
    start: usize,
    exit: Exit,
    children: Vec<Scope>,
}

impl Scope {
    /// The label given to [`Parser::debug`].
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Where [`Parser::debug`] was called.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The byte offset at which the parser was entered.
    pub fn start(&self) -> usize {
        self.start
    }

    /// How the parser finished.
    pub fn exit(&self) -> &Exit {
        &self.exit
    }

    /// The traced parsers that were entered while this one was running, in order.
    pub fn children(&self) -> &[Scope] {
        &self.children
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = depth * 4;
        writeln!(
            f,
            "{:indent$}Entered {} at offset {} (line {} in {})",
            "",
            self.label,
            self.start,
            self.location.line(),
            self.location.file(),
            indent = indent,
        )?;
        for child in &self.children {
            child.write(f, depth + 1)?;
        }
        match &self.exit {
            Exit::Matched { end } => writeln!(f, "{:indent$}Matched {}..{}", "", self.start, end, indent = indent),
            Exit::Failed { at, message } => {
                writeln!(f, "{:indent$}Failed at offset {}: {}", "", at, message, indent = indent)
            }
            Exit::Unfinished => writeln!(f, "{:indent$}Unfinished", "", indent = indent),
        }
    }
}

/// The traced parsers entered during one invocation of [`Parser::invoke_traced`].
#[derive(Clone, Debug, Default)]
pub struct Trace {
    scopes: Vec<Scope>,
}

impl Trace {
    /// The outermost traced parsers that were entered, in order.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Whether no traced parsers were entered.
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scope in &self.scopes {
            scope.write(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
mod recorder {
    use super::*;
    use core::cell::RefCell;

    std::thread_local! {
        // The open scopes of the active trace, outermost first. The first entry is a root that collects the
        // top-level scopes. `None` when no trace is active.
        static ACTIVE: RefCell<Option<Vec<Scope>>> = const { RefCell::new(None) };
    }

    fn root() -> Scope {
        Scope {
            label: Cow::Borrowed("<root>"),
            location: Location::caller(),
            start: 0,
            exit: Exit::Unfinished,
            children: Vec::new(),
        }
    }

    /// Open a scope, returning whether a trace is active.
    pub(super) fn enter(label: &Cow<'static, str>, location: &'static Location<'static>, start: usize) -> bool {
        ACTIVE.with(|active| match active.borrow_mut().as_mut() {
            Some(stack) => {
                stack.push(Scope {
                    label: label.clone(),
                    location,
                    start,
                    exit: Exit::Unfinished,
                    children: Vec::new(),
                });
                true
            }
            None => false,
        })
    }

    /// Close the innermost open scope.
    pub(super) fn exit(exit: Exit) {
        ACTIVE.with(|active| {
            if let Some(stack) = active.borrow_mut().as_mut() {
                if stack.len() > 1 {
                    if let Some(mut scope) = stack.pop() {
                        scope.exit = exit;
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(scope);
                        }
                    }
                }
            }
        })
    }

    /// Run `f` with a fresh trace active, restoring any enclosing trace afterwards.
    pub(super) fn record<R>(f: impl FnOnce() -> R) -> (R, Trace) {
        let outer = ACTIVE.with(|active| active.replace(Some(vec![root()])));
        let result = f();
        let mut stack = ACTIVE.with(|active| active.replace(outer)).unwrap_or_default();
        // Scopes left open by a parser that unwound are closed as unfinished
        while stack.len() > 1 {
            if let Some(scope) = stack.pop() {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(scope);
                }
            }
        }
        let scopes = stack.pop().map(|root| root.children).unwrap_or_default();
        (result, Trace { scopes })
    }
}

impl<'a, T: 'a> Parser<'a, T> {
    /// Mark this parser so that it is recorded by [`Parser::invoke_traced`] and [`Parser::invoke_verbose`].
    ///
    /// The label and the location of this call appear in the trace. A marked parser accepts exactly the same inputs as
    /// the original.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mparse::prelude::*;
    /// let digits = at_least::<_, &str>(range('0', '9'), 1).debug("digits");
    /// let pair = digits.clone().skip(literal(',')).skip(digits).debug("pair");
    ///
    /// let (outcome, trace) = pair.invoke_traced("12,x");
    /// assert!(outcome.is_err());
    ///
    /// let pair_scope = &trace.scopes()[0];
    /// assert_eq!(pair_scope.label(), "pair");
    /// assert_eq!(pair_scope.children().len(), 2);
    /// assert_eq!(pair_scope.children()[1].start(), 3);
    /// ```
    #[track_caller]
    pub fn debug(self, label: impl Into<Cow<'static, str>>) -> Parser<'a, T> {
        let label = label.into();
        let location = Location::caller();

        #[cfg(feature = "std")]
        {
            Parser::new(move |input: Input<'a>| {
                let traced = recorder::enter(&label, location, input.offset());
                let outcome = self.invoke(input);
                if traced {
                    recorder::exit(match &outcome {
                        Ok(success) => Exit::Matched {
                            end: success.remaining.offset(),
                        },
                        Err(failure) => Exit::Failed {
                            at: failure.offset(),
                            message: failure.message(),
                        },
                    });
                }
                outcome
            })
        }

        #[cfg(not(feature = "std"))]
        {
            let _ = (label, location);
            self
        }
    }

    /// Run this parser, recording every parser marked with [`Parser::debug`] that it enters.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn invoke_traced(&self, input: impl Into<Input<'a>>) -> (Outcome<'a, T>, Trace) {
        let input = input.into();
        recorder::record(|| self.invoke(input))
    }

    /// Run this parser, printing a trace of every parser marked with [`Parser::debug`] to stdout.
    ///
    /// This is intended for use while developing a grammar, not in production code.
    #[cfg(feature = "std")]
    #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
    pub fn invoke_verbose(&self, input: impl Into<Input<'a>>) -> Outcome<'a, T> {
        let (outcome, trace) = self.invoke_traced(input);
        print!("{}", trace);
        outcome
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn untraced_invocation_records_nothing() {
        let parser = literal('a').debug("a");
        assert_eq!(parser.parse("a"), Ok("a"));
        let (_, trace) = literal('b').invoke_traced("b");
        assert!(trace.is_empty());
    }

    #[test]
    fn nested_scopes() {
        let inner = digit(0, 9).debug("inner");
        let outer = many::<_, Vec<_>>(inner).debug("outer");
        let (outcome, trace) = outer.invoke_traced("12");
        assert_eq!(outcome.unwrap().value, vec![1, 2]);

        assert_eq!(trace.scopes().len(), 1);
        let outer = &trace.scopes()[0];
        assert_eq!(outer.exit(), &Exit::Matched { end: 2 });
        let starts: Vec<_> = outer.children().iter().map(Scope::start).collect();
        assert_eq!(starts, vec![0, 1, 2]);
        assert!(matches!(outer.children()[2].exit(), Exit::Failed { at: 2, .. }));
        assert_eq!(outer.location().file(), file!());
    }

    #[test]
    fn nested_traces_are_independent() {
        let inner = literal('x').debug("x");
        let traced = inner.clone();
        let outer = Parser::new(move |input| {
            let (outcome, trace) = traced.invoke_traced(input);
            assert_eq!(trace.scopes().len(), 1);
            outcome
        })
        .debug("outer");

        let (_, trace) = outer.invoke_traced("x");
        assert_eq!(trace.scopes().len(), 1);
        assert!(trace.scopes()[0].children().is_empty());
    }

    #[test]
    fn display() {
        let parser = literal('a').debug("letter a");
        let (_, trace) = parser.invoke_traced("b");
        let text = trace.to_string();
        assert!(text.starts_with("Entered letter a at offset 0"));
        assert!(text.ends_with("Failed at offset 0: expected 'a', found 'b'\n"));
    }
}
