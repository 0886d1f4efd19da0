use super::*;

#[cfg(not(feature = "sync"))]
pub(crate) type RefC<T> = alloc::rc::Rc<T>;
#[cfg(not(feature = "sync"))]
pub(crate) type RefW<T> = alloc::rc::Weak<T>;

#[cfg(feature = "sync")]
pub(crate) type RefC<T> = alloc::sync::Arc<T>;
#[cfg(feature = "sync")]
pub(crate) type RefW<T> = alloc::sync::Weak<T>;

#[cfg(not(feature = "sync"))]
pub(crate) type DynParse<'a, T> = dyn Fn(Input<'a>) -> Outcome<'a, T> + 'a;
#[cfg(feature = "sync")]
pub(crate) type DynParse<'a, T> = dyn Fn(Input<'a>) -> Outcome<'a, T> + Send + Sync + 'a;

/// A trait implemented by every type when the `sync` feature is disabled, and by every `Send + Sync` type when it is
/// enabled.
///
/// Functions and values captured by parsers must implement this trait. You should never need to implement it
/// yourself, but generic code that builds parsers will need it as a bound.
#[cfg(feature = "sync")]
pub trait MaybeSync: Send + Sync {}
#[cfg(feature = "sync")]
impl<T: Send + Sync + ?Sized> MaybeSync for T {}

/// A trait implemented by every type when the `sync` feature is disabled, and by every `Send + Sync` type when it is
/// enabled.
///
/// Functions and values captured by parsers must implement this trait. You should never need to implement it
/// yourself, but generic code that builds parsers will need it as a bound.
#[cfg(not(feature = "sync"))]
pub trait MaybeSync {}
#[cfg(not(feature = "sync"))]
impl<T: ?Sized> MaybeSync for T {}

/// A cell that can be written exactly once and read any number of times afterwards.
pub(crate) struct Slot<T> {
    #[cfg(not(feature = "sync"))]
    cell: core::cell::OnceCell<T>,
    #[cfg(feature = "sync")]
    cell: spin::Once<Option<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn new() -> Self {
        Self {
            #[cfg(not(feature = "sync"))]
            cell: core::cell::OnceCell::new(),
            #[cfg(feature = "sync")]
            cell: spin::Once::new(),
        }
    }

    pub(crate) fn get(&self) -> Option<&T> {
        #[cfg(not(feature = "sync"))]
        {
            self.cell.get()
        }
        #[cfg(feature = "sync")]
        {
            self.cell.get().and_then(Option::as_ref)
        }
    }

    /// Write the value, handing it back if the slot was already written.
    pub(crate) fn set(&self, value: T) -> Result<(), T> {
        #[cfg(not(feature = "sync"))]
        {
            self.cell.set(value)
        }
        #[cfg(feature = "sync")]
        {
            let mut value = Some(value);
            self.cell.call_once(|| value.take());
            value.map_or(Ok(()), Err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_written_once() {
        let slot = Slot::new();
        assert_eq!(slot.get(), None);
        assert_eq!(slot.set(1), Ok(()));
        assert_eq!(slot.set(2), Err(2));
        assert_eq!(slot.get(), Some(&1));
    }
}
