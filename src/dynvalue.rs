use std::any::Any;

use dyn_clone::DynClone;

use crate::narrow::Narrow;

const BROKEN_VALUE: &str = "Broken DynValue: downcast failed after type check";

/// Object-safe erasure of a map value.
///
/// Implemented automatically for every `T: Clone + Any`, so a
/// `Box<dyn DynValue>` can hold values of mixed concrete types in a single
/// [`RichMap`]. The box is `Clone` and implements [`Narrow<T>`] for any
/// concrete value type `T` via exact-type downcast, which is what the
/// narrowing filters consume.
///
/// [`RichMap`]: crate::RichMap
/// [`Narrow<T>`]: crate::Narrow
pub trait DynValue: DynClone + Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn as_any_box(self: Box<Self>) -> Box<dyn Any>;
}

dyn_clone::clone_trait_object!(DynValue);

impl<T: Clone + Any> DynValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_any_box(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<T: Any> Narrow<T> for Box<dyn DynValue> {
    fn narrow_ref(&self) -> Option<&T> {
        (**self).as_any().downcast_ref()
    }

    fn narrow(self) -> Result<T, Self> {
        if (*self).as_any().is::<T>() {
            Ok(*self.as_any_box().downcast().expect(BROKEN_VALUE))
        } else {
            Err(self)
        }
    }
}
