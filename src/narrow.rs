/// A narrowing test-and-cast supplied by a key or value type.
///
/// `Narrow<T>` is the seam behind the type-narrowing filters
/// ([`RichMap::filter_value_type`], [`RichMap::filter_key_type`] and
/// [`RichMap::filter_pair_type`]): "is this a `T`, and if so, give me the
/// `T`". A failed test is an ordinary filtering outcome, never an error.
///
/// Implementations must uphold one invariant: [`narrow`] returns `Ok`
/// exactly when [`narrow_ref`] returns `Some`.
///
/// The crate implements `Narrow` for the type-erased [`Box<dyn DynKey>`]
/// and [`Box<dyn DynValue>`] boxes using exact type identity (`TypeId`
/// equality, as checked by [`std::any::Any::is`]). There is no
/// assignable-from relation at runtime; looser hierarchies are expressed by
/// implementing `Narrow` on a tagged variant by hand:
///
/// ```
/// use richmap::{Narrow, RichMap};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Payload {
///     Num(i64),
///     Text(String),
/// }
///
/// impl Narrow<i64> for Payload {
///     fn narrow_ref(&self) -> Option<&i64> {
///         match self {
///             Payload::Num(n) => Some(n),
///             _ => None,
///         }
///     }
///
///     fn narrow(self) -> Result<i64, Self> {
///         match self {
///             Payload::Num(n) => Ok(n),
///             other => Err(other),
///         }
///     }
/// }
///
/// let map: RichMap<&str, Payload> = [
///     ("a", Payload::Num(1)),
///     ("b", Payload::Text("two".to_owned())),
/// ]
/// .into_iter()
/// .collect();
///
/// let numbers: RichMap<&str, i64> = map.filter_value_type();
/// assert_eq!(numbers.get("a"), Some(&1));
/// assert_eq!(numbers.get("b"), None);
/// ```
///
/// [`narrow`]: Narrow::narrow
/// [`narrow_ref`]: Narrow::narrow_ref
/// [`RichMap::filter_value_type`]: crate::RichMap::filter_value_type
/// [`RichMap::filter_key_type`]: crate::RichMap::filter_key_type
/// [`RichMap::filter_pair_type`]: crate::RichMap::filter_pair_type
/// [`Box<dyn DynKey>`]: crate::DynKey
/// [`Box<dyn DynValue>`]: crate::DynValue
pub trait Narrow<T>: Sized {
    /// Borrowing type test. Returns the narrowed view if `self` holds a `T`.
    fn narrow_ref(&self) -> Option<&T>;

    /// Consuming narrow. Returns `self` unchanged in the `Err` arm so a
    /// failed test loses nothing.
    fn narrow(self) -> Result<T, Self>;
}
