/// Creates a [`RichMap`](crate::RichMap) from a literal set of pairs.
///
/// Duplicate keys follow the map's last-write-wins rule.
///
/// # Examples
/// ```
/// use richmap::richmap;
///
/// let map = richmap! {
///     "a" => 1,
///     "b" => 2,
/// };
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get("a"), Some(&1));
///
/// let empty: richmap::RichMap<&str, u32> = richmap! {};
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! richmap {
    () => {
        $crate::RichMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::RichMap::new();
        $(map.insert($key, $value);)+
        map
    }};
}
