//! Text dumps of table contents and layout.
//!
//! Both formats are stable and compared byte-for-byte by external tooling:
//!
//! ```text
//! traverse:  { k1:v1 k2:v2 } : 0.40\n       (map)
//!            { 10 30 } : 0.40\n             (set)
//! describe:  2 | {apple,10} -> {banana,20} -> \n
//!            3 | DEL\n
//! ```

use core::fmt;

/// Load factor rendered with exactly two decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadFactor(pub f64);

impl fmt::Display for LoadFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Writes `{ a b c } : L.LL\n`, each item followed by one space.
pub(crate) fn write_traversal<I>(f: &mut fmt::Formatter<'_>, items: I, load: f64) -> fmt::Result
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    f.write_str("{ ")?;
    for item in items {
        write!(f, "{item} ")?;
    }
    writeln!(f, "}} : {}", LoadFactor(load))
}

/// Tables that can dump their physical layout, one line per bucket or slot.
pub trait Describe {
    fn write_layout(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

/// Displayable view of a table's layout, returned by `describe()`.
pub struct Layout<'a, T: ?Sized>(pub(crate) &'a T);

impl<T: Describe + ?Sized> fmt::Display for Layout<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_layout(f)
    }
}
