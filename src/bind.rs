use crate::bind_value::BindValue;
use crate::error::Result;
use crate::statement::{Null, Statement};

/// An argument pack which can be bound to a prepared statement in one call.
///
/// This is the variadic convenience over [`BindValue`]: a pack binds its
/// elements in order, each element consuming exactly one position of the
/// statement's bind cursor, exactly as the corresponding sequence of
/// [`bind_value`] calls would. It is implemented for every single bindable
/// value, for `()` (binding nothing) and for tuples of up to eight values.
///
/// [`bind_value`]: Statement::bind_value
///
/// # Examples
///
/// ```
/// use sqv::Connection;
///
/// let mut c = Connection::new();
/// assert!(c.open(":memory:"));
///
/// c.execute("CREATE TABLE users (name TEXT, age INTEGER, photo BLOB)", ())?;
/// c.execute("INSERT INTO users VALUES (?, ?, ?)", ("Alice", 42, &b"\x01\x02"[..]))?;
///
/// assert_eq!(c.query::<i64, _>("SELECT age FROM users WHERE name = ?", "Alice")?, 42);
/// # Ok::<_, sqv::Error>(())
/// ```
pub trait Bind {
    /// Bind this pack into the given statement, starting at the statement's
    /// current cursor position.
    fn bind(&self, stmt: &mut Statement) -> Result<()>;
}

impl<T> Bind for &T
where
    T: ?Sized + Bind,
{
    #[inline]
    fn bind(&self, stmt: &mut Statement) -> Result<()> {
        (**self).bind(stmt)
    }
}

/// [`Bind`] implementation for the empty pack, binding no parameters.
impl Bind for () {
    #[inline]
    fn bind(&self, _stmt: &mut Statement) -> Result<()> {
        Ok(())
    }
}

macro_rules! forward {
    ($($ty:ty),* $(,)?) => {$(
        #[doc = concat!("[`Bind`] implementation for a single `", stringify!($ty), "` value.")]
        impl Bind for $ty {
            #[inline]
            fn bind(&self, stmt: &mut Statement) -> Result<()> {
                stmt.bind_value(self)
            }
        }
    )*};
}

forward! {
    str,
    String,
    [u8],
    Vec<u8>,
    i32,
    i64,
    u32,
    u64,
    f32,
    f64,
    Null,
}

/// [`Bind`] implementation for a single byte-array value.
impl<const N: usize> Bind for [u8; N] {
    #[inline]
    fn bind(&self, stmt: &mut Statement) -> Result<()> {
        stmt.bind_value(self)
    }
}

/// [`Bind`] implementation for a single optional value.
impl<T> Bind for Option<T>
where
    T: BindValue,
{
    #[inline]
    fn bind(&self, stmt: &mut Statement) -> Result<()> {
        stmt.bind_value(self)
    }
}

macro_rules! implement_tuple {
    ($($ty:ident $var:ident),+ $(,)?) => {
        /// [`Bind`] implementation for a tuple.
        ///
        /// Elements are bound one after another, each consuming one cursor
        /// position.
        impl<$($ty,)+> Bind for ($($ty,)+)
        where
            $($ty: BindValue,)+
        {
            #[inline]
            fn bind(&self, stmt: &mut Statement) -> Result<()> {
                let ($($var,)+) = self;
                $(stmt.bind_value($var)?;)+
                Ok(())
            }
        }
    };
}

implement_tuple!(A a);
implement_tuple!(A a, B b);
implement_tuple!(A a, B b, C c);
implement_tuple!(A a, B b, C c, D d);
implement_tuple!(A a, B b, C c, D d, E e);
implement_tuple!(A a, B b, C c, D d, E e, F f);
implement_tuple!(A a, B b, C c, D d, E e, F f, G g);
implement_tuple!(A a, B b, C c, D d, E e, F f, G g, H h);
