/// Convenient macro for constructing a [`Value`][crate::Value].
///
/// The top level is always a map. Values can be `None`, nested maps `{ .. }`,
/// lists `[ .. ]` or any expression that implements `Into<Value>`. Keys are
/// identifiers or string literals.
///
/// # Examples
///
/// ```
/// let view = stache::value! {
///     user: {
///         name: "John Smith",
///         "favourite-colour": None,
///     },
///     tags: ["a", "b", 3],
/// };
/// ```
#[macro_export]
macro_rules! value {
    ($($tt:tt)*) => {
        $crate::_value!({ $($tt)* })
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! _value {
    //////////////////////////////////////////////////////////////////////////
    // TT muncher for the inside of a list [...]. Produces a Vec of the
    // elements.
    //
    // Must be invoked as: _value!(@list [] $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    (@list [$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };

    (@list [$($elems:expr,)*] None $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::Value::None,] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] [$($list:tt)*] $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!([$($list)*]),] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] {$($map:tt)*} $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!({$($map)*}),] $($($rest)*)?)
    };

    (@list [$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::_value!(@list [$($elems,)* $crate::_value!($next),] $($($rest)*)?)
    };

    //////////////////////////////////////////////////////////////////////////
    // TT muncher for the inside of a map {...}. Each entry is inserted into
    // the given map variable.
    //
    // Must be invoked as: _value!(@map $map $($tt)*)
    //////////////////////////////////////////////////////////////////////////

    (@map $map:ident) => {};

    (@map $map:ident $key:tt : None $(, $($rest:tt)*)?) => {
        let _ = $map.insert($crate::_value!(@key $key), $crate::Value::None);
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:tt : [$($list:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $map.insert($crate::_value!(@key $key), $crate::_value!([$($list)*]));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:tt : {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $map.insert($crate::_value!(@key $key), $crate::_value!({$($inner)*}));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@map $map:ident $key:tt : $value:expr $(, $($rest:tt)*)?) => {
        let _ = $map.insert($crate::_value!(@key $key), $crate::_value!($value));
        $crate::_value!(@map $map $($($rest)*)?);
    };

    (@key $key:ident) => {
        ::std::string::String::from(stringify!($key))
    };

    (@key $key:literal) => {
        ::std::string::String::from($key)
    };

    //////////////////////////////////////////////////////////////////////////
    // The main implementation.
    //////////////////////////////////////////////////////////////////////////

    (None) => {
        $crate::Value::None
    };

    ([$($tt:tt)*]) => {
        $crate::Value::List($crate::_value!(@list [] $($tt)*))
    };

    ({$($tt:tt)*}) => {{
        #[allow(unused_mut)]
        let mut map = $crate::Map::new();
        $crate::_value!(@map map $($tt)*);
        $crate::Value::Map(map)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Value};

    #[test]
    fn value_empty() {
        assert_eq!(value! {}, Value::Map(Map::new()));
    }

    #[test]
    fn value_list() {
        let v = value! { x: ["testing...", None, {}, [], 1] };
        let exp = Value::from([(
            "x",
            Value::List(vec![
                Value::from("testing..."),
                Value::None,
                Value::Map(Map::new()),
                Value::List(vec![]),
                Value::Integer(1),
            ]),
        )]);
        assert_eq!(v, exp);
    }

    #[test]
    fn value_map_nested() {
        let v = value! {
            w: "hello",
            "x.y": {
                y: "hello",
                z: String::from("world!"),
            },
        };
        let exp = Value::from([
            ("w", Value::from("hello")),
            ("x.y", Value::from([("y", "hello"), ("z", "world!")])),
        ]);
        assert_eq!(v, exp);
    }
}
