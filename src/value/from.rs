//! Conversions used to build views in code, mostly through `value!`.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use crate::value::{Lambda, List, Map};
use crate::Value;

macro_rules! impl_from {
    ($($ty:ty => |$v:ident| $expr:expr;)+) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from($v: $ty) -> Self {
                    $expr
                }
            }
        )+
    };
}

impl_from! {
    () => |_v| Value::None;
    bool => |b| Value::Bool(b);
    u8 => |i| Value::Integer(i64::from(i));
    u16 => |i| Value::Integer(i64::from(i));
    u32 => |i| Value::Integer(i64::from(i));
    i8 => |i| Value::Integer(i64::from(i));
    i16 => |i| Value::Integer(i64::from(i));
    i32 => |i| Value::Integer(i64::from(i));
    i64 => |i| Value::Integer(i);
    f32 => |f| Value::Float(f64::from(f));
    f64 => |f| Value::Float(f);
    String => |s| Value::String(s);
    &str => |s| Value::String(s.to_owned());
    &String => |s| Value::String(s.clone());
    Cow<'_, str> => |s| Value::String(s.into_owned());
    Lambda => |lambda| Value::Lambda(lambda);
}

impl<V> From<Option<V>> for Value
where
    V: Into<Value>,
{
    fn from(opt: Option<V>) -> Self {
        opt.map_or(Self::None, Into::into)
    }
}

fn list<I>(iter: I) -> Value
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    Value::List(iter.into_iter().map(Into::into).collect::<List<_>>())
}

fn map<I, K, V>(iter: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    Value::Map(
        iter.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<Map<_, _>>(),
    )
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(vec: Vec<V>) -> Self {
        list(vec)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Value {
    fn from(arr: [V; N]) -> Self {
        list(arr)
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(m: BTreeMap<K, V>) -> Self {
        map(m)
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(m: HashMap<K, V>) -> Self {
        map(m)
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Value {
    fn from(entries: [(K, V); N]) -> Self {
        map(entries)
    }
}

impl<V: Into<Value>> FromIterator<V> for Value {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        list(iter)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        map(iter)
    }
}
