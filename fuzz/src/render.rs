#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// A view without lambdas, converted into a `stache::Value` directly so the
/// serde bridge is skipped.
#[derive(Debug, Arbitrary)]
enum View {
    None,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<View>),
    Map(BTreeMap<String, View>),
    Echo,
}

impl From<View> for stache::Value {
    fn from(view: View) -> Self {
        match view {
            View::None => Self::None,
            View::Bool(b) => Self::Bool(b),
            View::Integer(i) => Self::Integer(i),
            View::Float(f) => Self::Float(f),
            View::String(s) => Self::String(s),
            View::List(list) => list.into_iter().collect(),
            View::Map(map) => map.into_iter().collect(),
            View::Echo => Self::section_lambda(|text| text.to_owned()),
        }
    }
}

fuzz_target!(|data: (&str, Vec<(&str, &str)>, View)| {
    let (root, partials, view) = data;
    let engine = stache::Engine::new();
    engine.set_partials(partials);
    let _ = engine.render_from(root, &view.into());
});
