use stache::{value, Engine, List, Map, Value};

#[test]
fn value_empty_is_empty_map() {
    assert_eq!(value! {}, Value::Map(Map::new()));
}

#[test]
fn value_scalars() {
    let v = value! {
        none: None,
        yes: true,
        int: -12,
        float: 0.5,
        text: "lorem",
        owned: String::from("ipsum"),
        expr: (6 * 7),
    };
    let exp = Value::from([
        ("none", Value::None),
        ("yes", Value::Bool(true)),
        ("int", Value::Integer(-12)),
        ("float", Value::Float(0.5)),
        ("text", Value::from("lorem")),
        ("owned", Value::from("ipsum")),
        ("expr", Value::Integer(42)),
    ]);
    assert_eq!(v, exp);
}

#[test]
fn value_quoted_keys() {
    let v = value! { "first-name": "Jane", "a.b": { "": 1 } };
    let exp = Value::from([
        ("first-name", Value::from("Jane")),
        ("a.b", Value::from([("", 1)])),
    ]);
    assert_eq!(v, exp);
}

#[test]
fn value_nested_lists() {
    let v = value! { rows: [[1, 2], [], [None,]], trailing: ["x",] };
    let exp = Value::from([
        (
            "rows",
            Value::List(List::from([
                Value::from(vec![1, 2]),
                Value::List(List::new()),
                Value::List(List::from([Value::None])),
            ])),
        ),
        ("trailing", Value::from(vec!["x"])),
    ]);
    assert_eq!(v, exp);
}

#[test]
fn value_list_of_maps() {
    let v = value! { users: [{ name: "John" }, { name: "Jane", admin: true }] };
    let exp = Value::from([(
        "users",
        vec![
            Value::from([("name", "John")]),
            Value::from([("name", Value::from("Jane")), ("admin", Value::Bool(true))]),
        ],
    )]);
    assert_eq!(v, exp);
}

#[test]
fn value_lambda_is_shared() {
    let f = Value::lambda(|| String::from("x"));
    let v = value! { f: f.clone(), list: [f.clone()] };
    assert_eq!(v, Value::from([("f", f.clone()), ("list", Value::from(vec![f]))]));
}

#[test]
fn value_renders() {
    let view = value! {
        title: "Users",
        users: [{ name: "John", tags: ["a", "b"] }, { name: "Jane", tags: [] }],
    };
    let result = Engine::new()
        .render_from(
            "{{title}}:{{#users}} {{name}}({{#tags}}{{.}}{{/tags}}){{/users}}",
            &view,
        )
        .unwrap();
    assert_eq!(result, "Users: John(ab) Jane()");
}
