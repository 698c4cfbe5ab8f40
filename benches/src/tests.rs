use crate::context;
use crate::{Engine, Handlebars, Stache};

const SOURCE: &str = include_str!("../benchdata/basic.mustache");

#[test]
fn stache() {
    let result = render::<Stache>(SOURCE);
    assert_eq!(
        result,
        r#"<html>
  <head>
    <title>My awesome webpage!</title>
  </head>
  <body>
    <ul>
      <li>Nancy Wheeler is 17</li>
      <li>Steve Harrington is 18</li>
    </ul>
  </body>
</html>
"#
    );
}

#[test]
fn handlebars() {
    let result = render::<Handlebars>(SOURCE);
    assert!(result.contains("<li>Steve Harrington is 18</li>"));
    assert!(!result.contains("Billy Hargrove"));
}

fn render<'a, E: Engine<'a>>(source: &'a str) -> String {
    let mut engine = E::new();
    engine.add_template("bench", source);
    engine.render("bench", &context::fixture())
}
