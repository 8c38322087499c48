//! Basic integration tests for building and rendering documents
//!
//! These tests go through the public API only: fluent construction, deferred
//! values, configuration presets and the error surface.

use html_flow::prelude::*;
use html_flow::test_utils::{count_elements, extract_attrs_by_selector};
use html_flow::{assert_html_eq, Error, RenderConfig, SerializedValue};
use pretty_assertions::assert_eq;
use serde::Serialize;
use serde_json::{json, Value};

fn prop(path: &str) -> Binding<Value> {
    Binding::property(path)
}

fn blog_page() -> Document<Value> {
    let mut doc = Document::new();
    doc.html()
        .attr_lang("en")
        .head()
            .meta().attr_charset("utf-8")
            .title().text_with(prop("title")).close()
            .link().attr_rel(Rel::Stylesheet).attr_href("/site.css")
        .close()
        .body()
            .heading(1, "Blog")
            .article()
                .attr_with("data-id", prop("id"))
                .h2().text_with(prop("title")).close()
                .p().text_with(prop("author.name")).close()
            .close()
        .close()
    .close();
    doc
}

#[test]
fn test_full_page_render() {
    let doc = blog_page();
    let data = json!({"id": 7, "title": "Hello", "author": {"name": "Ana"}});
    let html = doc.render_with(&data).unwrap();

    let expected = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Hello</title>
    <link rel="stylesheet" href="/site.css">
  </head>
  <body>
    <h1>
      Blog
    </h1>
    <article data-id="7">
      <h2>
        Hello
      </h2>
      <p>
        Ana
      </p>
    </article>
  </body>
</html>
"#;
    assert_eq!(html, expected);
}

#[test]
fn test_same_document_many_data_objects() {
    let doc = blog_page();
    let first = doc
        .render_with(&json!({"id": 1, "title": "One", "author": {"name": "A"}}))
        .unwrap();
    let second = doc
        .render_with(&json!({"id": 2, "title": "Two", "author": {"name": "B"}}))
        .unwrap();

    assert_eq!(extract_attrs_by_selector(&first, "article", "data-id"), vec!["1"]);
    assert_eq!(extract_attrs_by_selector(&second, "article", "data-id"), vec!["2"]);
    assert!(second.contains("Two"));
    assert!(!second.contains("One"));
}

#[test]
fn test_missing_property_renders_empty() {
    let doc = blog_page();
    let html = doc.render_with(&json!({"title": "T"})).unwrap();
    assert!(html.contains("<article data-id=\"\">"));
}

#[test]
fn test_render_without_data_is_missing_binding() {
    let doc = blog_page();
    let err = doc.render().unwrap_err();
    assert!(matches!(err, Error::MissingBinding(_)));
}

#[test]
fn test_pretty_and_minified_have_same_structure() {
    let mut pretty: Document<()> = Document::new();
    let mut minified: Document<()> = Document::with_config(RenderConfig::minified());
    for doc in [&mut pretty, &mut minified] {
        doc.html()
            .body()
                .ul()
                    .li().text("a").close()
                    .li().text("b").close()
                .close()
                .hr()
                .p().attr_class("note").text("x & y").close()
            .close()
        .close();
    }

    let pretty = pretty.render().unwrap();
    let minified = minified.render().unwrap();
    assert!(!minified.contains('\n'));
    assert_html_eq!(&pretty, &minified);
    assert_eq!(count_elements(&minified, "li"), 2);
}

#[test]
fn test_serialized_value_data() {
    #[derive(Serialize)]
    struct Order {
        number: u32,
        items: Vec<String>,
    }

    let field = |path: &str| -> Binding<SerializedValue<Order>> { Binding::property(path) };

    let mut doc: Document<SerializedValue<Order>> = Document::new();
    doc.html()
        .body()
            .span().text_with(field("number")).close()
            .span().text_with(field("items.1")).close()
            .span().text_with(|o: &SerializedValue<Order>| o.inner().items.len()).close()
        .close()
    .close();

    let order = SerializedValue::new(Order {
        number: 42,
        items: vec!["pen".into(), "ink".into()],
    });
    let html = doc.render_with(&order).unwrap();
    assert!(html.contains("      42\n"));
    assert!(html.contains("      ink\n"));
    assert!(html.contains("      2\n"));
}

#[test]
fn test_structural_error_surfaces_at_render() {
    let mut doc: Document<()> = Document::new();
    doc.html()
        .body()
            .element("img").text("caption")
        .close()
    .close();

    let err = doc.render().unwrap_err();
    assert!(matches!(err, Error::StructureError(_)));
    assert_eq!(doc.check().unwrap_err(), err);
}

#[test]
fn test_unfinished_document_is_invalid_state() {
    let mut doc: Document<()> = Document::new();
    doc.html().body().p().text("never closed");
    assert!(matches!(doc.render().unwrap_err(), Error::InvalidState(_)));
}

#[test]
fn test_concurrent_renders_share_document() {
    let mut doc: Document<u32> = Document::with_config(RenderConfig::minified().with_preamble(""));
    doc.html()
        .body()
            .p().text_with(|n: &u32| n * 10).close()
        .close()
    .close();

    let doc = &doc;
    let results: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8u32)
            .map(|n| scope.spawn(move || doc.render_with(&n).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (n, html) in results.iter().enumerate() {
        assert_eq!(html, &format!("<html><body><p>{}</p></body></html>", n * 10));
    }
}

#[test]
fn test_render_into_custom_sink() {
    let mut doc: Document<()> = Document::new();
    doc.html().text("x").close();

    let mut out = String::from("prefix:");
    doc.render_to(&mut out, None).unwrap();
    assert!(out.starts_with("prefix:<!DOCTYPE html>\n"));
}

#[test]
fn test_failing_sink_is_format_error() {
    struct Closed;
    impl std::fmt::Write for Closed {
        fn write_str(&mut self, _: &str) -> std::fmt::Result {
            Err(std::fmt::Error)
        }
    }

    let mut doc: Document<()> = Document::new();
    doc.html().close();
    let err = doc.render_to(&mut Closed, None).unwrap_err();
    assert!(matches!(err, Error::FormatError(_)));
}
