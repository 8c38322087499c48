//! Data access for deferred values
//!
//! [`Binding::property`](crate::Binding::property) resolves dotted property
//! paths such as `"author.name"` against the data object passed to
//! [`Document::render_with`](crate::Document::render_with). The data object
//! only has to implement [`RenderValue`].
//!
//! # Built-in Implementations
//!
//! - `serde_json::Value` - nested objects, arrays and `items[0]` index syntax
//! - `String` and `str` - leaf values
//! - numeric types and `bool` - converted with `to_string`
//! - `Option<T>`, `Vec<T>`, `HashMap<String, T>` and `BTreeMap<String, T>`
//! - [`SerializedValue`] - any `Serialize` type, through its JSON form
//!
//! With the `derive` feature, `#[derive(Renderable)]` implements the trait for
//! structs with named fields:
//!
//! ```rust,ignore
//! use html_flow::Renderable;
//!
//! #[derive(Renderable)]
//! struct Article {
//!     title: String,
//!     #[renderable(rename = "body")]
//!     content: String,
//!     #[renderable(skip)]
//!     internal_id: u64,
//! }
//! ```

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// Trait for data objects whose properties can be bound into a document
///
/// A property path is a slice of segments: `["name"]` for a direct property,
/// `["user", "name"]` for nested access, `["items", "0"]` for an array item.
/// An empty path asks the value for itself.
///
/// Return `Cow::Borrowed` where the data already holds a string and
/// `Cow::Owned` for computed values.
///
/// # Examples
///
/// ```rust
/// use html_flow::RenderValue;
/// use std::borrow::Cow;
///
/// struct Product {
///     name: String,
///     price: u32,
/// }
///
/// impl RenderValue for Product {
///     fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
///         let (head, rest) = path.split_first()?;
///         match head.as_str() {
///             "name" => self.name.get_property(rest),
///             "price" => self.price.get_property(rest),
///             _ => None,
///         }
///     }
/// }
///
/// let p = Product { name: "Lamp".into(), price: 30 };
/// assert_eq!(p.get_property(&["price".to_string()]).unwrap(), "30");
/// ```
pub trait RenderValue {
    /// Get a property value as a string, or `None` when the path does not resolve
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>>;
}

impl RenderValue for JsonValue {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        let mut current = self;
        for segment in path {
            if let Some((prop_name, index)) = parse_array_access(segment) {
                current = current.get(prop_name)?.get(index)?;
                continue;
            }
            current = match current {
                JsonValue::Object(obj) => obj.get(segment.as_str())?,
                JsonValue::Array(arr) => arr.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }

        match current {
            JsonValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            JsonValue::Number(n) => Some(Cow::Owned(n.to_string())),
            JsonValue::Bool(b) => Some(Cow::Owned(b.to_string())),
            _ => None,
        }
    }
}

impl RenderValue for str {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        if path.is_empty() {
            Some(Cow::Borrowed(self))
        } else {
            None
        }
    }
}

impl RenderValue for String {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        self.as_str().get_property(path)
    }
}

macro_rules! impl_render_value_for_display {
    ($($t:ty),*) => {
        $(
            impl RenderValue for $t {
                fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
                    if path.is_empty() {
                        Some(Cow::Owned(self.to_string()))
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

impl_render_value_for_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl<T: RenderValue + ?Sized> RenderValue for &T {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        (**self).get_property(path)
    }
}

impl<T: RenderValue + ?Sized> RenderValue for Box<T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        (**self).get_property(path)
    }
}

impl<T: RenderValue> RenderValue for Option<T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        self.as_ref()?.get_property(path)
    }
}

impl<T: RenderValue> RenderValue for Vec<T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        let (head, rest) = path.split_first()?;
        let index = head.parse::<usize>().ok()?;
        self.get(index)?.get_property(rest)
    }
}

impl<T: RenderValue> RenderValue for HashMap<String, T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        let (head, rest) = path.split_first()?;
        self.get(head)?.get_property(rest)
    }
}

impl<T: RenderValue> RenderValue for BTreeMap<String, T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        let (head, rest) = path.split_first()?;
        self.get(head)?.get_property(rest)
    }
}

/// Adapter exposing any `Serialize` type as a [`RenderValue`]
///
/// The value is converted to JSON once, on first access.
pub struct SerializedValue<T: Serialize> {
    value: T,
    cached_json: once_cell::sync::OnceCell<JsonValue>,
}

impl<T: Serialize> SerializedValue<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            cached_json: once_cell::sync::OnceCell::new(),
        }
    }

    /// The wrapped value
    pub fn inner(&self) -> &T {
        &self.value
    }

    fn as_json(&self) -> &JsonValue {
        self.cached_json
            .get_or_init(|| serde_json::to_value(&self.value).unwrap_or(JsonValue::Null))
    }
}

impl<T: Serialize> RenderValue for SerializedValue<T> {
    fn get_property(&self, path: &[String]) -> Option<Cow<'_, str>> {
        self.as_json().get_property(path)
    }
}

fn parse_array_access(segment: &str) -> Option<(&str, usize)> {
    let bracket_pos = segment.find('[')?;
    if !segment.ends_with(']') || bracket_pos == 0 {
        return None;
    }
    let index = segment[bracket_pos + 1..segment.len() - 1].parse::<usize>().ok()?;
    Some((&segment[..bracket_pos], index))
}
