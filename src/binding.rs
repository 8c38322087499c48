//! Deferred values
//!
//! A [`Binding`] is a slot in the tree whose text is produced at render time
//! from the data object handed to the renderer, rather than when the tree is
//! built. The same document can therefore be rendered for many data objects.

use std::fmt;

use crate::utils::split_path;
use crate::value::RenderValue;

trait Resolve<T> {
    fn resolve(&self, data: &T) -> String;
}

struct FnResolver<F>(F);

impl<T, F, V> Resolve<T> for FnResolver<F>
where
    F: Fn(&T) -> V,
    V: fmt::Display,
{
    fn resolve(&self, data: &T) -> String {
        (self.0)(data).to_string()
    }
}

struct PropertyResolver {
    segments: Vec<String>,
}

impl<T: RenderValue> Resolve<T> for PropertyResolver {
    fn resolve(&self, data: &T) -> String {
        data.get_property(&self.segments)
            .map(|value| value.into_owned())
            .unwrap_or_default()
    }
}

/// A value resolved against a data object of type `T` during rendering
///
/// Bindings must be pure: the renderer may call them any number of times, once
/// per resolution.
///
/// # Examples
///
/// ```rust
/// use html_flow::Binding;
///
/// struct Greeting {
///     name: &'static str,
/// }
///
/// let binding = Binding::new(|g: &Greeting| format!("Hello, {}!", g.name));
/// assert_eq!(binding.resolve(&Greeting { name: "Ana" }), "Hello, Ana!");
/// ```
pub struct Binding<T> {
    resolver: Box<dyn Resolve<T> + Send + Sync>,
}

impl<T> Binding<T> {
    /// Wrap a function of the data object
    pub fn new<F, V>(f: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: fmt::Display,
    {
        Self {
            resolver: Box::new(FnResolver(f)),
        }
    }

    /// Produce the value for `data`
    pub fn resolve(&self, data: &T) -> String {
        self.resolver.resolve(data)
    }
}

impl<T: RenderValue> Binding<T> {
    /// Bind to a dotted property path of the data object
    ///
    /// Missing properties resolve to the empty string.
    ///
    /// ```rust
    /// use html_flow::Binding;
    /// use serde_json::json;
    ///
    /// let binding = Binding::property("author.name");
    /// let data = json!({"author": {"name": "Miguel"}});
    /// assert_eq!(binding.resolve(&data), "Miguel");
    /// assert_eq!(binding.resolve(&json!({})), "");
    /// ```
    pub fn property(path: &str) -> Self {
        Self {
            resolver: Box::new(PropertyResolver {
                segments: split_path(path),
            }),
        }
    }
}

impl<T> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Binding(<deferred>)")
    }
}

/// Conversion into a [`Binding`], so builder methods accept closures directly
pub trait IntoBinding<T> {
    fn into_binding(self) -> Binding<T>;
}

impl<T> IntoBinding<T> for Binding<T> {
    fn into_binding(self) -> Binding<T> {
        self
    }
}

impl<T, F, V> IntoBinding<T> for F
where
    F: Fn(&T) -> V + Send + Sync + 'static,
    V: fmt::Display,
{
    fn into_binding(self) -> Binding<T> {
        Binding::new(self)
    }
}
