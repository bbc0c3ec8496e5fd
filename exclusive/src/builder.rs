use crate::cell::Exclusive;

/// The builder for an [Exclusive] which can be configured a bit more.
#[derive(Debug, Default)]
pub struct Builder {
    name: Option<Box<str>>,
}

impl Builder {
    /// Construct a new builder.
    pub fn new() -> Self {
        Self { name: None }
    }

    /// Configure a name for the cell. The name is used to identify the cell
    /// in diagnostics, such as log output when a thread has to wait for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let cell = exclusive::Builder::new().name("account-a").build(1000);
    /// assert_eq!(cell.name(), Some("account-a"));
    /// ```
    pub fn name<N>(self, name: N) -> Self
    where
        N: Into<String>,
    {
        Self {
            name: Some(name.into().into_boxed_str()),
        }
    }

    /// Construct the cell around the given value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let a = exclusive::Builder::new().build(1);
    /// let b = exclusive::Exclusive::new(2);
    /// assert!(a.id() < b.id());
    /// ```
    pub fn build<T>(self, value: T) -> Exclusive<T> {
        Exclusive::from_parts(self.name, value)
    }
}
