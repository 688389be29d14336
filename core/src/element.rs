//! Attributed graph elements.

use crate::AttributeValue;

/// A graph element (node or edge) carrying an identifier and attributes.
///
/// Implemented by the nodes and edges of every graph backend the matcher is
/// run against.
pub trait AttributeAware {
    /// The identifier of this element, compared by `#id` requirements.
    fn id(&self) -> &str;

    /// Look up an attribute, `None` if the key is unset.
    fn attribute(&self, key: &str) -> Option<AttributeValue>;
}

impl<T: AttributeAware + ?Sized> AttributeAware for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn attribute(&self, key: &str) -> Option<AttributeValue> {
        (**self).attribute(key)
    }
}
