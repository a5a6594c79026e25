use alloc::string::String;
use alloc::vec::Vec;

/// Host document abstraction.
///
/// The engine is generic over this trait so it can drive a real browser DOM, a simulated
/// document, or any render tree that can answer geometry and selector queries. Class mutation
/// takes `&self`; hosts are expected to use interior mutability (a DOM handle already is one).
///
/// Selector-parse failures surface as `Err`; the engine swallows them and treats the query as
/// matching nothing, so a malformed selector can never break the host's event loop.
pub trait Dom {
    /// Cheap-to-clone element handle.
    type Element: Clone;
    /// Selector-parse failure type.
    type Error: core::fmt::Debug;

    /// Returns all elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Element>, Self::Error>;

    /// Returns the first element matching `selector`.
    fn query(&self, selector: &str) -> Result<Option<Self::Element>, Self::Error> {
        self.query_all(selector).map(|els| els.into_iter().next())
    }

    /// The document root element (receives the configured root class).
    fn root(&self) -> Self::Element;

    /// The element's id attribute, if present and non-empty.
    fn element_id(&self, element: &Self::Element) -> Option<String>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Current vertical scroll offset in document pixels.
    fn scroll_y(&self) -> f64;

    /// Current viewport height in pixels.
    fn viewport_height(&self) -> f64;

    /// The element's viewport-relative bounding box as `(top, bottom)`.
    ///
    /// The engine adds `scroll_y()` to produce stable document-coordinate extents.
    fn bounding_extent(&self, element: &Self::Element) -> (f64, f64);
}
