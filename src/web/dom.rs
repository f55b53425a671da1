//! The DOM surface the loader touches
//!
//! Kept to the handful of operations the page contract needs so the
//! rendering code runs against the browser or an in-memory tree alike.

/// Relative URL of the content store, as served next to the pages
pub const CONTENT_URL: &str = "assets/content.json";

/// Marker attribute on the generic article container; its value is the key
pub const CONTENT_KEY_ATTR: &str = "data-content-key";

pub const HOME_TITLE_ID: &str = "home-title";
pub const HOME_INTRO_ID: &str = "home-intro";
pub const HOME_BULLETS_ID: &str = "home-bullets";
pub const HOME_IMAGE_CAPTION_ID: &str = "home-image-caption";
pub const HOME_SECTIONS_ID: &str = "home-sections";

/// Zero-based index of a home section slot inside `#home-sections`
pub const SECTION_INDEX_ATTR: &str = "data-section-index";
pub const SECTION_HEADING_ATTR: &str = "data-section-heading";
pub const SECTION_BODY_ATTR: &str = "data-section-body";

pub trait Dom {
    type Element: Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element in document order carrying `name`
    fn first_with_attribute(&self, name: &str) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Descendants of `root` (not `root` itself) carrying `name`, in document order
    fn descendants_with_attribute(&self, root: &Self::Element, name: &str) -> Vec<Self::Element>;

    /// Replace the element's children with parsed markup
    fn set_inner_html(&mut self, element: &Self::Element, html: &str);

    /// Replace the element's children with a single text node
    fn set_text(&mut self, element: &Self::Element, text: &str);
}
