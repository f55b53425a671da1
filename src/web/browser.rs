//! Browser binding: `web_sys` DOM and the module start hook

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, Response, Window};

use super::dom::{Dom, CONTENT_URL};
use super::render::load;

pub struct BrowserDom {
    document: web_sys::Document,
}

impl BrowserDom {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl Dom for BrowserDom {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn first_with_attribute(&self, name: &str) -> Option<Element> {
        self.document
            .query_selector(&format!("[{name}]"))
            .ok()
            .flatten()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn descendants_with_attribute(&self, root: &Element, name: &str) -> Vec<Element> {
        let Ok(nodes) = root.query_selector_all(&format!("[{name}]")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn set_inner_html(&mut self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }
}

async fn fetch_text(window: &Window, url: &str) -> Result<String, JsValue> {
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into()?;

    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }

    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

/// Runs once when the module is instantiated (loaded as a deferred module
/// script, so the document is parsed by then)
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    wasm_bindgen_futures::spawn_local(async {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let fetched = fetch_text(&window, CONTENT_URL)
            .await
            .map_err(|err| format!("{err:?}"));
        let mut dom = BrowserDom::new(document);
        load(fetched, &mut dom);
    });
}
