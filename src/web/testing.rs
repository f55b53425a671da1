//! In-memory [`Dom`] used by the rendering tests

use super::dom::Dom;

#[derive(Debug, Clone, Default)]
struct Node {
    id: Option<String>,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
    content: String,
    markup: bool,
    detached: bool,
}

/// Flat arena of elements; replacing an element's content detaches its
/// descendants the way a browser drops replaced children
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryDom {
    nodes: Vec<Node>,
}

impl MemoryDom {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(
        &mut self,
        parent: Option<usize>,
        id: Option<&str>,
        attributes: &[(&str, &str)],
        content: &str,
    ) -> usize {
        self.nodes.push(Node {
            id: id.map(str::to_string),
            attributes: attributes
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            parent,
            content: content.to_string(),
            markup: false,
            detached: false,
        });
        self.nodes.len() - 1
    }

    pub(crate) fn content(&self, element: usize) -> &str {
        &self.nodes[element].content
    }

    pub(crate) fn is_markup(&self, element: usize) -> bool {
        self.nodes[element].markup
    }

    fn is_descendant(&self, node: usize, ancestor: usize) -> bool {
        let mut current = self.nodes[node].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.nodes[parent].parent;
        }
        false
    }

    fn has_attribute(&self, node: usize, name: &str) -> bool {
        self.nodes[node].attributes.iter().any(|(n, _)| n == name)
    }

    fn live(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(|&index| !self.nodes[index].detached)
    }

    fn replace_content(&mut self, element: usize, content: &str, markup: bool) {
        for index in 0..self.nodes.len() {
            if self.is_descendant(index, element) {
                self.nodes[index].detached = true;
            }
        }
        let node = &mut self.nodes[element];
        node.content = content.to_string();
        node.markup = markup;
    }
}

impl Dom for MemoryDom {
    type Element = usize;

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.live()
            .find(|&index| self.nodes[index].id.as_deref() == Some(id))
    }

    fn first_with_attribute(&self, name: &str) -> Option<usize> {
        self.live().find(|&index| self.has_attribute(index, name))
    }

    fn attribute(&self, element: &usize, name: &str) -> Option<String> {
        self.nodes[*element]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn descendants_with_attribute(&self, root: &usize, name: &str) -> Vec<usize> {
        self.live()
            .filter(|&index| self.is_descendant(index, *root) && self.has_attribute(index, name))
            .collect()
    }

    fn set_inner_html(&mut self, element: &usize, html: &str) {
        self.replace_content(*element, html, true);
    }

    fn set_text(&mut self, element: &usize, text: &str) {
        self.replace_content(*element, text, false);
    }
}
