//! Render Tree
//!
//! A small typed node tree that every view fragment is built from. Text is
//! only ever stored as [`Node::Text`] and escaped when serialized, so user
//! supplied strings can never turn into live markup.

/// Tags rendered on their own line by [`Node::to_plain`]
const BLOCK_TAGS: &[&str] = &[
    "div", "p", "h1", "h2", "h3", "h4", "li", "ol", "ul", "section", "article", "header",
    "footer", "main", "nav",
];

const VOID_TAGS: &[&str] = &["br", "img", "input", "meta", "link"];

/// A node in the render tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Trusted markup known at compile time (styles, scripts)
    Static(&'static str),
}

/// An element with attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Serialize to HTML, escaping all text and attribute values
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Static(markup) => out.push_str(markup),
            Node::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&element.tag) {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Static(_) => String::new(),
            Node::Element(element) => element
                .children
                .iter()
                .map(Node::text_content)
                .collect(),
        }
    }

    /// Plain-text rendering for terminals: one line per block element
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        self.write_plain(&mut out);
        out.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_plain(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Static(_) => {}
            Node::Element(element) if element.tag == "svg" => {}
            Node::Element(element) => {
                let block = BLOCK_TAGS.contains(&element.tag);
                if block {
                    out.push('\n');
                } else if element.tag == "button" {
                    out.push_str(" [");
                }
                for child in &element.children {
                    child.write_plain(out);
                }
                if block {
                    out.push('\n');
                } else if element.tag == "button" {
                    out.push(']');
                }
            }
        }
    }

    /// Visit every element in document order
    pub fn walk(&self, visit: &mut impl FnMut(&Element)) {
        if let Node::Element(element) = self {
            visit(element);
            for child in &element.children {
                child.walk(visit);
            }
        }
    }
}

/// Escape text for HTML text and attribute contexts
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_to_html_escapes_text_and_attrs() {
        let node: Node = Element::new("p")
            .attr("title", "a\" onmouseover=\"x")
            .text("<b>bold</b>")
            .into();

        assert_eq!(
            node.to_html(),
            "<p title=\"a&quot; onmouseover=&quot;x\">&lt;b&gt;bold&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_attrs_keep_insertion_order() {
        let node: Node = Element::new("input")
            .attr("type", "date")
            .attr("id", "date-picker")
            .attr("value", "")
            .into();
        assert_eq!(node.to_html(), "<input type=\"date\" id=\"date-picker\" value=\"\">");
    }

    #[test]
    fn test_void_elements() {
        let node: Node = Element::new("div")
            .child(Element::new("br"))
            .text("after")
            .into();
        assert_eq!(node.to_html(), "<div><br>after</div>");
    }

    #[test]
    fn test_to_plain() {
        let node: Node = Element::new("div")
            .child(Element::new("h4").text("Title"))
            .child(
                Element::new("p")
                    .text("Body")
                    .child(Element::new("button").text("Watch")),
            )
            .into();
        assert_eq!(node.to_plain(), "Title\nBody [Watch]");
    }

    #[test]
    fn test_walk_visits_in_order() {
        let node: Node = Element::new("ol")
            .child(Element::new("li").attr("id", "a"))
            .child(Element::new("li").attr("id", "b"))
            .into();

        let mut ids = Vec::new();
        node.walk(&mut |element| {
            if let Some(id) = element.get_attr("id") {
                ids.push(id.to_string());
            }
        });
        assert_eq!(ids, vec!["a", "b"]);
    }
}
