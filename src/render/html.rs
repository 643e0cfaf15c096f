//! Collapsible HTML rendering of a parameter tree.
//!
//! Every group becomes a block with a clickable header (toggle glyph, name,
//! aggregate count) and a content block holding its children. Every tensor
//! becomes one line with its name, shape and element count. The document is
//! self-contained: inline styles and a small script for the toggles.
//!
//! Output contains no timestamps, so the same tree always renders to the
//! same bytes.

use super::format::{format_count, format_shape};
use crate::aggregator::{aggregate_group, calculate_tree_stats};
use crate::hierarchy::{Group, Node, Tree};
use crate::utils::config::DEFAULT_TITLE;
use log::{debug, info};

const GLYPH_COLLAPSED: &str = "\u{25B6}"; // ▶
const GLYPH_EXPANDED: &str = "\u{25BC}"; // ▼

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 20px; background-color: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; }
h1 { color: #333; text-align: center; }
.summary { color: #666; text-align: center; }
.module { border: 1px solid #ddd; margin: 10px 0; background-color: white; border-radius: 5px; box-shadow: 0 2px 4px rgba(0, 0, 0, 0.1); }
.module-header { padding: 10px 15px; background-color: #f1f1f1; cursor: pointer; display: flex; justify-content: space-between; align-items: center; border-radius: 5px 5px 0 0; }
.module-header:hover { background-color: #e9e9e9; }
.module-content { padding: 10px 15px; border-top: 1px solid #ddd; }
.parameter { padding: 5px 15px; background-color: #f9f9f9; margin: 5px 0; border-radius: 3px; border-left: 3px solid #4CAF50; }
.toggle-icon { margin-right: 10px; font-weight: bold; }
.params-info { color: #666; font-size: 0.9em; }
.shape-info { color: #0066cc; font-weight: bold; }
.nested { margin-left: 20px; }
.error { color: red; }
"#;

const SCRIPT: &str = r#"
document.querySelectorAll('.module-header').forEach(function (header) {
  header.addEventListener('click', function () {
    var content = this.nextElementSibling;
    var expanded = this.getAttribute('data-state') === 'expanded';
    content.style.display = expanded ? 'none' : 'block';
    this.setAttribute('data-state', expanded ? 'collapsed' : 'expanded');
    this.querySelector('.toggle-icon').textContent = expanded ? '▶' : '▼';
  });
});
"#;

/// HTML document configuration
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    pub title: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl HtmlConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Line-oriented HTML builder with indentation
struct HtmlWriter {
    out: String,
    depth: usize,
}

impl HtmlWriter {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, html: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(html);
        self.out.push('\n');
    }

    /// Open a tag; attribute values are escaped
    fn open(&mut self, tag: &str, attrs: &[(&str, &str)]) {
        let line = format!("<{}{}>", tag, render_attrs(attrs));
        self.line(&line);
        self.depth += 1;
    }

    fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{}>", tag));
    }

    /// One element with escaped text content on a single line
    fn text_element(&mut self, tag: &str, attrs: &[(&str, &str)], text: &str) {
        let line = format!(
            "<{}{}>{}</{}>",
            tag,
            render_attrs(attrs),
            escape_html(text),
            tag
        );
        self.line(&line);
    }

    /// Verbatim multi-line block, indented at the current depth
    fn raw_block(&mut self, block: &str) {
        for line in block.lines().filter(|l| !l.trim().is_empty()) {
            self.line(line);
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

fn render_attrs(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_html(value)))
        .collect()
}

/// Escape text for use in HTML content and quoted attribute values
///
/// **Public** - names come from untrusted file headers
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render a complete HTML document for a tree
///
/// **Public** - main entry point for HTML output
///
/// # Arguments
/// * `tree` - Tree built by the hierarchy builder
/// * `config` - Optional document configuration (title)
///
/// # Returns
/// A standalone HTML document. The first top-level group starts expanded,
/// all other groups start collapsed.
pub fn render_html(tree: &Tree, config: Option<&HtmlConfig>) -> String {
    let config = config.cloned().unwrap_or_default();
    let stats = calculate_tree_stats(tree);

    info!("Rendering HTML for {} tensors", stats.tensor_count);

    let mut w = HtmlWriter::new();
    w.line("<!DOCTYPE html>");
    w.open("html", &[("lang", "en")]);

    w.open("head", &[]);
    w.line(r#"<meta charset="UTF-8">"#);
    w.line(r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#);
    w.text_element("title", &[], &config.title);
    w.open("style", &[]);
    w.raw_block(STYLE);
    w.close("style");
    w.close("head");

    w.open("body", &[]);
    w.open("div", &[("class", "container")]);
    w.text_element("h1", &[], &config.title);
    w.text_element(
        "p",
        &[("class", "summary")],
        &format!(
            "{} tensors, {} params",
            stats.tensor_count,
            format_count(stats.total_params)
        ),
    );
    w.open("div", &[("id", "visualization")]);
    write_top_level(&mut w, tree.root());
    w.close("div");
    w.close("div");

    w.open("script", &[]);
    w.raw_block(SCRIPT);
    w.close("script");
    w.close("body");
    w.close("html");

    let html = w.finish();
    debug!("HTML document is {} bytes", html.len());
    html
}

/// Render only the nested blocks for a tree (no document wrapper)
///
/// **Public** - useful for embedding and for tests
pub fn render_tree_fragment(tree: &Tree) -> String {
    let mut w = HtmlWriter::new();
    write_top_level(&mut w, tree.root());
    w.finish()
}

/// Render a standalone error document
///
/// **Public** - shown in place of the visualization when loading fails
pub fn render_error_page(message: &str) -> String {
    let mut w = HtmlWriter::new();
    w.line("<!DOCTYPE html>");
    w.open("html", &[("lang", "en")]);
    w.open("head", &[]);
    w.line(r#"<meta charset="UTF-8">"#);
    w.text_element("title", &[], "Error");
    w.open("style", &[]);
    w.raw_block(STYLE);
    w.close("style");
    w.close("head");
    w.open("body", &[]);
    w.text_element("h1", &[], "Error Loading File");
    w.text_element("p", &[("class", "error")], &format!("Error: {}", message));
    w.close("body");
    w.close("html");
    w.finish()
}

/// Top-level entries; only the first group starts expanded
fn write_top_level(w: &mut HtmlWriter, root: &Group) {
    let mut expanded_pending = true;
    for (name, node) in root.children() {
        let expanded = expanded_pending && !node.is_leaf();
        if expanded {
            expanded_pending = false;
        }
        write_node(w, name, node, 0, expanded);
    }
}

fn write_node(w: &mut HtmlWriter, name: &str, node: &Node, level: usize, expanded: bool) {
    match node {
        Node::Leaf(leaf) => {
            w.open("div", &[("class", "parameter")]);
            w.text_element("span", &[], name);
            w.text_element("span", &[("class", "shape-info")], &format_shape(leaf.shape()));
            w.text_element(
                "span",
                &[("class", "params-info")],
                &format!("({} params)", format_count(leaf.element_count())),
            );
            w.close("div");
        }
        Node::Group(group) => {
            let class = if level > 0 { "module nested" } else { "module" };
            let (state, glyph, display) = if expanded {
                ("expanded", GLYPH_EXPANDED, "display: block")
            } else {
                ("collapsed", GLYPH_COLLAPSED, "display: none")
            };

            w.open("div", &[("class", class)]);
            w.open("div", &[("class", "module-header"), ("data-state", state)]);
            w.line(&format!(
                r#"<span><span class="toggle-icon">{}</span>{}</span>"#,
                glyph,
                escape_html(name)
            ));
            w.text_element(
                "span",
                &[("class", "params-info")],
                &format!("{} params", format_count(aggregate_group(group))),
            );
            w.close("div");

            w.open("div", &[("class", "module-content"), ("style", display)]);
            for (child_name, child) in group.children() {
                write_node(w, child_name, child, level + 1, false);
            }
            w.close("div");
            w.close("div");
        }
    }
}
