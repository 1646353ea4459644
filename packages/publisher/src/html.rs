//! Page tree → static HTML document.
//!
//! A deterministic pre-order traversal of the page's entity tree.
//! Each node resolves its desktop style (publish targets the single
//! static breakpoint) to an inline style string with stable property
//! ordering, maps its component kind to an output tag through a fixed
//! table, and carries its node id and kind as diagnostic attributes.
//! The walk is an explicit work stack, so tree depth never translates
//! into call-stack depth.

use crate::PublishError;
use pageforge_document::{Breakpoint, ComponentKind, Node, Page};

/// Options for HTML generation.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Pretty print with newlines and indentation.
    pub pretty: bool,
    /// Indentation string.
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.buffer.push_str(text);
        if self.options.pretty {
            self.buffer.push('\n');
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }
}

/// Compile one page to a complete standalone HTML document.
pub fn compile_page_html(page: &Page, options: &HtmlOptions) -> Result<String, PublishError> {
    if !page.tree.contains(&page.tree.root) {
        return Err(PublishError::MissingRoot {
            page: page.id.clone(),
            root: page.tree.root.clone(),
        });
    }

    let mut ctx = Context::new(options);
    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(page, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    compile_tree(page, &mut ctx);
    ctx.add_line(&format!(
        "<script>window.__PAGEFORGE_PAGE_ID__ = {};</script>",
        serde_json::Value::String(page.id.clone())
    ));
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");
    Ok(ctx.buffer)
}

fn compile_head(page: &Page, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");

    let title = page.seo.title.as_deref().unwrap_or(&page.name);
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));

    if let Some(description) = &page.seo.description {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(description)
        ));
    }
    if !page.seo.keywords.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"keywords\" content=\"{}\">",
            escape_html(&page.seo.keywords.join(", "))
        ));
    }
    if page.seo.noindex {
        ctx.add_line("<meta name=\"robots\" content=\"noindex\">");
    }

    ctx.add_line(&format!("<link rel=\"stylesheet\" href=\"{}\">", crate::STYLES_FILE));

    ctx.dedent();
    ctx.add_line("</head>");
}

/// Pre-order walk using an explicit stack of enter/leave steps.
fn compile_tree(page: &Page, ctx: &mut Context) {
    enum Step {
        Enter(String),
        Leave(&'static str),
    }

    let mut stack = vec![Step::Enter(page.tree.root.clone())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                let Some(node) = page.tree.get(&id) else {
                    continue;
                };
                let tag = markup_tag(node);

                if node.kind == ComponentKind::Image {
                    ctx.add_line(&compile_image(node));
                    continue;
                }

                ctx.add_line(&format!("<{}{}>", tag.name, compile_attributes(node)));
                ctx.indent();

                if let Some(text) = node.prop_str("text") {
                    if tag.renders_text {
                        ctx.add_line(&escape_html(text));
                    }
                }

                stack.push(Step::Leave(tag.name));
                for child in node.children.iter().rev() {
                    stack.push(Step::Enter(child.clone()));
                }
            }
            Step::Leave(name) => {
                ctx.dedent();
                ctx.add_line(&format!("</{}>", name));
            }
        }
    }
}

struct MarkupTag {
    name: &'static str,
    renders_text: bool,
}

/// Fixed component-kind → output-tag table.
fn markup_tag(node: &Node) -> MarkupTag {
    match &node.kind {
        ComponentKind::Heading => MarkupTag {
            name: heading_tag(node),
            renders_text: true,
        },
        ComponentKind::Text => MarkupTag {
            name: "p",
            renders_text: true,
        },
        ComponentKind::Button => MarkupTag {
            name: "button",
            renders_text: true,
        },
        // Everything else, plugin kinds included, renders as a
        // generic container
        _ => MarkupTag {
            name: "div",
            renders_text: false,
        },
    }
}

fn heading_tag(node: &Node) -> &'static str {
    let level = node
        .props
        .get("level")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or(2)
        .clamp(1, 6);
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

fn compile_attributes(node: &Node) -> String {
    let mut out = format!(
        " data-node-id=\"{}\" data-kind=\"{}\"",
        escape_html(&node.id),
        escape_html(node.kind.as_tag())
    );
    let style = inline_style(node);
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_html(&style)));
    }
    out
}

fn compile_image(node: &Node) -> String {
    let src = node.prop_str("src").unwrap_or("");
    let alt = node.prop_str("alt").unwrap_or("");
    format!(
        "<img{} src=\"{}\" alt=\"{}\" />",
        compile_attributes(node),
        escape_html(src),
        escape_html(alt)
    )
}

/// Resolved desktop style as an inline declaration string. BTreeMap
/// iteration keeps the property order stable across runs.
fn inline_style(node: &Node) -> String {
    node.styles
        .resolve(Breakpoint::Desktop)
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageforge_document::{ComponentKind, ComponentRegistry, Node, Page};
    use serde_json::json;

    fn attach(page: &mut Page, parent_id: &str, mut node: Node) -> String {
        node.parent_id = Some(parent_id.to_string());
        let id = node.id.clone();
        page.tree.entities.insert(id.clone(), node);
        page.tree
            .get_mut(parent_id)
            .unwrap()
            .children
            .push(id.clone());
        id
    }

    fn sample_page() -> Page {
        let registry = ComponentRegistry::with_builtins();
        let mut page = Page::new("Landing", "/");
        let root = page.tree.root.clone();

        let mut heading = registry.create_node(ComponentKind::Heading).unwrap();
        heading.props.insert("text".into(), json!("Welcome <here>"));
        heading.props.insert("level".into(), json!(1));
        attach(&mut page, &root, heading);

        let mut image = registry.create_node(ComponentKind::Image).unwrap();
        image.props.insert("src".into(), json!("/hero.png"));
        image.props.insert("alt".into(), json!("Hero"));
        attach(&mut page, &root, image);

        page
    }

    #[test]
    fn test_tag_mapping_and_escaping() {
        let page = sample_page();
        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();

        assert!(html.contains("<h1"));
        assert!(html.contains("Welcome &lt;here&gt;"));
        assert!(html.contains("<img"));
        assert!(html.contains("src=\"/hero.png\""));
        assert!(html.contains("alt=\"Hero\""));
        assert!(html.contains("/>"));
    }

    #[test]
    fn test_diagnostic_attributes_present() {
        let page = sample_page();
        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();
        assert!(html.contains(&format!("data-node-id=\"{}\"", page.tree.root)));
        assert!(html.contains("data-kind=\"section\""));
        assert!(html.contains("data-kind=\"heading\""));
    }

    #[test]
    fn test_inline_style_is_sorted() {
        let registry = ComponentRegistry::with_builtins();
        let mut page = Page::new("P", "/");
        let root = page.tree.root.clone();
        let mut text = registry.create_node(ComponentKind::Text).unwrap();
        text.styles.desktop.clear();
        text.styles.desktop.insert("z-index".into(), "2".into());
        text.styles.desktop.insert("color".into(), "red".into());
        attach(&mut page, &root, text);

        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();
        assert!(html.contains("style=\"color: red; z-index: 2\""));
    }

    #[test]
    fn test_head_carries_seo_fields() {
        let mut page = sample_page();
        page.seo.title = Some("Custom Title".into());
        page.seo.description = Some("A page".into());
        page.seo.noindex = true;

        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();
        assert!(html.contains("<title>Custom Title</title>"));
        assert!(html.contains("name=\"description\" content=\"A page\""));
        assert!(html.contains("name=\"robots\" content=\"noindex\""));
        assert!(html.contains("rel=\"stylesheet\" href=\"styles.css\""));
    }

    #[test]
    fn test_runtime_payload_embeds_page_id() {
        let page = sample_page();
        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();
        assert!(html.contains(&format!(
            "window.__PAGEFORGE_PAGE_ID__ = \"{}\";",
            page.id
        )));
    }

    #[test]
    fn test_heading_level_clamped() {
        let registry = ComponentRegistry::with_builtins();
        let mut page = Page::new("P", "/");
        let root = page.tree.root.clone();
        let mut heading = registry.create_node(ComponentKind::Heading).unwrap();
        heading.props.insert("level".into(), json!(42));
        attach(&mut page, &root, heading);

        let html = compile_page_html(&page, &HtmlOptions::default()).unwrap();
        assert!(html.contains("<h6"));
    }
}
