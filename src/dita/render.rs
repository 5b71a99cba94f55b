//! Core document tree → DITA topic rendering.
//!
//! One [`Renderer`] is constructed per document conversion call and
//! discarded afterwards; its identifier registry and section tree are
//! never shared between documents. The shared state across a batch is
//! the [`Aggregator`] alone, threaded in by reference.
//!
//! Rendering is a synchronous recursive descent in source order. Raw
//! text is escaped at the leaves; containers concatenate child output
//! verbatim, so nothing is ever escaped twice.

use crate::ast::{Block, Cell, DocumentTree, Inline, Row, Section, TableNode};
use crate::batch::Aggregator;
use crate::error::{Error, Result};

use super::escape::{escape_xml, sanitize};
use super::id::IdRegistry;
use super::section_tree::SectionTree;

/// Rendering context passed to embedded document conversion.
///
/// `Table` marks content being serialized into a table cell: the outer
/// topic wrapping is suppressed and paragraphs emit bare text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Normal,
    Table,
}

/// Options fixed for a whole conversion batch.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Render preamble blocks as plain paragraphs instead of `<abstract>`.
    pub preamble_as_paragraph: bool,
    /// Value of the `xml:lang` attribute on generated topics and maps.
    pub lang: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preamble_as_paragraph: true,
            lang: "en".to_string(),
        }
    }
}

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The rendered root topic. Not persisted by the renderer itself;
    /// the batch driver stores it under the document's own name when no
    /// map was produced.
    pub content: String,
    /// Identifier allocated for the document root.
    pub id: String,
    /// Aggregator key of the map synthesized for this document, if its
    /// sections were decomposed into independent topics.
    pub map_key: Option<String>,
}

/// Convert one document tree, writing section topics and the map (when
/// one is warranted) into the aggregator.
///
/// `file_stem` is the input file's base name; it names the map file and
/// the flat-topic fallback. Cross-references inside the document resolve
/// against whatever the aggregator already contains, which is why the
/// batch driver runs every document through here twice.
pub fn convert_document(
    aggregator: &mut Aggregator,
    tree: &DocumentTree,
    file_stem: Option<&str>,
    options: &RenderOptions,
) -> Result<Conversion> {
    let mut renderer = Renderer::new(aggregator, file_stem, options);
    let content = renderer.document(tree, RenderMode::Normal)?;
    Ok(Conversion {
        content,
        id: renderer.root_id.unwrap_or_else(|| "topic".to_string()),
        map_key: renderer.map_key,
    })
}

/// Per-document rendering state. Short-lived: one value per conversion
/// call, threaded through the recursion explicitly.
struct Renderer<'a> {
    aggregator: &'a mut Aggregator,
    options: &'a RenderOptions,
    file_stem: Option<&'a str>,
    ids: IdRegistry,
    sections: SectionTree,
    in_section: bool,
    in_table: bool,
    root_id: Option<String>,
    map_key: Option<String>,
}

impl<'a> Renderer<'a> {
    fn new(
        aggregator: &'a mut Aggregator,
        file_stem: Option<&'a str>,
        options: &'a RenderOptions,
    ) -> Self {
        Self {
            aggregator,
            options,
            file_stem,
            ids: IdRegistry::new(),
            sections: SectionTree::new(),
            in_section: false,
            in_table: false,
            root_id: None,
            map_key: None,
        }
    }

    /// Render a whole document. In table mode (or while already inside a
    /// table) only the body content is produced, without topic wrapping
    /// and without touching the identifier registry.
    fn document(&mut self, doc: &DocumentTree, mode: RenderMode) -> Result<String> {
        if mode == RenderMode::Table || self.in_table {
            return self.blocks(&doc.blocks);
        }

        self.ids.clear();

        // The root id is allocated before any section renders, so a
        // section sharing the document's name gets a suffix.
        let id = self
            .ids
            .allocate(doc.id.as_deref(), doc.title.as_deref())
            .or_else(|| self.file_stem.map(str::to_string))
            .unwrap_or_else(|| "topic".to_string());

        let body = self.blocks(&doc.blocks)?;
        let content = self.topic(&id, doc.title.as_deref(), &body);

        if self.sections.root_has_children() {
            let map_name = format!("dm-{}.ditamap", self.file_stem.unwrap_or(&id));
            let map = self.map_document(&id, doc.title.as_deref());
            self.aggregator.put(map_name.clone(), map);
            self.map_key = Some(map_name);
        }

        self.root_id = Some(id);
        Ok(content)
    }

    fn blocks(&mut self, blocks: &[Block]) -> Result<String> {
        let mut out = String::new();
        for block in blocks {
            out.push_str(&self.block(block)?);
        }
        Ok(out)
    }

    /// Dispatch over block sub-kinds. Exhaustive; kinds without a rule
    /// arrive as [`Block::Unknown`] and fail the document.
    fn block(&mut self, block: &Block) -> Result<String> {
        match block {
            Block::Section(section) => self.section(section),
            Block::Listing { text } => Ok(format!("<codeblock>{}</codeblock>\n", escape_xml(text))),
            Block::Paragraph { spans, blocks } => {
                if !blocks.is_empty() {
                    return self.blocks(blocks);
                }
                let content = self.spans(spans);
                if self.in_table {
                    Ok(content)
                } else {
                    Ok(format!("<p>{content}</p>\n"))
                }
            }
            Block::Preamble { blocks } => {
                let children = self.blocks(blocks)?;
                if self.options.preamble_as_paragraph {
                    // Preamble children are block-level already; the
                    // paragraph rule passes compound content through.
                    Ok(children)
                } else {
                    Ok(format!("<abstract>{children}</abstract>\n"))
                }
            }
            Block::Image { alt: _, path, id } => self.image(path.as_deref(), id.as_deref()),
            Block::Admonition { label, text } => Ok(format!(
                "<note type=\"{}\">{}</note>\n",
                note_type(label),
                escape_xml(text)
            )),
            Block::Passthrough { text } => Ok(text.clone()),
            Block::Quote { blocks } => Ok(format!("<lq>{}</lq>", self.blocks(blocks)?)),
            Block::List(list) => {
                let items: Vec<String> = list
                    .items
                    .iter()
                    .map(|item| format!("<li>{}</li>", escape_xml(item)))
                    .collect();
                Ok(format!("<ul>\n{}</ul>\n", join_lines(&items)))
            }
            Block::DescriptionList(list) => {
                let items: Vec<String> = list
                    .items
                    .iter()
                    .map(|entry| {
                        format!(
                            "<li>{}: {}</li>",
                            escape_xml(&entry.description),
                            escape_xml(&entry.terms.join(". "))
                        )
                    })
                    .collect();
                Ok(format!("<ul>\n{}</ul>\n", join_lines(&items)))
            }
            Block::Table(table) => self.table(table),
            Block::Unknown { context } => Err(Error::UnsupportedNode(context.clone())),
        }
    }

    /// Section decomposition: render inline (as `section` at the top
    /// level, `sectiondiv` when nested) and additionally emit the
    /// section as its own standalone topic, whatever its depth.
    fn section(&mut self, section: &Section) -> Result<String> {
        let id = self
            .ids
            .allocate(section.id.as_deref(), section.title.as_deref());

        let was_in_section = self.in_section;
        self.in_section = true;
        if let Some(id) = &id {
            self.sections.enter(id.clone(), section.title.clone());
        }
        let body = self.blocks(&section.blocks)?;
        self.in_section = was_in_section;

        let (tag, title_markup) = if was_in_section {
            ("sectiondiv", heading(section.title.as_deref(), "b"))
        } else {
            ("section", heading(section.title.as_deref(), "title"))
        };
        let id_attr = id
            .as_deref()
            .map(|id| format!(" id=\"{id}\""))
            .unwrap_or_default();
        let inline = format!("<{tag}{id_attr}>{title_markup}{body}</{tag}>\n");

        if let Some(id) = id {
            let topic = self.topic(&id, section.title.as_deref(), &body);
            self.aggregator.put(format!("c-{id}.dita"), topic);
            self.sections.leave();
        }

        Ok(inline)
    }

    fn image(&mut self, path: Option<&str>, explicit_id: Option<&str>) -> Result<String> {
        let path = path.ok_or(Error::MissingAttribute {
            node: "image",
            attribute: "target",
        })?;
        self.aggregator.add_resource(path);

        let base = path.replace(['/', '.'], "_");
        // Always addressable: the munged path serves as the title slug.
        let id = self
            .ids
            .allocate(explicit_id, Some(base.as_str()))
            .unwrap_or(base);
        Ok(format!(
            "<fig id=\"fig_{id}\"><image href=\"{path}\" id=\"image_{id}\"/></fig>"
        ))
    }

    fn table(&mut self, table: &TableNode) -> Result<String> {
        let was_in_table = self.in_table;
        self.in_table = true;
        let result = self.table_body(table);
        self.in_table = was_in_table;
        result
    }

    fn table_body(&mut self, table: &TableNode) -> Result<String> {
        let mut out = String::from("<simpletable frame=\"all\">");
        out.push_str(&self.rows(&table.header, "sthead")?);
        out.push('\n');
        out.push_str(&self.rows(&table.body, "strow")?);
        out.push('\n');
        out.push_str(&self.rows(&table.footer, "strow")?);
        out.push_str("</simpletable>\n");
        Ok(out)
    }

    /// Render a row group; rows without cells are dropped.
    fn rows(&mut self, rows: &[Row], marker: &str) -> Result<String> {
        let mut rendered = Vec::new();
        for row in rows {
            if row.cells.is_empty() {
                continue;
            }
            let mut line = format!("<{marker}>");
            for cell in &row.cells {
                let content = match cell {
                    Cell::Text { text } => escape_xml(text),
                    Cell::Document(doc) => self.document(doc, RenderMode::Table)?,
                };
                line.push_str("<stentry>");
                line.push_str(&content);
                line.push_str("</stentry>\n");
            }
            line.push_str(&format!("</{marker}>"));
            rendered.push(line);
        }
        Ok(rendered.join("\n"))
    }

    fn spans(&mut self, spans: &[Inline]) -> String {
        spans.iter().map(|span| self.inline(span)).collect()
    }

    fn inline(&self, span: &Inline) -> String {
        match span {
            Inline::Line { text } => escape_xml(text),
            Inline::Monospaced { text } => format!("<codeph>{}</codeph>", escape_xml(text)),
            Inline::Strong { text } => format!("<b>{}</b>", escape_xml(text)),
            Inline::Emphasis { text } => {
                format!("<emphasis role=\"italic\">{}</emphasis>", escape_xml(text))
            }
            Inline::CrossReference {
                target,
                anchor,
                text,
            } => self.xref(target, anchor.as_deref(), text),
            Inline::ExternalLink { url } => {
                format!(
                    "<xref href=\"{url}\" scope=\"external\">{}</xref>",
                    escape_xml(url)
                )
            }
            Inline::Callout { .. } => String::new(),
        }
    }

    /// Resolve a cross-document reference against the aggregator.
    ///
    /// A target that produced a map links to the map file; anything else
    /// links to its topic. On the first batch pass the target may not be
    /// converted yet and the check can be wrong; the second pass renders
    /// with the aggregator fully populated and overwrites the output.
    fn xref(&self, target: &str, anchor: Option<&str>, text: &str) -> String {
        let stem = source_stem(target);
        let map_name = format!("dm-{stem}.ditamap");
        let mut href = if self.aggregator.exists(&map_name) {
            map_name
        } else {
            format!("c-{stem}.dita")
        };
        if let Some(anchor) = anchor {
            href.push('#');
            href.push_str(anchor);
        }
        format!("<xref href=\"{href}\">{}</xref>", escape_xml(text))
    }

    /// Wrap rendered body content in a standalone concept topic.
    fn topic(&self, id: &str, title: Option<&str>, body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE concept PUBLIC \"-//OASIS//DTD DITA Concept//EN\" \"concept.dtd\">\n\
             <concept id=\"{id}\" xml:lang=\"{lang}\"><title>{title}</title>\
             <conbody>{body}</conbody></concept>",
            lang = self.options.lang,
            title = escape_xml(title.unwrap_or(id)),
            body = sanitize(body.trim_end()),
        )
    }

    /// Synthesize the map document: a nested topicref per visited
    /// section, in tree order, leaf references self-closing.
    fn map_document(&self, id: &str, title: Option<&str>) -> String {
        let mut out = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <!DOCTYPE map PUBLIC \"-//OASIS//DTD DITA Map//EN\" \"map.dtd\">\n",
        );
        out.push_str(&format!(
            "<map id=\"{id}\" xml:lang=\"{}\"><title>{}</title>\n",
            self.options.lang,
            escape_xml(title.unwrap_or(id))
        ));
        if let Some(root) = self.sections.root_index() {
            self.topicref(root, &mut out);
        }
        out.push_str("</map>");
        out
    }

    fn topicref(&self, index: usize, out: &mut String) {
        let node = self.sections.node(index);
        let children = self.sections.children(index);
        if children.is_empty() {
            out.push_str(&format!("<topicref href=\"c-{}.dita\"/>\n", node.id));
        } else {
            out.push_str(&format!("<topicref href=\"c-{}.dita\">\n", node.id));
            for &child in children {
                self.topicref(child, out);
            }
            out.push_str("</topicref>\n");
        }
    }
}

/// `<li>` items joined on their own lines inside a list wrapper.
fn join_lines(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("{}\n", items.join("\n"))
    }
}

fn heading(title: Option<&str>, tag: &str) -> String {
    title
        .map(|title| format!("<{tag}>{}</{tag}>\n", escape_xml(title)))
        .unwrap_or_default()
}

/// File stem of a cross-reference target, with any source markup
/// extension stripped.
fn source_stem(target: &str) -> &str {
    for ext in [".adoc", ".asciidoc", ".ad"] {
        if let Some(stem) = target.strip_suffix(ext) {
            return stem;
        }
    }
    target
}

fn note_type(label: &str) -> &'static str {
    match label.to_ascii_lowercase().as_str() {
        "tip" => "tip",
        "warning" => "warning",
        _ => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DescriptionEntry, DescriptionListNode, ListNode};

    fn paragraph(text: &str) -> Block {
        Block::Paragraph {
            spans: vec![Inline::Line {
                text: text.to_string(),
            }],
            blocks: Vec::new(),
        }
    }

    fn titled_section(title: &str, blocks: Vec<Block>) -> Block {
        Block::Section(Section {
            title: Some(title.to_string()),
            id: None,
            blocks,
        })
    }

    fn convert(tree: &DocumentTree) -> (Aggregator, Conversion) {
        let mut aggregator = Aggregator::new();
        let conversion =
            convert_document(&mut aggregator, tree, None, &RenderOptions::default()).unwrap();
        (aggregator, conversion)
    }

    #[test]
    fn test_flat_document_single_topic() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![paragraph("hello")],
        };
        let (aggregator, conversion) = convert(&tree);

        assert_eq!(conversion.id, "Doc");
        assert_eq!(conversion.map_key, None);
        assert!(
            conversion
                .content
                .contains("<conbody><p>hello</p></conbody>")
        );
        assert!(conversion.content.contains("<concept id=\"Doc\""));
        assert!(conversion.content.contains("xml:lang=\"en\""));
        // The renderer itself persists nothing for a flat document.
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_two_sections_produce_map_and_topics() {
        let tree = DocumentTree {
            title: Some("Guide".to_string()),
            id: None,
            blocks: vec![
                titled_section("A", vec![paragraph("first")]),
                titled_section("B", vec![paragraph("second")]),
            ],
        };
        let mut aggregator = Aggregator::new();
        let conversion = convert_document(
            &mut aggregator,
            &tree,
            Some("guide"),
            &RenderOptions::default(),
        )
        .unwrap();

        assert_eq!(conversion.map_key.as_deref(), Some("dm-guide.ditamap"));
        assert!(aggregator.exists("c-A.dita"));
        assert!(aggregator.exists("c-B.dita"));

        let map = aggregator.get("dm-guide.ditamap").unwrap();
        assert!(map.contains("<map id=\"Guide\""));
        assert!(map.contains("<topicref href=\"c-A.dita\">"));
        assert!(map.contains("<topicref href=\"c-B.dita\"/>"));

        let topic_a = aggregator.get("c-A.dita").unwrap();
        assert!(topic_a.contains("<title>A</title>"));
        assert!(topic_a.contains("<conbody><p>first</p></conbody>"));
    }

    #[test]
    fn test_single_section_no_map() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![titled_section("Only", vec![paragraph("body")])],
        };
        let (aggregator, conversion) = convert(&tree);

        assert_eq!(conversion.map_key, None);
        // The section still gets its own standalone topic.
        assert!(aggregator.exists("c-Only.dita"));
        assert!(conversion.content.contains("<section id=\"Only\">"));
        assert!(conversion.content.contains("<title>Only</title>"));
    }

    #[test]
    fn test_nested_section_renders_sectiondiv() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![titled_section(
                "Outer",
                vec![paragraph("intro"), titled_section("Inner", vec![paragraph("deep")])],
            )],
        };
        let (aggregator, conversion) = convert(&tree);

        assert!(conversion.content.contains("<section id=\"Outer\">"));
        assert!(conversion.content.contains("<sectiondiv id=\"Inner\"><b>Inner</b>"));
        // Nested sections are topics in their own right too.
        assert!(aggregator.exists("c-Inner.dita"));
        assert_eq!(conversion.map_key.as_deref(), Some("dm-Doc.ditamap"));
    }

    #[test]
    fn test_sibling_title_collision_suffixes() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![
                titled_section("Overview", vec![paragraph("one")]),
                titled_section("Overview", vec![paragraph("two")]),
            ],
        };
        let (aggregator, _) = convert(&tree);
        assert!(aggregator.exists("c-Overview.dita"));
        assert!(aggregator.exists("c-Overview1.dita"));
    }

    #[test]
    fn test_untitled_section_renders_inline_only() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Section(Section {
                title: None,
                id: None,
                blocks: vec![paragraph("anonymous")],
            })],
        };
        let (aggregator, conversion) = convert(&tree);
        assert!(conversion.content.contains("<section><p>anonymous</p>"));
        assert!(aggregator.is_empty());
    }

    #[test]
    fn test_table_cell_document_recursion() {
        let embedded = DocumentTree {
            title: None,
            id: None,
            blocks: vec![Block::Paragraph {
                spans: vec![Inline::Strong {
                    text: "bold".to_string(),
                }],
                blocks: Vec::new(),
            }],
        };
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Table(TableNode {
                header: Vec::new(),
                body: vec![Row {
                    cells: vec![Cell::Document(embedded)],
                }],
                footer: Vec::new(),
            })],
        };
        let (_, conversion) = convert(&tree);
        // Cell content carries the inline markup with no paragraph wrapper.
        assert!(conversion.content.contains("<stentry><b>bold</b></stentry>"));
        assert!(!conversion.content.contains("<stentry><p>"));
    }

    #[test]
    fn test_table_rows_and_escaping() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Table(TableNode {
                header: vec![Row {
                    cells: vec![Cell::Text {
                        text: "a & b".to_string(),
                    }],
                }],
                body: vec![
                    Row {
                        cells: vec![Cell::Text {
                            text: "<x>".to_string(),
                        }],
                    },
                    Row { cells: Vec::new() },
                ],
                footer: Vec::new(),
            })],
        };
        let (_, conversion) = convert(&tree);
        assert!(conversion.content.contains("<simpletable frame=\"all\">"));
        assert!(conversion.content.contains("<sthead><stentry>a &amp; b</stentry>"));
        assert!(conversion.content.contains("<strow><stentry>&lt;x&gt;</stentry>"));
    }

    #[test]
    fn test_image_records_resource() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Image {
                alt: Some("diagram".to_string()),
                path: Some("img/arch.png".to_string()),
                id: None,
            }],
        };
        let (aggregator, conversion) = convert(&tree);
        assert!(conversion.content.contains("<fig id=\"fig_img_arch_png\">"));
        assert!(
            conversion
                .content
                .contains("<image href=\"img/arch.png\" id=\"image_img_arch_png\"/>")
        );
        assert_eq!(
            aggregator.resources().collect::<Vec<_>>(),
            vec!["img/arch.png"]
        );
    }

    #[test]
    fn test_image_without_path_fails() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Image {
                alt: None,
                path: None,
                id: None,
            }],
        };
        let mut aggregator = Aggregator::new();
        let err = convert_document(&mut aggregator, &tree, None, &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingAttribute {
                node: "image",
                attribute: "target"
            }
        ));
    }

    #[test]
    fn test_unknown_block_fails_with_kind() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Unknown {
                context: "sidebar".to_string(),
            }],
        };
        let mut aggregator = Aggregator::new();
        let err = convert_document(&mut aggregator, &tree, None, &RenderOptions::default())
            .unwrap_err();
        match err {
            Error::UnsupportedNode(kind) => assert_eq!(kind, "sidebar"),
            other => panic!("expected UnsupportedNode, got {other:?}"),
        }
    }

    #[test]
    fn test_admonition_note_types() {
        for (label, expected) in [
            ("Note", "note"),
            ("TIP", "tip"),
            ("warning", "warning"),
            ("Caution", "note"),
        ] {
            let tree = DocumentTree {
                title: Some("Doc".to_string()),
                id: None,
                blocks: vec![Block::Admonition {
                    label: label.to_string(),
                    text: "careful".to_string(),
                }],
            };
            let (_, conversion) = convert(&tree);
            assert!(
                conversion
                    .content
                    .contains(&format!("<note type=\"{expected}\">careful</note>")),
                "label {label} should map to {expected}"
            );
        }
    }

    #[test]
    fn test_lists() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![
                Block::List(ListNode {
                    items: vec!["one".to_string(), "two & three".to_string()],
                }),
                Block::DescriptionList(DescriptionListNode {
                    items: vec![DescriptionEntry {
                        terms: vec!["term".to_string()],
                        description: "meaning".to_string(),
                    }],
                }),
            ],
        };
        let (_, conversion) = convert(&tree);
        assert!(
            conversion
                .content
                .contains("<ul>\n<li>one</li>\n<li>two &amp; three</li>\n</ul>")
        );
        assert!(conversion.content.contains("<li>meaning: term</li>"));
    }

    #[test]
    fn test_inline_spans() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Paragraph {
                spans: vec![
                    Inline::Line {
                        text: "see ".to_string(),
                    },
                    Inline::Monospaced {
                        text: "x < 1".to_string(),
                    },
                    Inline::Emphasis {
                        text: "really".to_string(),
                    },
                    Inline::ExternalLink {
                        url: "https://example.com".to_string(),
                    },
                    Inline::Callout {
                        text: "1".to_string(),
                    },
                ],
                blocks: Vec::new(),
            }],
        };
        let (_, conversion) = convert(&tree);
        assert!(conversion.content.contains("<codeph>x &lt; 1</codeph>"));
        assert!(
            conversion
                .content
                .contains("<emphasis role=\"italic\">really</emphasis>")
        );
        assert!(conversion.content.contains(
            "<xref href=\"https://example.com\" scope=\"external\">https://example.com</xref>"
        ));
        // Callouts render as nothing.
        assert!(!conversion.content.contains("1</p>"));
    }

    #[test]
    fn test_xref_topic_vs_map() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Paragraph {
                spans: vec![Inline::CrossReference {
                    target: "other.adoc".to_string(),
                    anchor: Some("details".to_string()),
                    text: "see other".to_string(),
                }],
                blocks: Vec::new(),
            }],
        };

        // Unknown target resolves to a plain topic reference.
        let (_, conversion) = convert(&tree);
        assert!(
            conversion
                .content
                .contains("<xref href=\"c-other.dita#details\">see other</xref>")
        );

        // Once the aggregator knows the target's map, the href flips.
        let mut aggregator = Aggregator::new();
        aggregator.put("dm-other.ditamap", String::new());
        let conversion =
            convert_document(&mut aggregator, &tree, None, &RenderOptions::default()).unwrap();
        assert!(
            conversion
                .content
                .contains("<xref href=\"dm-other.ditamap#details\">see other</xref>")
        );
    }

    #[test]
    fn test_sanitize_strips_unresolved_references() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![Block::Passthrough {
                text: "see <<legacy-anchor>>".to_string(),
            }],
        };
        let (_, conversion) = convert(&tree);
        assert!(conversion.content.contains("see legacy-anchor"));
        assert!(!conversion.content.contains("<<"));
    }

    #[test]
    fn test_quote_listing_and_abstract_preamble() {
        let tree = DocumentTree {
            title: Some("Doc".to_string()),
            id: None,
            blocks: vec![
                Block::Preamble {
                    blocks: vec![paragraph("lead-in")],
                },
                Block::Quote {
                    blocks: vec![paragraph("quoted")],
                },
                Block::Listing {
                    text: "if a < b {}".to_string(),
                },
            ],
        };
        let options = RenderOptions {
            preamble_as_paragraph: false,
            ..RenderOptions::default()
        };
        let mut aggregator = Aggregator::new();
        let conversion = convert_document(&mut aggregator, &tree, None, &options).unwrap();
        assert!(
            conversion
                .content
                .contains("<abstract><p>lead-in</p>\n</abstract>")
        );
        assert!(conversion.content.contains("<lq><p>quoted</p>\n</lq>"));
        assert!(
            conversion
                .content
                .contains("<codeblock>if a &lt; b {}</codeblock>")
        );
    }
}
