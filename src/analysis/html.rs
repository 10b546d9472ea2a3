// HTML to plain text conversion.
// Extracts visible text, dropping script-like subtrees and normalizing whitespace.

use scraper::{ElementRef, Html, Node};

/// Elements whose contents are never visible text.
const SKIPPED: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that separate words at their boundaries.
const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody",
    "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Convert markup to the text a reader would see, whitespace collapsed.
pub fn html_to_text(markup: &str) -> String {
    let document = Html::parse_document(markup);
    let mut raw = String::with_capacity(markup.len() / 2);
    collect_text(document.root_element(), &mut raw);

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }

    let block = BLOCK.contains(&name);
    if block {
        out.push(' ');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags() {
        let text = html_to_text("<html><body>Some <b>example</b> text</body></html>");
        assert_eq!(text, "Some example text");
    }

    #[test]
    fn test_inline_elements_do_not_split_words() {
        assert_eq!(html_to_text("<p>fo<em>o</em>bar!</p>"), "foobar!");
    }

    #[test]
    fn test_block_elements_separate_words() {
        let text = html_to_text("<div>one</div><div>two</div><ul><li>three</li><li>four</li></ul>");
        assert_eq!(text, "one two three four");
    }

    #[test]
    fn test_skips_scripts_and_styles() {
        let markup = "<html><head><title>Title</title><style>p { color: red }</style>\
                      <script>var x = 1;</script></head><body><p>Body</p>\
                      <noscript>enable js</noscript></body></html>";
        assert_eq!(html_to_text(markup), "Title Body");
    }

    #[test]
    fn test_collapses_whitespace_and_decodes_entities() {
        let text = html_to_text("<p>  a \n\n b&nbsp;&amp; c  </p>");
        assert_eq!(text, "a b & c");
    }

    #[test]
    fn test_plain_text_and_empty_input() {
        assert_eq!(html_to_text("just text"), "just text");
        assert_eq!(html_to_text(""), "");
    }
}
