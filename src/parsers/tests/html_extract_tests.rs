use crate::parsers::html;

#[cfg(test)]
mod extract_tests {
    use super::*;

    #[test]
    fn test_fragment_passes_through() {
        let fragment = "<div class=\"mw-parser-output\"><table class=\"x\"><tr><td>a</td></tr></table></div>";
        assert!(!html::is_full_document(fragment));
        assert_eq!(html::extract_content(fragment), fragment);
    }

    #[test]
    fn test_article_extracted_from_full_page() {
        let page = "<!DOCTYPE html><html><head><title>Calendar</title></head><body>\
                    <nav>Menu</nav><div id=\"mw-content-text\"><div class=\"mw-parser-output\"><p>Spring 1</p></div></div>\
                    </body></html>";
        let content = html::extract_content(page);
        assert_eq!(content, "<p>Spring 1</p>");
    }

    #[test]
    fn test_body_used_without_article() {
        let page = "<html><body><p>Only body</p></body></html>";
        assert_eq!(html::extract_content(page), "<p>Only body</p>");
    }
}
