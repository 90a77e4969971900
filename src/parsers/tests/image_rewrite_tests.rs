use crate::parsers::images::{ImageRewriter, rewrite_images};

#[cfg(test)]
mod rewrite_tests {
    use super::*;

    #[test]
    fn test_relative_source_gets_base() {
        let result = rewrite_images(r#"<p><img src="/Foo.png"></p>"#, "https://wiki.example/");
        assert_eq!(result.html, r#"<p><img src="https://wiki.example/Foo.png"></p>"#);
        assert_eq!(result.image_urls, vec!["https://wiki.example/Foo.png"]);
    }

    #[test]
    fn test_absolute_source_unchanged() {
        let result = rewrite_images(
            r#"<img src="https://cdn.example/x.png">"#,
            "https://wiki.example/",
        );
        assert_eq!(result.html, r#"<img src="https://cdn.example/x.png">"#);
        assert_eq!(result.image_urls, vec!["https://cdn.example/x.png"]);
    }

    #[test]
    fn test_other_attributes_dropped() {
        let html = r#"<img alt="Parsnip" src="/images/Parsnip.png" width="24" height="24" srcset="/a.png 2x">"#;
        let result = rewrite_images(html, "https://wiki.example");
        assert_eq!(
            result.html,
            r#"<img src="https://wiki.example/images/Parsnip.png">"#
        );
    }

    #[test]
    fn test_asset_prefix_resolves_from_site_root() {
        let rewriter = ImageRewriter::new("https://wiki.example/wiki/").with_asset_prefix("/mediawiki/");
        assert_eq!(
            rewriter.resolve("/mediawiki/images/a/ab/Parsnip.png"),
            "https://wiki.example/mediawiki/images/a/ab/Parsnip.png"
        );
        assert_eq!(
            rewriter.resolve("/Other.png"),
            "https://wiki.example/wiki/Other.png"
        );
    }

    #[test]
    fn test_own_domain_and_protocol_relative() {
        let rewriter = ImageRewriter::new("https://wiki.example/");
        assert_eq!(
            rewriter.resolve("wiki.example/Foo.png"),
            "wiki.example/Foo.png"
        );
        assert_eq!(
            rewriter.resolve("//upload.example/Foo.png"),
            "https://upload.example/Foo.png"
        );
    }

    #[test]
    fn test_urls_collected_in_order() {
        let html = r#"<img src="/a.png"><span>x</span><img class="icon" src="b.png"><img src="/c.png">"#;
        let result = rewrite_images(html, "https://wiki.example/");
        assert_eq!(
            result.image_urls,
            vec![
                "https://wiki.example/a.png",
                "https://wiki.example/b.png",
                "https://wiki.example/c.png",
            ]
        );
    }

    #[test]
    fn test_no_images() {
        let result = rewrite_images("<p>No pictures</p><img alt=\"broken\">", "https://wiki.example/");
        assert_eq!(result.html, "<p>No pictures</p><img alt=\"broken\">");
        assert!(result.image_urls.is_empty());
    }
}
