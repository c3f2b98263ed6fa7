#![no_main]
use codemention_core::render::markdown_escape;
use codemention_core::traits::CommentRenderer;
use codemention_core::{CommentConfiguration, MarkdownCommentRenderer, MatchedRule};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Render arbitrary repository templates; errors are fine, panics are not
        let rules = vec![MatchedRule {
            patterns: vec!["a/**".to_string()],
            mentions: vec!["x".to_string(), "y".to_string()],
            matched_files: vec!["a/b".to_string()],
        }];
        let configuration = CommentConfiguration {
            template: Some(s.to_string()),
            ..Default::default()
        };
        if let Ok(comment) = MarkdownCommentRenderer::new().render(&rules, Some(&configuration)) {
            assert!(comment.ends_with(codemention_core::FOOTER));
        }
        let _ = markdown_escape(s);
    }
});
