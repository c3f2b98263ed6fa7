//! Handlebars helpers available to comment templates

use super::markdown::markdown_escape;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonRender, Output, RenderContext,
    RenderErrorReason,
};
use serde_json::Value as Json;

/// `{{markdownEscape value}}` writes `value` with Markdown syntax escaped
#[derive(Clone, Copy)]
pub struct MarkdownEscapeHelper;

impl HelperDef for MarkdownEscapeHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("markdownEscape", 0))?;

        let text = match value.value() {
            Json::String(s) => markdown_escape(s),
            other => markdown_escape(&other.render()),
        };
        out.write(&text)?;
        Ok(())
    }
}

pub static MARKDOWN_ESCAPE_HELPER: MarkdownEscapeHelper = MarkdownEscapeHelper;
