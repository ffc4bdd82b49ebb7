use std::sync::Arc;

use crate::layout::FontSet;
use crate::llm_client::TextGenerator;
use crate::profile::SectionSet;
use crate::render::RenderOptions;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Upstream text generator. `LlmClient` in production.
    pub generator: Arc<dyn TextGenerator>,
    /// Fonts loaded once at startup; a load failure aborts startup.
    pub fonts: Arc<FontSet>,
    /// Labels shared by the analysis prompt and the parser.
    pub sections: Arc<SectionSet>,
    pub render_options: Arc<RenderOptions>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>, fonts: FontSet, sections: SectionSet, compress: bool) -> Self {
        let render_options = RenderOptions::for_sections(&sections, compress);
        Self {
            generator,
            fonts: Arc::new(fonts),
            sections: Arc::new(sections),
            render_options: Arc::new(render_options),
        }
    }
}
