//! On-demand services invoked from the dashboard: translation and question answering.

mod language;
mod qa;
mod translate;

pub use language::{find_language, Language, LANGUAGES};
pub use qa::{AiAnswerer, ExtractiveAnswerer, QaService, QuestionAnswerer};
pub use translate::{AiTranslator, GoogleTranslator, TranslationService, Translator};
