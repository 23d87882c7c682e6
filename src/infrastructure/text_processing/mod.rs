mod page_pass_through_parser;
mod pdf_adapter;
mod recursive_character_splitter;
mod sliding_window_splitter;
mod text_normalizer;
mod text_splitter_factory;

pub use page_pass_through_parser::PagePassThroughParser;
pub use pdf_adapter::PdfAdapter;
pub use recursive_character_splitter::RecursiveCharacterSplitter;
pub use sliding_window_splitter::SlidingWindowSplitter;
pub use text_normalizer::normalize_text;
pub use text_splitter_factory::TextSplitterFactory;
