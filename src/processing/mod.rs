pub mod date;
pub mod extractors;
pub mod image;
pub mod ocr;
pub mod text;

pub use date::normalize_date;
pub use extractors::FieldExtractor;
pub use self::image::ImageProcessor;
pub use ocr::{TesseractRecognizer, TextRecognizer};
pub use text::clean_lines;
