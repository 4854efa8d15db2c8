use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Carousel needs at least one profile")]
    EmptyCarousel,

    #[error("Unknown file category: {0}")]
    UnknownCategory(String),

    #[error("File {file} is not in category {category}")]
    UnknownFile { category: String, file: String },

    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}
