use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("layout overflow: run needs {needed:.2}pt but a fresh page offers {available:.2}pt")]
    LayoutOverflow { needed: f64, available: f64 },

    #[error("emission failure: {0}")]
    EmissionFailure(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
