pub mod error;
pub mod traits;
pub mod types;

pub use error::{ProviderError, UnknownProviderError};
pub use traits::ImageTextProvider;
pub use types::{
    CompletionRequest, CompletionResponse, ProcessImageResponse, ProviderKind, UploadRequest,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_TEMPERATURE,
};
