use crate::error::storage::StorageError;

use common::ErrorLocation;

use models::ModelError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Corrupt User Cache: {message} {location}")]
    CorruptCache {
        message: String,
        location: ErrorLocation,
        #[source]
        source: ModelError,
    },

    #[error("User Cache Serialization Error: {message} {location}")]
    CacheSerialize {
        message: String,
        location: ErrorLocation,
    },
}
