use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DescriptorError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, DescriptorError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| DescriptorError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Same as [`from_str_with_path`], for descriptors embedded in an already-parsed document.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, DescriptorError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| DescriptorError::Decode {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}
