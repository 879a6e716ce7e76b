use crate::traits::Serializer;
use taskboard_core::{BoardError, BoardResult};

/// JSON serializer for domain models
pub struct JsonSerializer;

impl<T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync> Serializer<T>
    for JsonSerializer
{
    fn serialize(&self, data: &T) -> BoardResult<Vec<u8>> {
        let json =
            serde_json::to_vec(data).map_err(|e| BoardError::Serialization(e.to_string()))?;
        Ok(json)
    }

    fn deserialize(&self, bytes: &[u8]) -> BoardResult<T> {
        let data =
            serde_json::from_slice(bytes).map_err(|e| BoardError::Serialization(e.to_string()))?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct ColumnOrder {
        ids: Vec<u32>,
    }

    #[test]
    fn test_compact_output() {
        let serializer = JsonSerializer;
        let bytes = serializer.serialize(&vec![3u32, 1, 2]).unwrap();
        assert_eq!(bytes, b"[3,1,2]");
    }

    #[test]
    fn test_malformed_input_is_serialization_error() {
        let serializer = JsonSerializer;
        let result: BoardResult<ColumnOrder> = serializer.deserialize(b"{\"ids\": [1,");
        assert!(matches!(result, Err(BoardError::Serialization(_))));
    }
}
