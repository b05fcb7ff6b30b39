use serde::Deserialize;

use crate::app::Result;
use crate::domain::Doa;

#[derive(Debug, Deserialize)]
struct RawDoa {
    id: serde_json::Value,
    #[serde(default)]
    doa: String,
    #[serde(default)]
    ayat: String,
    #[serde(default)]
    latin: String,
    #[serde(default)]
    artinya: String,
}

impl From<RawDoa> for Doa {
    fn from(raw: RawDoa) -> Self {
        let id = match raw.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Doa {
            id,
            title: raw.doa,
            arabic: raw.ayat,
            latin: raw.latin,
            translation: raw.artinya,
        }
    }
}

/// Mirrors serve either a bare array or the usual `{data: [...]}` wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDoaPayload {
    List(Vec<RawDoa>),
    Wrapped { data: Vec<RawDoa> },
}

pub(super) fn decode(body: &[u8]) -> Result<Vec<Doa>> {
    let payload: RawDoaPayload = serde_json::from_slice(body)?;
    let raw = match payload {
        RawDoaPayload::List(list) => list,
        RawDoaPayload::Wrapped { data } => data,
    };
    Ok(raw.into_iter().map(Doa::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_payload() {
        let body = br#"{"data": [{"id": 7, "doa": "Doa masuk rumah", "ayat": "", "latin": "", "artinya": ""}]}"#;
        let doas = decode(body).unwrap();
        assert_eq!(doas.len(), 1);
        assert_eq!(doas[0].id, "7");
    }
}
