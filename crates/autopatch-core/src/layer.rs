use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PatchError;

/// A layer identity: GDS layer number and datatype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerSpec {
    pub layer: u16,
    #[serde(default)]
    pub datatype: u16,
}

impl LayerSpec {
    pub fn new(layer: u16, datatype: u16) -> Self {
        Self { layer, datatype }
    }
}

impl fmt::Display for LayerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.layer, self.datatype)
    }
}

impl FromStr for LayerSpec {
    type Err = PatchError;

    /// Parse `"6/0"`, or `"6"` with datatype 0.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PatchError::InvalidConfiguration(format!("invalid layer '{s}'"));
        let s = s.trim();
        let (layer, datatype) = match s.split_once('/') {
            Some((l, d)) => (l.trim(), d.trim()),
            None => (s, "0"),
        };
        let layer = layer.parse::<u16>().map_err(|_| invalid())?;
        let datatype = datatype.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self { layer, datatype })
    }
}

/// Opaque handle to a layer inside a particular host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub(crate) usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layer_with_datatype() {
        let spec: LayerSpec = "6/2".parse().unwrap();
        assert_eq!(spec, LayerSpec::new(6, 2));
        assert_eq!(spec.to_string(), "6/2");
    }

    #[test]
    fn test_parse_layer_defaults_datatype() {
        assert_eq!(" 51 ".parse::<LayerSpec>().unwrap(), LayerSpec::new(51, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<LayerSpec>().is_err());
        assert!("abc".parse::<LayerSpec>().is_err());
        assert!("6/x".parse::<LayerSpec>().is_err());
        assert!("-1".parse::<LayerSpec>().is_err());
        assert!("70000".parse::<LayerSpec>().is_err());
    }

    #[test]
    fn test_deserialize_without_datatype() {
        let spec: LayerSpec = serde_json::from_str(r#"{"layer": 202}"#).unwrap();
        assert_eq!(spec, LayerSpec::new(202, 0));
    }
}
