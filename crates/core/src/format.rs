use std::fmt;

use crate::error::ImportError;

/// Declared interchange format of an upload, fixed once a load starts.
/// `Gltf` covers both the binary (`.glb`) and JSON (`.gltf`) variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Stl,
    Gltf,
}

impl MeshFormat {
    /// Case-insensitive extension lookup. Anything outside the supported set
    /// fails immediately, before any bytes are touched.
    pub fn from_extension(ext: &str) -> Result<Self, ImportError> {
        let ext = ext.trim().trim_start_matches('.');
        match ext.to_ascii_lowercase().as_str() {
            "obj" => Ok(MeshFormat::Obj),
            "stl" => Ok(MeshFormat::Stl),
            "glb" | "gltf" => Ok(MeshFormat::Gltf),
            _ => Err(ImportError::UnsupportedFormat(ext.to_string())),
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshFormat::Obj => write!(f, "obj"),
            MeshFormat::Stl => write!(f, "stl"),
            MeshFormat::Gltf => write!(f, "gltf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        assert_eq!(MeshFormat::from_extension("OBJ").unwrap(), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_extension(".stl").unwrap(), MeshFormat::Stl);
        assert_eq!(MeshFormat::from_extension("glb").unwrap(), MeshFormat::Gltf);
        assert_eq!(MeshFormat::from_extension("Gltf").unwrap(), MeshFormat::Gltf);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        match MeshFormat::from_extension("fbx") {
            Err(ImportError::UnsupportedFormat(ext)) => assert_eq!(ext, "fbx"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
}
