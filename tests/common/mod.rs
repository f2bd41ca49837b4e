#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

use textnorm::data::{ColumnType, Value};
use textnorm::frame::{Column, DataFrame};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }
}

/// Small commercial-style frame shared by the integration suites.
pub fn sales_frame() -> DataFrame {
    DataFrame::new(vec![
        Column::from_strings("empresa", &["MATRIZ SC", "Filial  RJ", "MATRIZ SC"]),
        Column::from_strings("municipio", &["São Paulo", "Rio de Janeiro", "Florianópolis"]),
        Column::from_strings("uf", &["SP", "RJ", "SC"]),
        Column::new(
            "faturamento",
            ColumnType::Float,
            vec![
                Some(Value::Float(1250.0)),
                Some(Value::Float(980.5)),
                Some(Value::Float(2210.75)),
            ],
        ),
    ])
    .expect("sales frame")
}

/// Alias YAML matching `sales_frame`, declaration order significant.
pub const SALES_ALIASES: &str = r#"
- column: empresa
  groups:
    - canonical: Matriz SC
      aliases: ["MATRIZ SC", "matriz"]
- column: municipio
  groups:
    - canonical: Rio de Janeiro
      aliases: [RJ, Rio]
    - canonical: São Paulo
      aliases: [SP, Sampa]
"#;
