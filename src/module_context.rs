use crate::finalize::Schema;
use crate::naming::module_name_to_file_path;
use crate::render::render;
use serde::Serialize;
use std::path::PathBuf;

const PRAGMAS: &[&str] = &["DeriveGeneric", "DuplicateRecordFields", "OverloadedStrings"];

const IMPORTS: &[&str] = &[
    "import Control.Monad (mzero)",
    "import Data.Aeson",
    "import Data.Text (Text)",
    "import GHC.Generics (Generic)",
];

/// Everything a writer needs to emit one generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleContext {
    pub module_name: String,

    /// Record names only; aliases are not declared types.
    pub declared_names: Vec<String>,
    pub type_texts: Vec<String>,
    pub decoder_texts: Vec<String>,
}

impl ModuleContext {
    /// Renders every declaration of `schema`, in discovery order.
    pub fn new(module_name: impl Into<String>, schema: &Schema) -> Self {
        let mut type_texts = Vec::new();
        let mut decoder_texts = Vec::new();

        for decl in schema.declarations() {
            let rendered = render(decl);
            type_texts.push(rendered.type_text);
            decoder_texts.extend(rendered.decoder_text);
        }

        Self {
            module_name: module_name.into(),
            declared_names: schema
                .declared_names()
                .into_iter()
                .map(String::from)
                .collect(),
            type_texts,
            decoder_texts,
        }
    }

    /// Relative path of the module's source file.
    pub fn file_path(&self) -> PathBuf {
        module_name_to_file_path(&self.module_name)
    }

    /// Assembles the complete module source.
    pub fn to_source(&self) -> String {
        let width = PRAGMAS.iter().map(|p| p.len()).max().unwrap_or(0);

        let mut sections = vec![
            PRAGMAS
                .iter()
                .map(|pragma| format!("{{-# LANGUAGE {:<width$} #-}}", pragma, width = width))
                .collect::<Vec<_>>()
                .join("\n"),
            format!("module {} where", self.module_name),
            IMPORTS.join("\n"),
        ];

        sections.extend(self.type_texts.iter().cloned());
        sections.extend(self.decoder_texts.iter().cloned());

        let mut source = sections.join("\n\n");
        source.push('\n');
        source
    }
}
