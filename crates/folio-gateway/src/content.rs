// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Portfolio content documents served by the read-only routes.
//!
//! Each section ships as embedded JSON and may be overridden by a
//! `<section>.json` file in the configured content directory.

use std::path::Path;

use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::{debug, info, warn};

use folio_core::FolioError;

/// A read-only portfolio section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Section {
    About,
    Experience,
    Projects,
    Skills,
    Achievements,
}

impl Section {
    /// Route path of the section, e.g. `/api/about`.
    pub fn path(self) -> String {
        format!("/api/{self}")
    }

    fn embedded(self) -> &'static str {
        match self {
            Self::About => include_str!("../content/about.json"),
            Self::Experience => include_str!("../content/experience.json"),
            Self::Projects => include_str!("../content/projects.json"),
            Self::Skills => include_str!("../content/skills.json"),
            Self::Achievements => include_str!("../content/achievements.json"),
        }
    }
}

/// One parsed document per [`Section`].
#[derive(Debug, Clone)]
pub struct PortfolioContent {
    documents: Vec<(Section, Value)>,
}

impl PortfolioContent {
    /// The built-in documents.
    pub fn embedded() -> Result<Self, FolioError> {
        let documents = Section::iter()
            .map(|section| {
                serde_json::from_str(section.embedded())
                    .map(|doc| (section, doc))
                    .map_err(|e| {
                        FolioError::Internal(format!("embedded {section} document is invalid: {e}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { documents })
    }

    /// The built-in documents, with per-section overrides read from `dir`.
    ///
    /// Missing override files are skipped. Unreadable or invalid ones are
    /// logged and the embedded document is kept.
    pub fn load(dir: Option<&Path>) -> Result<Self, FolioError> {
        let mut content = Self::embedded()?;
        let Some(dir) = dir else {
            return Ok(content);
        };

        for (section, document) in &mut content.documents {
            let path = dir.join(format!("{section}.json"));
            if !path.is_file() {
                debug!(path = %path.display(), "no content override");
                continue;
            }
            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));
            match parsed {
                Ok(value) => {
                    info!(section = %section, path = %path.display(), "content override loaded");
                    *document = value;
                }
                Err(e) => {
                    warn!(section = %section, path = %path.display(), error = %e, "ignoring invalid content override");
                }
            }
        }
        Ok(content)
    }

    pub fn get(&self, section: Section) -> &Value {
        self.documents
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, doc)| doc)
            .unwrap_or(&Value::Null)
    }
}
