//! Static course content, keyed by course name
//!
//! The table is loaded once at startup (built-in JSON or a file from
//! `CONTENT_PATH`) and never written afterwards. Course names are the join
//! key with the `courses` table; a course may exist in one and not the other.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::error::{AppError, AppResult};

const BUILTIN_CONTENT: &str = include_str!("../data/course_content.json");

/// One display unit of a course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// HTML markup shown to the reader
    pub text: String,
    /// Optional media reference attached to the section
    #[serde(default)]
    pub media: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CourseContent {
    name: String,
    sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    courses: Vec<CourseContent>,
}

/// Immutable mapping from course name to its ordered sections.
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    courses: HashMap<String, Vec<Section>>,
}

impl ContentRepository {
    /// Builds a repository from `(name, sections)` pairs.
    ///
    /// Rejects empty section lists and duplicate names: a course without
    /// sections could never hold a valid cursor position.
    pub fn from_courses<I>(courses: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, Vec<Section>)>,
    {
        let mut map = HashMap::new();
        for (name, sections) in courses {
            if sections.is_empty() {
                return Err(AppError::Content(format!("course '{}' has no sections", name)));
            }
            if map.insert(name.clone(), sections).is_some() {
                return Err(AppError::Content(format!("course '{}' is defined twice", name)));
            }
        }
        Ok(Self { courses: map })
    }

    /// Parses the JSON content format: `{"courses": [{"name", "sections": [{"text", "media"?}]}]}`.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: ContentFile = serde_json::from_str(json)?;
        Self::from_courses(file.courses.into_iter().map(|c| (c.name, c.sections)))
    }

    /// The content table compiled into the binary.
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CONTENT)
    }

    /// Loads content from `path`, or the built-in table when `path` is `None`.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)?;
                let repo = Self::from_json(&json)?;
                log::info!("Loaded content for {} course(s) from {}", repo.len(), path.display());
                Ok(repo)
            }
            None => Self::builtin(),
        }
    }

    /// Ordered sections of a course, or `NotFound` when the course has no content.
    pub fn get_sections(&self, course_name: &str) -> AppResult<&[Section]> {
        self.courses
            .get(course_name)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::NotFound(course_name.to_string()))
    }

    pub fn contains(&self, course_name: &str) -> bool {
        self.courses.contains_key(course_name)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
