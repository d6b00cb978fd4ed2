//! Per-session reading position inside a course
//!
//! `NavigationCursor` is a two-state machine: `Inactive` until a course with
//! content is entered, then `Active` with a position that always satisfies
//! `0 <= position < len`. Moves saturate at both ends and report whether the
//! position changed, which lets the router skip redundant re-renders.

use crate::content::{ContentRepository, Section};
use crate::core::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NavigationCursor {
    #[default]
    Inactive,
    Active {
        course_name: String,
        position: usize,
        /// Section count, fixed at `enter` (content never changes at runtime)
        len: usize,
    },
}

/// Result of a paging move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved { from: usize, to: usize },
    /// Already at the boundary
    Unchanged,
}

impl Step {
    pub fn changed(self) -> bool {
        matches!(self, Step::Moved { .. })
    }
}

impl NavigationCursor {
    /// Opens `course_name` at section 0.
    ///
    /// Fails with `NotFound` when the course has no content; the cursor is
    /// then left `Inactive`.
    pub fn enter(&mut self, content: &ContentRepository, course_name: &str) -> AppResult<()> {
        match content.get_sections(course_name) {
            Ok(sections) => {
                *self = NavigationCursor::Active {
                    course_name: course_name.to_string(),
                    position: 0,
                    len: sections.len(),
                };
                Ok(())
            }
            Err(e) => {
                *self = NavigationCursor::Inactive;
                Err(e)
            }
        }
    }

    /// Moves one section forward, saturating at the last one.
    pub fn advance(&mut self) -> AppResult<Step> {
        match self {
            NavigationCursor::Active { position, len, .. } => {
                let from = *position;
                let to = (from + 1).min(len.saturating_sub(1));
                Ok(Self::apply(position, from, to))
            }
            NavigationCursor::Inactive => Err(AppError::NoActiveCourse),
        }
    }

    /// Moves one section back, saturating at 0.
    pub fn retreat(&mut self) -> AppResult<Step> {
        match self {
            NavigationCursor::Active { position, .. } => {
                let from = *position;
                let to = from.saturating_sub(1);
                Ok(Self::apply(position, from, to))
            }
            NavigationCursor::Inactive => Err(AppError::NoActiveCourse),
        }
    }

    fn apply(position: &mut usize, from: usize, to: usize) -> Step {
        if from == to {
            Step::Unchanged
        } else {
            *position = to;
            Step::Moved { from, to }
        }
    }

    /// Leaves the course and returns its name.
    pub fn exit(&mut self) -> AppResult<String> {
        match std::mem::take(self) {
            NavigationCursor::Active { course_name, .. } => Ok(course_name),
            NavigationCursor::Inactive => Err(AppError::NoActiveCourse),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, NavigationCursor::Active { .. })
    }

    pub fn course_name(&self) -> Option<&str> {
        match self {
            NavigationCursor::Active { course_name, .. } => Some(course_name),
            NavigationCursor::Inactive => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            NavigationCursor::Active { position, .. } => Some(*position),
            NavigationCursor::Inactive => None,
        }
    }

    /// The section under the cursor.
    pub fn current_section<'a>(&self, content: &'a ContentRepository) -> AppResult<&'a Section> {
        match self {
            NavigationCursor::Active {
                course_name, position, ..
            } => content
                .get_sections(course_name)?
                .get(*position)
                .ok_or_else(|| AppError::NotFound(format!("{} section {}", course_name, position))),
            NavigationCursor::Inactive => Err(AppError::NoActiveCourse),
        }
    }
}

/// Conversation state of one chat.
///
/// Held in the per-chat dialogue storage; a chat without stored state gets
/// `Session::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub cursor: NavigationCursor,
    /// Course picked from the menu, used by the "start now" button
    pub selected_course: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repo(sections: usize) -> ContentRepository {
        let sections = (0..sections)
            .map(|i| Section {
                text: format!("section {}", i),
                media: None,
            })
            .collect();
        ContentRepository::from_courses(vec![("Go".to_string(), sections)]).unwrap()
    }

    #[test]
    fn test_enter_starts_at_zero() {
        let content = repo(3);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();

        assert_eq!(cursor.course_name(), Some("Go"));
        assert_eq!(cursor.position(), Some(0));
        assert_eq!(cursor.current_section(&content).unwrap().text, "section 0");
    }

    #[test]
    fn test_enter_unknown_course_stays_inactive() {
        let content = repo(3);
        let mut cursor = NavigationCursor::default();

        let result = cursor.enter(&content, "Rust");
        assert!(matches!(result, Err(AppError::NotFound(_))));
        assert_eq!(cursor, NavigationCursor::Inactive);
    }

    #[test]
    fn test_failed_enter_resets_cursor() {
        let content = repo(3);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();

        assert!(cursor.enter(&content, "Rust").is_err());
        assert!(!cursor.is_active());
    }

    #[test]
    fn test_advance_saturates_at_last_section() {
        for len in 1..=5 {
            let content = repo(len);
            let mut cursor = NavigationCursor::default();
            cursor.enter(&content, "Go").unwrap();

            for _ in 0..len + 3 {
                cursor.advance().unwrap();
            }
            assert_eq!(cursor.position(), Some(len - 1));
        }
    }

    #[test]
    fn test_retreat_saturates_at_zero() {
        let content = repo(4);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();

        for _ in 0..3 {
            assert_eq!(cursor.retreat().unwrap(), Step::Unchanged);
        }
        assert_eq!(cursor.position(), Some(0));
    }

    #[test]
    fn test_steps_report_changes() {
        let content = repo(3);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();

        assert_eq!(cursor.advance().unwrap(), Step::Moved { from: 0, to: 1 });
        assert_eq!(cursor.advance().unwrap(), Step::Moved { from: 1, to: 2 });
        assert!(!cursor.advance().unwrap().changed());
        assert_eq!(cursor.retreat().unwrap(), Step::Moved { from: 2, to: 1 });
    }

    #[test]
    fn test_single_section_course_never_moves() {
        let content = repo(1);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();

        assert_eq!(cursor.advance().unwrap(), Step::Unchanged);
        assert_eq!(cursor.retreat().unwrap(), Step::Unchanged);
    }

    #[test]
    fn test_navigation_while_inactive() {
        let mut cursor = NavigationCursor::default();
        assert!(matches!(cursor.advance(), Err(AppError::NoActiveCourse)));
        assert!(matches!(cursor.retreat(), Err(AppError::NoActiveCourse)));
        assert!(matches!(cursor.exit(), Err(AppError::NoActiveCourse)));
        assert_eq!(cursor, NavigationCursor::Inactive);
    }

    #[test]
    fn test_exit_returns_course_and_resets() {
        let content = repo(2);
        let mut cursor = NavigationCursor::default();
        cursor.enter(&content, "Go").unwrap();
        cursor.advance().unwrap();

        assert_eq!(cursor.exit().unwrap(), "Go");
        assert_eq!(cursor, NavigationCursor::Inactive);
        assert_eq!(cursor.position(), None);
    }
}
