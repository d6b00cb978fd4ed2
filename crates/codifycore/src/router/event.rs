//! Inbound events and their classification into router actions

use super::labels;

/// Slash commands the gateway recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
}

/// One inbound event from the messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command(BotCommand),
    /// Free text, usually the label of a reply-keyboard button
    TextButton(String),
    /// Data token of an inline-keyboard button
    Callback(String),
}

/// Who sent the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub platform_id: i64,
    pub display_name: Option<String>,
}

impl Sender {
    pub fn new(platform_id: i64, display_name: Option<String>) -> Self {
        Self {
            platform_id,
            display_name,
        }
    }
}

/// In-course paging requested through the inline keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Prev,
    Exit,
}

impl NavAction {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            labels::CALLBACK_NEXT => Some(NavAction::Next),
            labels::CALLBACK_PREV => Some(NavAction::Prev),
            labels::CALLBACK_EXIT => Some(NavAction::Exit),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            NavAction::Next => labels::CALLBACK_NEXT,
            NavAction::Prev => labels::CALLBACK_PREV,
            NavAction::Exit => labels::CALLBACK_EXIT,
        }
    }
}

/// Everything the router can do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Start,
    CoursesMenu,
    Profile,
    About,
    ChooseCourse,
    ContinueLearning,
    BackToCourses,
    BackToMain,
    StartNow,
    NextLesson,
    SelectCourse(String),
    Navigate(NavAction),
    Unrecognized(String),
}

impl Action {
    /// Maps a fixed menu label to its action by exact match.
    pub fn from_label(label: &str) -> Option<Self> {
        let action = match label {
            labels::COURSES => Action::CoursesMenu,
            labels::PROFILE => Action::Profile,
            labels::ABOUT => Action::About,
            labels::CHOOSE_COURSE => Action::ChooseCourse,
            labels::CONTINUE_LEARNING => Action::ContinueLearning,
            labels::BACK_TO_COURSES => Action::BackToCourses,
            labels::BACK_TO_MAIN => Action::BackToMain,
            labels::START_NOW => Action::StartNow,
            labels::NEXT_LESSON => Action::NextLesson,
            _ => return None,
        };
        Some(action)
    }

    /// Classifies an event. `is_course` is consulted only for text that is
    /// not a fixed menu label.
    pub fn classify(event: &InboundEvent, is_course: impl FnOnce(&str) -> bool) -> Self {
        match event {
            InboundEvent::Command(BotCommand::Start) => Action::Start,
            InboundEvent::TextButton(text) => match Action::from_label(text) {
                Some(action) => action,
                None if is_course(text) => Action::SelectCourse(text.clone()),
                None => Action::Unrecognized(text.clone()),
            },
            InboundEvent::Callback(token) => match NavAction::from_token(token) {
                Some(nav) => Action::Navigate(nav),
                None => Action::Unrecognized(token.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(label: &str) -> InboundEvent {
        InboundEvent::TextButton(label.to_string())
    }

    #[test]
    fn test_fixed_labels() {
        assert_eq!(Action::classify(&text(labels::COURSES), |_| false), Action::CoursesMenu);
        assert_eq!(
            Action::classify(&text(labels::CONTINUE_LEARNING), |_| false),
            Action::ContinueLearning
        );
        assert_eq!(Action::classify(&text(labels::START_NOW), |_| false), Action::StartNow);
    }

    #[test]
    fn test_fixed_labels_win_over_course_names() {
        let action = Action::classify(&text(labels::PROFILE), |_| true);
        assert_eq!(action, Action::Profile);
    }

    #[test]
    fn test_course_name_selects_course() {
        let action = Action::classify(&text("Python"), |name| name == "Python");
        assert_eq!(action, Action::SelectCourse("Python".to_string()));
    }

    #[test]
    fn test_match_is_exact() {
        let action = Action::classify(&text("python"), |name| name == "Python");
        assert_eq!(action, Action::Unrecognized("python".to_string()));
        let action = Action::classify(&text(" 📚 Курси"), |_| false);
        assert!(matches!(action, Action::Unrecognized(_)));
    }

    #[test]
    fn test_callbacks() {
        let event = InboundEvent::Callback("next".to_string());
        assert_eq!(Action::classify(&event, |_| false), Action::Navigate(NavAction::Next));
        let event = InboundEvent::Callback("exit_course".to_string());
        assert_eq!(Action::classify(&event, |_| false), Action::Navigate(NavAction::Exit));
        let event = InboundEvent::Callback("mode:settings".to_string());
        assert!(matches!(Action::classify(&event, |_| false), Action::Unrecognized(_)));
    }

    #[test]
    fn test_nav_tokens_roundtrip() {
        for nav in [NavAction::Next, NavAction::Prev, NavAction::Exit] {
            assert_eq!(NavAction::from_token(nav.token()), Some(nav));
        }
    }

    #[test]
    fn test_start_command() {
        let event = InboundEvent::Command(BotCommand::Start);
        assert_eq!(Action::classify(&event, |_| false), Action::Start);
    }
}
