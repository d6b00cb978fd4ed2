//! Event dispatch: classify an inbound event, drive the stores and the
//! session cursor, and produce the outbound replies.
//!
//! The router is transport-agnostic. The Telegram layer converts updates into
//! [`InboundEvent`]s and renders the returned [`Reply`] list.

pub mod event;
pub mod labels;
pub mod view;

use std::sync::Arc;

use crate::content::ContentRepository;
use crate::core::error::{AppError, AppResult};
use crate::core::logging::EventLog;
use crate::navigation::{Session, Step};
use crate::storage::{CourseStore, SubscribeOutcome};

pub use event::{Action, BotCommand, InboundEvent, NavAction, Sender};
pub use view::{InlineAction, InlineButton, Keyboard, Markup, Reply};

#[derive(Clone)]
pub struct Router {
    store: CourseStore,
    content: Arc<ContentRepository>,
    events: EventLog,
}

impl Router {
    pub fn new(store: CourseStore, content: Arc<ContentRepository>, events: EventLog) -> Self {
        Self { store, content, events }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn content(&self) -> &ContentRepository {
        &self.content
    }

    /// Classifies `event`; free text is matched against active course names.
    pub fn classify(&self, event: &InboundEvent) -> Action {
        Action::classify(event, |text| {
            self.store.list_active_courses().iter().any(|name| name == text)
        })
    }

    /// Handles one event to completion.
    ///
    /// Never fails: unexpected errors are logged with the sender and answered
    /// with a generic apology.
    pub fn handle(&self, sender: &Sender, session: &mut Session, event: InboundEvent) -> Vec<Reply> {
        let action = self.classify(&event);
        match self.dispatch(sender, session, action) {
            Ok(replies) => replies,
            Err(e) => {
                self.events.error(format!(
                    "Failed to handle {:?} from user {}: {}",
                    event, sender.platform_id, e
                ));
                vec![Reply::text(labels::APOLOGY)]
            }
        }
    }

    fn dispatch(&self, sender: &Sender, session: &mut Session, action: Action) -> AppResult<Vec<Reply>> {
        let user_id = sender.platform_id;
        let replies = match action {
            Action::Start => {
                self.store.register_user(user_id, sender.display_name.as_deref());
                self.events.success(format!(
                    "User started the bot: {} ({})",
                    sender.display_name.as_deref().unwrap_or("-"),
                    user_id
                ));
                vec![Reply::text(labels::WELCOME), view::main_menu()]
            }
            Action::BackToMain => {
                self.events.info(format!("User {} opened the main menu", user_id));
                vec![view::main_menu()]
            }
            Action::CoursesMenu | Action::BackToCourses => {
                self.events.info(format!("User {} opened the courses menu", user_id));
                vec![view::courses_menu()]
            }
            Action::Profile => self.profile(user_id),
            Action::About => {
                self.events.info(format!("User {} opened the about section", user_id));
                vec![view::about()]
            }
            Action::ChooseCourse => self.choose_course(user_id),
            Action::ContinueLearning => self.continue_learning(user_id, session)?,
            Action::SelectCourse(course_name) => self.select_course(sender, session, course_name),
            Action::StartNow => match session.selected_course.clone() {
                Some(course_name) => self.enter_course(user_id, session, &course_name)?,
                None => {
                    self.events
                        .warn(format!("User {} tried to start a course without selecting one", user_id));
                    vec![Reply::text(labels::COURSE_NOT_SELECTED)]
                }
            },
            Action::NextLesson => {
                self.events.info(format!("User {} tried the next-lesson shortcut", user_id));
                vec![Reply::text(labels::NEXT_LESSON_UNAVAILABLE)]
            }
            Action::Navigate(nav) => self.navigate(user_id, session, nav)?,
            Action::Unrecognized(text) => {
                self.events.warn(format!("Unknown command from user {}: {}", user_id, text));
                vec![Reply::text(labels::UNRECOGNIZED)]
            }
        };
        Ok(replies)
    }

    fn profile(&self, user_id: i64) -> Vec<Reply> {
        match self.store.get_user(user_id) {
            Some(user) => {
                self.events.info(format!("User {} viewed their profile", user_id));
                vec![view::profile(user.telegram_id, user.username.as_deref())]
            }
            None => {
                self.events.warn(format!("Profile not found for user {}", user_id));
                vec![Reply::text(labels::PROFILE_NOT_FOUND)]
            }
        }
    }

    fn choose_course(&self, user_id: i64) -> Vec<Reply> {
        let courses = self.store.list_active_courses();
        if courses.is_empty() {
            self.events.warn("No active courses to choose from");
            return vec![Reply::text(labels::NO_COURSES)];
        }
        self.events.info(format!("User {} opened course selection", user_id));
        vec![Reply::with_keyboard(
            labels::CHOOSE_COURSE_PROMPT,
            Keyboard::course_list(&courses),
        )]
    }

    fn continue_learning(&self, user_id: i64, session: &mut Session) -> AppResult<Vec<Reply>> {
        let subscriptions = self.store.list_subscriptions(user_id);
        match subscriptions.as_slice() {
            [] => {
                self.events.info(format!("User {} has no subscriptions", user_id));
                Ok(vec![Reply::text(labels::NO_SUBSCRIPTIONS)])
            }
            [course_name] => {
                let mut replies = vec![Reply::text(labels::continuing_course(course_name))];
                replies.extend(self.enter_course(user_id, session, course_name)?);
                Ok(replies)
            }
            many => {
                self.events.info(format!("User {} picks one of {} courses", user_id, many.len()));
                Ok(vec![Reply::with_keyboard(
                    labels::CONTINUE_PICK_PROMPT,
                    Keyboard::course_list(many),
                )])
            }
        }
    }

    fn select_course(&self, sender: &Sender, session: &mut Session, course_name: String) -> Vec<Reply> {
        let user_id = sender.platform_id;
        // Users created before a database reset reach the menu without /start.
        self.store.register_user(user_id, sender.display_name.as_deref());

        match self.store.subscribe(user_id, &course_name) {
            Some(SubscribeOutcome::Created | SubscribeOutcome::AlreadySubscribed) => {
                let confirmation = Reply::text(labels::subscribed_to(&course_name));
                session.selected_course = Some(course_name);
                vec![confirmation, view::start_now_offer()]
            }
            Some(SubscribeOutcome::UnknownUser | SubscribeOutcome::UnknownCourse) | None => {
                vec![Reply::text(labels::SUBSCRIBE_FAILED)]
            }
        }
    }

    /// Opens a course in the session cursor and renders its first section.
    ///
    /// A course without content gets the explicit "not available" reply and
    /// leaves the cursor inactive.
    fn enter_course(&self, user_id: i64, session: &mut Session, course_name: &str) -> AppResult<Vec<Reply>> {
        match session.cursor.enter(&self.content, course_name) {
            Ok(()) => {}
            Err(AppError::NotFound(_)) => {
                self.events.warn(format!("Course {} is not implemented yet", course_name));
                return Ok(vec![Reply::text(labels::COURSE_NOT_AVAILABLE)]);
            }
            Err(e) => return Err(e),
        }

        let section = session.cursor.current_section(&self.content)?;
        let len = self.content.get_sections(course_name)?.len();

        let mut replies = Vec::with_capacity(2);
        if let Some(image) = self.store.get_course_image(course_name) {
            replies.push(Reply::Photo(image));
        }
        replies.push(view::section_message(section, 0, len));
        self.events.info(format!("User {} started course {}", user_id, course_name));
        Ok(replies)
    }

    fn navigate(&self, user_id: i64, session: &mut Session, nav: NavAction) -> AppResult<Vec<Reply>> {
        let step = match nav {
            NavAction::Next => session.cursor.advance(),
            NavAction::Prev => session.cursor.retreat(),
            NavAction::Exit => {
                return match session.cursor.exit() {
                    Ok(course_name) => {
                        self.events.info(format!("User {} left course {}", user_id, course_name));
                        Ok(vec![Reply::Delete, view::courses_menu()])
                    }
                    Err(AppError::NoActiveCourse) => Ok(self.no_active_course(user_id)),
                    Err(e) => Err(e),
                };
            }
        };

        match step {
            Ok(Step::Unchanged) => Ok(Vec::new()),
            Ok(Step::Moved { to, .. }) => {
                let section = session.cursor.current_section(&self.content)?;
                let course_name = session.cursor.course_name().unwrap_or_default();
                let len = self.content.get_sections(course_name)?.len();
                self.events.info(format!(
                    "User {} moved to section {} of course {}",
                    user_id, to, course_name
                ));
                Ok(vec![view::section_edit(section, to, len)])
            }
            Err(AppError::NoActiveCourse) => Ok(self.no_active_course(user_id)),
            Err(e) => Err(e),
        }
    }

    fn no_active_course(&self, user_id: i64) -> Vec<Reply> {
        self.events
            .error(format!("Navigation failed: no course selected for user {}", user_id));
        vec![Reply::edit_plain(labels::NO_ACTIVE_COURSE)]
    }
}
