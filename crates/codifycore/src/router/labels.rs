//! Button labels, callback tokens, and reply texts shown to users

// Reply-keyboard buttons
pub const COURSES: &str = "📚 Курси";
pub const PROFILE: &str = "👤 Профіль";
pub const ABOUT: &str = "ℹ️ Про нас";
pub const CHOOSE_COURSE: &str = "📥 Вибір курсів";
pub const CONTINUE_LEARNING: &str = "▶️ Продовжити/Розпочати навчання";
pub const BACK_TO_COURSES: &str = "🔙 Назад до меню Курси";
pub const BACK_TO_MAIN: &str = "🔙 Назад до головного меню";
pub const START_NOW: &str = "▶️ Розпочати курс зараз";
pub const NEXT_LESSON: &str = "➡️ Наступний урок";

// Inline navigation buttons and their callback tokens
pub const NAV_PREV: &str = "◀️ Назад";
pub const NAV_NEXT: &str = "▶️ Вперед";
pub const NAV_EXIT: &str = "🔙 Вийти до меню Курси";
pub const WEBSITE: &str = "🌐 Вебсайт";

pub const CALLBACK_PREV: &str = "prev";
pub const CALLBACK_NEXT: &str = "next";
pub const CALLBACK_EXIT: &str = "exit_course";

// Replies
pub const WELCOME: &str = "Ласкаво просимо до Codify!";
pub const MAIN_MENU_PROMPT: &str = "Будь ласка, виберіть опцію з меню:";
pub const COURSES_MENU_PROMPT: &str = "Оберіть дію для курсу:";
pub const CHOOSE_COURSE_PROMPT: &str = "Оберіть курс зі списку:";
pub const NO_COURSES: &str = "Наразі немає доступних курсів.";
pub const NO_SUBSCRIPTIONS: &str = "Немає підписок. 📥 Спочатку оберіть курс.";
pub const CONTINUE_PICK_PROMPT: &str = "Оберіть курс для продовження:";
pub const START_NOW_PROMPT: &str = "Бажаєте розпочати навчання зараз?";
pub const COURSE_NOT_SELECTED: &str = "❓ Курс не вибрано. Спочатку виберіть курс.";
pub const COURSE_NOT_AVAILABLE: &str = "⛔ Навчання для цього курсу ще не реалізовано.";
pub const NO_ACTIVE_COURSE: &str = "Помилка: курс не вибрано";
pub const UNRECOGNIZED: &str = "❓ Команду не розпізнано. Будь ласка, скористайтесь меню.";
pub const NEXT_LESSON_UNAVAILABLE: &str = "Ця функція поки не реалізована. Скористайтесь режимом читання курсу.";
pub const ABOUT_TEXT: &str = "Codify — освітня платформа для вивчення програмування 🎓";
pub const PROFILE_NOT_FOUND: &str = "Профіль не знайдено.";
pub const SUBSCRIBE_FAILED: &str = "🚫 Не вдалося оформити підписку. Спробуйте пізніше.";
pub const APOLOGY: &str = "🚫 Сталася помилка. Спробуйте ще раз пізніше.";
pub const SECTION_MEDIA: &str = "📎 Матеріал";

pub fn continuing_course(course_name: &str) -> String {
    format!("🔁 Ви продовжуєте курс: {}", course_name)
}

pub fn subscribed_to(course_name: &str) -> String {
    format!("✅ Ви підписались на курс: {}", course_name)
}
