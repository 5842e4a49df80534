// Stark Browser services
// Services provide core functionality: ad blocking, input resolution, settings, themes, media.

pub mod ad_blocker;
pub mod media;
pub mod settings_engine;
pub mod theme_engine;
pub mod url_resolver;
