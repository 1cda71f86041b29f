// Components module - reusable UI building blocks
//
// Shell components are rendered around every view:
// - Title bar: app name, view, loading spinner, provider
// - Error banner: the session's failure message, if any
// - Logs panel: tail of the system log
// - Status bar: key hints for the active view

pub mod error_banner;
pub mod logs_panel;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
