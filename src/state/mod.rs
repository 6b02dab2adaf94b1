//! State module - Submission pipeline and dialog visibility

mod form;
mod modal;

pub use form::{FormController, Notice, NoticeLevel};
pub use modal::{DialogId, ModalController};
