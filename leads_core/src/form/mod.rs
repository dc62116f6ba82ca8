//! Interactive contact-form session: state, submit gate and outcome feedback

pub mod dispatch;
pub mod navigation;
pub mod session;

pub use dispatch::{Navigator, Notifier, OutcomeDispatcher, Route, SUCCESS_MESSAGE};
pub use navigation::ScheduledNavigation;
pub use session::{LeadForm, SubmitResult};
