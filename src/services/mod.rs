//! Service layer behind the serverless handlers.
//!
//! Each mutating call checks the caller first (`authorize`) and only then
//! touches the document store:
//! - Push notifications (`send_notification`, admin)
//! - E-mail requests (`send_email`, signed-in)
//! - Scholarship CRUD (admin)
//! - Daily cleanup (scheduled)

pub mod authorize;
mod cleanup;
mod email;
mod notifications;
mod scholarships;

pub use authorize::{CallerContext, require_admin, require_caller};
pub use cleanup::{CleanupReport, run_daily_cleanup};
pub use email::{EmailRequest, send_email};
pub use notifications::{NotificationRequest, send_notification};
pub use scholarships::{
    create_scholarship, delete_scholarship, list_scholarships, update_scholarship,
};
