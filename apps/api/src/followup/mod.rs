// Due dates, overdue/urgent lists and the dashboard summary.

pub mod dashboard;
pub mod due;
pub mod handlers;
