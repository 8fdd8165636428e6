// Staff accounts. Only Pastors manage them; listing is open so clients can pick an acting user.

pub mod handlers;
