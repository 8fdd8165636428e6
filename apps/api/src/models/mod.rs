pub mod activity;
pub mod interaction;
pub mod journey;
pub mod person;
pub mod user;
