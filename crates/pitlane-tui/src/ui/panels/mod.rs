pub mod detail;
pub mod dialogs;
pub mod home;
pub mod races;
