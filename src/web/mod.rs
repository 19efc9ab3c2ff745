pub mod extract;

pub use extract::CurrentUser;
