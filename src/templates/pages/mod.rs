pub mod home;
pub mod properties;

pub use home::home_page;
pub use properties::{properties_page, results_fragment};
