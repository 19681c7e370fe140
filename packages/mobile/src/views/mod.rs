mod login;
pub use login::Login;

mod home;
pub use home::Home;

mod boot;
pub use boot::{BootFailure, BootScreen};
