mod shell;
pub use shell::Shell;

mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod oauth_callback;
pub use oauth_callback::OAuthCallback;

mod profile;
pub use profile::Profile;

mod not_found;
pub use not_found::NotFound;
