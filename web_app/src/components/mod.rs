mod dashboard;
mod files;
mod login;
mod menu_panel;
mod restaurant_wizard;
mod signup;
mod toast;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use restaurant_wizard::RestaurantWizard;
pub use signup::SignupPage;
pub use toast::ToastContainer;
