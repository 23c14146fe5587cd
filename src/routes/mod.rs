pub mod auth;

pub mod users;

pub mod classes;

pub mod textbooks;

pub mod homeworks;

pub mod submissions;

pub mod files;

pub use auth::configure_auth_routes;
pub use classes::configure_classes_routes;
pub use files::configure_file_routes;
pub use homeworks::configure_homeworks_routes;
pub use submissions::configure_submissions_routes;
pub use textbooks::configure_textbooks_routes;
pub use users::configure_user_routes;
