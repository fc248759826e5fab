// Operations of the Keyrock administrative API, grouped by resource

pub mod applications;
pub mod oauth;
pub mod organizations;
pub mod permissions;
pub mod proxies;
pub mod roles;
pub mod users;

pub use applications::{default_application_description, DEFAULT_APPLICATION_URL};
pub use organizations::default_organization_description;
pub use permissions::default_permission_description;
pub use users::default_user_description;
