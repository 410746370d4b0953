pub mod auth_service;
pub mod camp_service;
pub mod participant_service;
pub mod payment_service;
pub mod review_service;
pub mod stripe_service;
pub mod user_service;

pub use camp_service::*;
pub use participant_service::*;
pub use payment_service::*;
pub use review_service::*;
pub use stripe_service::*;
pub use user_service::*;
