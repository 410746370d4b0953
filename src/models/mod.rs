pub mod camp;
pub mod participant;
pub mod payment;
pub mod response;
pub mod review;
pub mod user;

pub use camp::*;
pub use participant::*;
pub use payment::*;
pub use response::*;
pub use review::*;
pub use user::*;
