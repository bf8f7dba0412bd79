pub mod application;
pub mod job;
pub mod user;

pub use application::{Application, ApplicationPatch, ApplicationStatus, NewApplication};
pub use job::{Job, JobPatch, NewJob};
pub use user::{NewUser, Role, User, UserPatch};
