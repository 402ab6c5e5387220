pub mod lifecycle;
pub mod session;
pub mod task;
pub mod user;

pub use lifecycle::{Lifecycle, Tombstoned};
pub use session::{Session, SessionToken};
pub use task::{Task, TaskInput};
pub use user::{NewUser, User, UserInput, UserRecord};
