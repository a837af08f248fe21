mod account;
mod directory;
mod money;
mod movement;
mod statement;
mod user;

pub use account::*;
pub use directory::*;
pub use money::*;
pub use movement::*;
pub use statement::*;
pub use user::*;
