pub mod character;
pub mod message;
pub mod session;
pub mod settings;

pub use character::*;
pub use message::*;
pub use session::*;
pub use settings::*;
