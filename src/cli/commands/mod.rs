pub mod check;
pub mod init;

pub use check::check;
pub use init::init;
