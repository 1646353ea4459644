pub mod init;
pub mod inspect;
pub mod publish;

pub use init::InitArgs;
pub use inspect::InspectArgs;
pub use publish::PublishArgs;
