pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod logger;
pub mod pack;
pub mod reporting;
pub mod scanner;
pub mod session;
pub mod unpack;
pub mod watch;

pub use errors::TreepackError;
pub use pack::pack_directory;
pub use session::BundleSession;
pub use unpack::{unpack_bundle, DirectoryWriter};
