pub mod submissions;
pub mod system;

pub use submissions::SubmissionService;
pub use system::SystemService;
