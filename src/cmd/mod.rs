pub mod check_deploy;
pub mod render;
pub mod submit;
pub mod watch;
