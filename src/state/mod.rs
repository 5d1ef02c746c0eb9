mod persistence;
mod session;

pub use persistence::{load_config, load_or_bundled, save_config};
pub use session::PlannerSession;
