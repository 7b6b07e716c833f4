// Module declarations
pub mod control;
pub mod roster;

// Re-export commonly used items for convenience
pub use control::{handle_broadcast, handle_user_action};
pub use roster::{handle_list_all, handle_locate_user};
