//! Profile selection and management components.
//!
//! - **Selector** (`selector.rs`): the panel showing the active quality
//!   profile, the grouped profile menu and the delegated actions
//! - **Manage dialog** (`manage.rs`): the overlay for renaming, duplicating
//!   and deleting profiles

pub mod manage;
pub mod selector;

pub use manage::ManageDialog;
pub use selector::ProfileSelector;
