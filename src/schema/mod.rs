pub mod validation;

pub use validation::{
    is_valid_email, resolve_pagination, validate_create_user, validate_update_user,
};
