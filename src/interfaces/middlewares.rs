pub mod admin_guard;
