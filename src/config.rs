use std::env;

/// Returns the value of the named environment variable if it exists or panics.
pub fn get_variable(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("must define {} environment variable", name))
}

/// Returns the value of the named environment variable, or `default`
/// if it isn’t set.
pub fn get_variable_or(name: &str, default: impl Into<String>) -> String {
    env::var(name).unwrap_or_else(|_| default.into())
}

/// Whether the named environment variable is set to `1`.
pub fn is_enabled(name: &str) -> bool {
    env::var(name).map(|v| v == "1").unwrap_or(false)
}
