pub(crate) fn default_data_dir() -> String {
    ".lectern".to_string()
}

pub(crate) fn default_namespace() -> String {
    crate::keys::DEFAULT_NAMESPACE.to_string()
}

pub(crate) fn default_log_level() -> crate::config::LogLevel {
    crate::config::LogLevel::Info
}
