//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use conduit_config::{ConduitConfig, SessionBackend, HRIS_FALLBACK_URL};
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_upstreams_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[investigation]
base_url = "http://investigation.internal:5000"

[tax]
base_url = "http://tax.internal:8000/"
"#,
        )?;

        let config: ConduitConfig = Figment::from(Serialized::defaults(ConduitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.investigation.base(), "http://investigation.internal:5000");
        assert_eq!(config.tax.base(), "http://tax.internal:8000");
        // untouched sections keep their fallback
        assert_eq!(config.hris.base(), HRIS_FALLBACK_URL);
        Ok(())
    });
}

#[test]
fn loads_sessions_and_documents_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[sessions]
backend = "libsql"
path = "data/chat.db"

[documents]
allowed_prefix = "https://docs.example.com/tax/"
"#,
        )?;

        let config: ConduitConfig = Figment::from(Serialized::defaults(ConduitConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.sessions.backend, SessionBackend::Libsql);
        assert_eq!(config.sessions.path, "data/chat.db");
        assert!(config.documents.allows("https://docs.example.com/tax/a.pdf"));
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".conduit")?;
        jail.create_file(
            ".conduit/config.toml",
            r#"
[server]
bind = "0.0.0.0:8080"
"#,
        )?;

        let config = ConduitConfig::load().expect("config loads");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
        Ok(())
    });
}

#[test]
fn unknown_backend_fails_to_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".conduit")?;
        jail.create_file(
            ".conduit/config.toml",
            r#"
[sessions]
backend = "redis"
"#,
        )?;

        assert!(ConduitConfig::load().is_err());
        Ok(())
    });
}
