//! Backend selection from the process environment.

use figment::providers::Env;
use figment::{Figment, Jail};
use voting_lib::config::{DbConfig, EnvSettings};

#[test]
fn nothing_set_selects_embedded_store() {
    let settings = EnvSettings::from_figment(&Figment::new()).unwrap();
    assert!(settings.render.is_none());
    assert!(settings.database_url.is_none());
    let cfg = DbConfig::resolve(settings).unwrap();
    assert_eq!(cfg, DbConfig::local("voting_system.db"));
}

#[test]
fn legacy_url_from_env_is_rewritten() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "postgres://vote:pw@db.internal:5432/voting");
        let cfg = DbConfig::from_env().map_err(|e| e.to_string())?;
        assert_eq!(
            cfg,
            DbConfig::Hosted {
                url: "postgresql://vote:pw@db.internal:5432/voting".into()
            }
        );
        Ok(())
    });
}

#[test]
fn modern_url_from_env_is_kept() {
    Jail::expect_with(|jail| {
        jail.set_env("DATABASE_URL", "postgresql://vote@db/voting");
        let cfg = DbConfig::from_env().map_err(|e| e.to_string())?;
        assert_eq!(cfg, DbConfig::hosted("postgresql://vote@db/voting"));
        assert_eq!(cfg.backend_name(), "postgresql");
        Ok(())
    });
}

#[test]
fn marker_with_url_selects_hosted() {
    Jail::expect_with(|jail| {
        jail.set_env("RENDER", "true");
        jail.set_env("DATABASE_URL", "postgres://h/db");
        let figment = Figment::from(Env::raw().only(&["RENDER", "DATABASE_URL"]));
        let settings = EnvSettings::from_figment(&figment).map_err(|e| e.to_string())?;
        assert_eq!(settings.render.as_deref(), Some("true"));
        let cfg = DbConfig::resolve(settings).map_err(|e| e.to_string())?;
        assert_eq!(cfg, DbConfig::hosted("postgresql://h/db"));
        Ok(())
    });
}

#[test]
fn marker_without_url_is_rejected() {
    let err = DbConfig::resolve(EnvSettings {
        render: Some("1".into()),
        database_url: None,
    })
    .unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
}
