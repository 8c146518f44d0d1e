use voting_lib::{get_constituencies, init_db, DbConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DbConfig::from_env()?;
    log::info!("DB backend: {}", config.backend_name());

    let report = init_db(&config).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;
    if report.admin_created {
        log::warn!("Default admin account created; change its password");
    }

    let names = get_constituencies(&config)?;
    log::info!("{} constituencies available", names.len());
    Ok(())
}
